//! 삼선격침 스캐너 통합 테스트.
//!
//! 스텝 1 윈도우 순회, 시그널 정렬, 전체 시퀀스 수준 속성을 검증합니다.

use chrono::{DateTime, Duration, Utc};
use linestrike_core::{Kline, Symbol, Timeframe};
use linestrike_pattern::ThreeLineStrike;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 테스트용 15분봉 생성 헬퍼.
fn candle(index: i64, open: Decimal, close: Decimal) -> Kline {
    let open_time =
        DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000 + index * 900_000).unwrap();
    Kline::new(
        Symbol::new("BTC", "USDT"),
        Timeframe::M15,
        open_time,
        open,
        open.max(close),
        open.min(close),
        close,
        dec!(100),
        open_time + Duration::milliseconds(900_000 - 1),
    )
}

/// `start` 인덱스부터 매칭 윈도우를 이루는 4개 캔들.
fn matching_quad(start: i64) -> Vec<Kline> {
    vec![
        candle(start, dec!(100), dec!(90)),
        candle(start + 1, dec!(95), dec!(85)),
        candle(start + 2, dec!(92), dec!(80)),
        candle(start + 3, dec!(80), dec!(101)),
    ]
}

#[test]
fn match_at_offset_start_is_found() {
    // 매칭 윈도우가 인덱스 1에서 시작: 4칸 타일링이라면 놓치는 위치
    let mut klines = vec![candle(0, dec!(70), dec!(75))];
    klines.extend(matching_quad(1));

    let signals = ThreeLineStrike::new().scan(&klines);

    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].triggered_at, klines[4].open_time);
}

#[test]
fn disjoint_matches_yield_two_ascending_signals() {
    let mut klines = matching_quad(0);
    klines.extend(vec![
        candle(4, dec!(120), dec!(110)),
        candle(5, dec!(115), dec!(105)),
        candle(6, dec!(112), dec!(100)),
        candle(7, dec!(100), dec!(121)),
    ]);

    let signals = ThreeLineStrike::new().scan(&klines);

    assert_eq!(signals.len(), 2);
    assert_eq!(signals[0].triggered_at, klines[3].open_time);
    assert_eq!(signals[1].triggered_at, klines[7].open_time);
    assert!(signals[0].triggered_at < signals[1].triggered_at);
}

#[test]
fn match_embedded_in_noise_is_isolated() {
    // 앞뒤 잡음 속에서 매칭 윈도우 하나만 감지되어야 함
    let mut klines = vec![
        candle(0, dec!(100), dec!(105)),
        candle(1, dec!(105), dec!(103)),
    ];
    klines.extend(matching_quad(2));
    klines.push(candle(6, dec!(101), dec!(104)));

    let signals = ThreeLineStrike::new().scan(&klines);

    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].triggered_at, klines[5].open_time);
}

#[test]
fn green_first_candle_never_signals() {
    let mut klines = matching_quad(0);
    klines[0] = candle(0, dec!(90), dec!(100)); // c1 양봉

    assert!(ThreeLineStrike::new().scan(&klines).is_empty());
}

#[test]
fn red_striker_never_signals() {
    let mut klines = matching_quad(0);
    klines[3] = candle(3, dec!(105), dec!(79)); // c4 음봉

    assert!(ThreeLineStrike::new().scan(&klines).is_empty());
}

proptest! {
    /// 전부 양봉인 시퀀스는 길이에 관계없이 시그널을 내지 않는다.
    #[test]
    fn all_green_sequences_never_signal(
        bodies in prop::collection::vec((1u32..1_000_000, 1u32..10_000), 0..64)
    ) {
        let klines: Vec<Kline> = bodies
            .iter()
            .enumerate()
            .map(|(i, (open, body))| {
                let open = Decimal::from(*open);
                let close = open + Decimal::from(*body);
                candle(i as i64, open, close)
            })
            .collect();

        prop_assert!(ThreeLineStrike::new().scan(&klines).is_empty());
    }

    /// 임의 시퀀스에서 시그널은 항상 입력 캔들(인덱스 3 이상)의 시각이며
    /// 오름차순으로 정렬되어 있다.
    #[test]
    fn signals_are_ascending_input_timestamps(
        pairs in prop::collection::vec((1u32..1_000_000, 1u32..1_000_000), 0..64)
    ) {
        let klines: Vec<Kline> = pairs
            .iter()
            .enumerate()
            .map(|(i, (open, close))| {
                candle(i as i64, Decimal::from(*open), Decimal::from(*close))
            })
            .collect();

        let signals = ThreeLineStrike::new().scan(&klines);

        for pair in signals.windows(2) {
            prop_assert!(pair[0].triggered_at < pair[1].triggered_at);
        }
        for signal in &signals {
            let position = klines
                .iter()
                .position(|k| k.open_time == signal.triggered_at);
            prop_assert!(matches!(position, Some(i) if i >= 3));
        }
    }
}
