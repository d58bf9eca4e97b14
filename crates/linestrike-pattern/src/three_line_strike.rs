//! 약세 삼선격침(Bearish Three-Line Strike) 패턴 감지.
//!
//! 4개 캔들로 구성되는 반전 패턴:
//! - 종가가 연속으로 낮아지는 음봉 3개
//! - 첫 캔들의 시가 이상까지 되돌리는 양봉 1개
//!
//! ## 매칭 조건
//! 윈도우 `(c1, c2, c3, c4)`에 대해 네 조건이 모두 성립해야 합니다:
//! 1. c1이 음봉
//! 2. c2가 음봉, c2 시가가 c1 몸통 내부(`c1.open > c2.open > c1.close`),
//!    c2 종가가 c1 종가보다 낮음
//! 3. c3가 c2에 대해 같은 형태
//! 4. c4가 양봉이고 `c4.close >= c1.open` (경계 포함)

use linestrike_core::{Kline, PatternSignal};

/// 패턴 윈도우 크기.
const WINDOW_SIZE: usize = 4;

/// 약세 삼선격침 패턴 감지기.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeLineStrike;

impl ThreeLineStrike {
    /// 새 감지기를 생성합니다.
    pub fn new() -> Self {
        Self
    }

    /// 캔들 시퀀스를 스캔하여 모든 패턴 발생 위치의 시그널을 반환합니다.
    ///
    /// 스텝 1로 겹치는 4캔들 윈도우를 전부 평가합니다. 4개 미만의
    /// 시퀀스는 빈 결과를 반환하며 에러가 아닙니다. 결과는 윈도우 시작
    /// 순서(입력이 시간순이면 시간순)로 정렬됩니다.
    ///
    /// 시그널은 매칭된 윈도우의 마지막 캔들 시각을 담습니다.
    pub fn scan(&self, klines: &[Kline]) -> Vec<PatternSignal> {
        klines
            .windows(WINDOW_SIZE)
            .filter(|window| self.matches(window))
            .map(|window| PatternSignal::new(window[WINDOW_SIZE - 1].open_time))
            .collect()
    }

    /// 단일 윈도우가 패턴과 일치하는지 평가합니다.
    ///
    /// 길이가 정확히 4가 아닌 윈도우는 일치하지 않는 것으로 처리합니다.
    pub fn matches(&self, window: &[Kline]) -> bool {
        if window.len() != WINDOW_SIZE {
            return false;
        }

        let (c1, c2, c3, c4) = (&window[0], &window[1], &window[2], &window[3]);

        c1.is_bearish()
            && Self::continues_strike(c1, c2)
            && Self::continues_strike(c2, c3)
            && Self::breaks_strike(c1, c4)
    }

    /// 하락 연속 조건: `curr`가 음봉이고, 시가가 `prev` 몸통 내부에 있으며,
    /// 종가가 `prev` 종가보다 낮은지 확인합니다. 모든 비교는 엄격 부등호입니다.
    fn continues_strike(prev: &Kline, curr: &Kline) -> bool {
        curr.is_bearish()
            && prev.open > curr.open
            && curr.open > prev.close
            && curr.close < prev.close
    }

    /// 격침 조건: `striker`가 양봉이고 종가가 첫 캔들의 시가 이상인지
    /// 확인합니다. 시가와 정확히 같은 종가도 일치합니다(`>=`).
    fn breaks_strike(first: &Kline, striker: &Kline) -> bool {
        striker.is_bullish() && striker.close >= first.open
    }
}
