//! 시장 데이터 타입 및 구조체.
//!
//! 이 모듈은 캔들스틱 데이터 타입을 정의합니다:
//! - `Kline` - OHLCV 캔들스틱 데이터

use crate::types::{Symbol, Timeframe};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLCV 캔들스틱 데이터.
///
/// 생성 이후 변경하지 않습니다. 패턴 스캔은 읽기 전용 슬라이스로 소비합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kline {
    /// 거래 심볼
    pub symbol: Symbol,
    /// 타임프레임
    pub timeframe: Timeframe,
    /// 캔들 시작 시간
    pub open_time: DateTime<Utc>,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량 (기준 자산 단위)
    pub volume: Decimal,
    /// 캔들 종료 시간
    pub close_time: DateTime<Utc>,
    /// 거래대금 (호가 자산 단위)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_volume: Option<Decimal>,
}

impl Kline {
    /// 새 캔들을 생성합니다.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: Symbol,
        timeframe: Timeframe,
        open_time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
        close_time: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol,
            timeframe,
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
            quote_volume: None,
        }
    }

    /// 캔들 몸통 크기(절대값)를 반환합니다.
    pub fn body_size(&self) -> Decimal {
        (self.close - self.open).abs()
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    ///
    /// 시가와 종가가 같은 도지 캔들은 양봉도 음봉도 아닙니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 음봉(종가 < 시가)인지 확인합니다.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn kline(open: Decimal, close: Decimal) -> Kline {
        let symbol = Symbol::new("BTC", "USDT");
        let now = Utc::now();
        Kline::new(
            symbol,
            Timeframe::M15,
            now,
            open,
            open.max(close),
            open.min(close),
            close,
            dec!(100),
            now,
        )
    }

    #[test]
    fn test_bullish_bearish() {
        assert!(kline(dec!(100), dec!(101)).is_bullish());
        assert!(kline(dec!(100), dec!(99)).is_bearish());
        assert!(!kline(dec!(100), dec!(99)).is_bullish());
    }

    #[test]
    fn test_doji_is_neither() {
        let doji = kline(dec!(100), dec!(100));
        assert!(!doji.is_bullish());
        assert!(!doji.is_bearish());
    }

    #[test]
    fn test_body_and_range() {
        let k = kline(dec!(100), dec!(95));
        assert_eq!(k.body_size(), dec!(5));
        assert_eq!(k.range(), dec!(5));
    }
}
