//! 거래 심볼 정의.
//!
//! 이 모듈은 거래 가능한 상품을 나타내는 심볼 타입을 정의합니다.
//! OKX 인스트루먼트 ID 형식(`BTC-USDT`)과 상호 변환합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 거래 가능한 상품을 나타내는 트레이딩 심볼.
///
/// 심볼은 기준 자산과 호가 자산으로 구성됩니다. 예: BTC/USDT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// 기준 자산 (예: BTC, ETH)
    pub base: String,
    /// 호가 자산 (예: USDT, USDC)
    pub quote: String,
}

impl Symbol {
    /// 새 심볼을 생성합니다.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
        }
    }

    /// OKX 인스트루먼트 ID 형식(`BTC-USDT`)을 반환합니다.
    pub fn to_inst_id(&self) -> String {
        format!("{}-{}", self.base, self.quote)
    }

    /// `BASE-QUOTE` 또는 `BASE/QUOTE` 형식 문자열에서 심볼을 파싱합니다.
    pub fn from_inst_id(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(['-', '/']).collect();
        match parts.as_slice() {
            [base, quote] if !base.is_empty() && !quote.is_empty() => {
                Some(Self::new(*base, *quote))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

impl FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_inst_id(s).ok_or_else(|| format!("Invalid symbol: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_creation() {
        let symbol = Symbol::new("btc", "usdt");
        assert_eq!(symbol.base, "BTC");
        assert_eq!(symbol.quote, "USDT");
    }

    #[test]
    fn test_symbol_display() {
        let symbol = Symbol::new("BTC", "USDT");
        assert_eq!(symbol.to_string(), "BTC-USDT");
        assert_eq!(symbol.to_inst_id(), "BTC-USDT");
    }

    #[test]
    fn test_symbol_from_inst_id() {
        let symbol = Symbol::from_inst_id("ETH-USDT").unwrap();
        assert_eq!(symbol.base, "ETH");
        assert_eq!(symbol.quote, "USDT");

        // 슬래시 구분자도 허용
        let symbol = Symbol::from_inst_id("eth/usdt").unwrap();
        assert_eq!(symbol.to_inst_id(), "ETH-USDT");

        assert!(Symbol::from_inst_id("BTCUSDT").is_none());
        assert!(Symbol::from_inst_id("BTC-").is_none());
    }

    #[test]
    fn test_symbol_from_str() {
        let symbol: Symbol = "BTC-USDT".parse().unwrap();
        assert_eq!(symbol.base, "BTC");
        assert!("".parse::<Symbol>().is_err());
    }
}
