//! 패턴 감지 시그널.
//!
//! 이 모듈은 스캔 결과로 방출되는 시그널 타입을 정의합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 패턴 스캔이 방출하는 감지 시그널.
///
/// 매칭된 윈도우의 마지막 캔들 시각만 담습니다. 감지 대상 패턴이 하나뿐이므로
/// 패턴 이름은 싣지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSignal {
    /// 윈도우 마지막 캔들의 시작 시각
    pub triggered_at: DateTime<Utc>,
}

impl PatternSignal {
    /// 새 시그널을 생성합니다.
    pub fn new(triggered_at: DateTime<Utc>) -> Self {
        Self { triggered_at }
    }
}

impl fmt::Display for PatternSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.triggered_at.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_display_is_rfc3339() {
        let ts = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let signal = PatternSignal::new(ts);
        assert_eq!(signal.to_string(), ts.to_rfc3339());
    }
}
