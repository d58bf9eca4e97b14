//! 환경변수 기반 설정 모듈.

use linestrike_core::{Symbol, Timeframe};
use std::time::Duration;

/// 감시 루프 설정.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// 감시할 심볼
    pub symbol: Symbol,
    /// 캔들 타임프레임
    pub timeframe: Timeframe,
    /// 사이클당 조회 캔들 수
    pub limit: u32,
    /// 조회 주기 (분 단위)
    pub interval_minutes: u64,
}

impl WatchConfig {
    /// 환경변수에서 설정 로드.
    ///
    /// 주기를 지정하지 않으면 타임프레임 길이를 그대로 사용합니다
    /// (15분봉이면 15분마다 조회).
    pub fn from_env() -> Self {
        let symbol = env_var_parse("WATCH_SYMBOL", Symbol::new("BTC", "USDT"));
        let timeframe = env_var_parse("WATCH_BAR", Timeframe::M15);
        let limit = env_var_parse("WATCH_LIMIT", 100);
        let interval_minutes =
            env_var_parse("WATCH_INTERVAL_MINUTES", timeframe.as_minutes());

        Self {
            symbol,
            timeframe,
            limit,
            interval_minutes,
        }
    }

    /// 조회 주기를 Duration으로 반환.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes * 60)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            symbol: Symbol::new("BTC", "USDT"),
            timeframe: Timeframe::M15,
            limit: 100,
            interval_minutes: Timeframe::M15.as_minutes(),
        }
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용).
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_fifteen_minute_cadence() {
        let config = WatchConfig::default();
        assert_eq!(config.symbol.to_inst_id(), "BTC-USDT");
        assert_eq!(config.timeframe, Timeframe::M15);
        assert_eq!(config.limit, 100);
        assert_eq!(config.interval(), Duration::from_secs(15 * 60));
    }

    #[test]
    fn test_env_var_parse_falls_back_to_default() {
        assert_eq!(
            env_var_parse("LINESTRIKE_TEST_UNSET_VAR", 42u32),
            42
        );
    }
}
