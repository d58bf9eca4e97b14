//! 감시 통계 구조체.

use serde::{Deserialize, Serialize};

/// 감시 루프 누적 통계.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchStats {
    /// 실행된 사이클 수
    pub cycles: usize,
    /// 조회된 총 캔들 수
    pub fetched_klines: usize,
    /// 감지된 총 시그널 수
    pub signals: usize,
    /// 조회 실패 횟수
    pub fetch_errors: usize,
    /// 알림 전송 실패 횟수
    pub notify_errors: usize,
}

impl WatchStats {
    /// 새 통계 객체 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 통계 요약 로그 출력.
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            cycles = self.cycles,
            fetched_klines = self.fetched_klines,
            signals = self.signals,
            fetch_errors = self.fetch_errors,
            notify_errors = self.notify_errors,
            "사이클 완료"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        let stats = WatchStats::new();
        assert_eq!(stats.cycles, 0);
        assert_eq!(stats.signals, 0);
        assert_eq!(stats.fetch_errors, 0);
    }
}
