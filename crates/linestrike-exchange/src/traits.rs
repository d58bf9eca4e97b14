//! 시장 데이터 trait 정의.

use async_trait::async_trait;
use linestrike_core::{Kline, Symbol, Timeframe};

use crate::ExchangeError;

/// 거래소 작업을 위한 Result 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// 통합 시장 데이터 조회 인터페이스.
///
/// 감시 루프와 스냅샷 캡처가 이 trait을 통해 캔들 데이터를 조회합니다.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// 데이터 소스 이름 반환.
    fn name(&self) -> &str;

    /// 과거 캔들스틱 조회.
    ///
    /// 결과는 과거 → 현재 순(타임스탬프 오름차순)으로 정렬되어야 합니다.
    async fn get_klines(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        limit: Option<u32>,
    ) -> ExchangeResult<Vec<Kline>>;
}
