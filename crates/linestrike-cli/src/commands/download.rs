//! 스냅샷 캡처 명령어.
//!
//! OKX에서 캔들을 조회해 리플레이용 CSV 스냅샷으로 저장합니다.

use anyhow::{Context, Result};
use linestrike_core::{Symbol, Timeframe};
use linestrike_data::save_snapshot;
use linestrike_exchange::{MarketDataProvider, OkxClient};
use std::path::Path;
use tracing::{info, warn};

/// 스냅샷 캡처 실행.
pub async fn run(output: &Path, symbol: &Symbol, timeframe: Timeframe, limit: u32) -> Result<()> {
    let client = OkxClient::from_env()?;

    info!(symbol = %symbol, bar = %timeframe, limit = limit, "캔들 조회 시작");

    let klines = client
        .get_klines(symbol, timeframe, Some(limit))
        .await
        .context("Failed to fetch klines from OKX")?;

    if klines.is_empty() {
        warn!(symbol = %symbol, "다운로드된 캔들이 없습니다");
        return Ok(());
    }

    let written = save_snapshot(output, &klines)
        .with_context(|| format!("Failed to write snapshot: {}", output.display()))?;

    info!(path = %output.display(), rows = written, "스냅샷 저장 완료");

    Ok(())
}
