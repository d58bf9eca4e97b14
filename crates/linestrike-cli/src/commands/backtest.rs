//! 스냅샷 리플레이 명령어.
//!
//! 저장된 CSV 스냅샷을 로드해 실시간 감시와 동일한 스캐너로 스캔하고,
//! 감지된 시그널 시각을 출력합니다.

use anyhow::{Context, Result};
use linestrike_core::{Symbol, Timeframe};
use linestrike_data::load_snapshot;
use linestrike_pattern::ThreeLineStrike;
use std::path::Path;
use tracing::info;

use super::watch::PATTERN_NAME;

/// 스냅샷 리플레이 실행.
pub fn run(file: &Path, symbol: &Symbol, timeframe: Timeframe) -> Result<()> {
    let klines = load_snapshot(file, symbol, timeframe)
        .with_context(|| format!("Failed to load snapshot: {}", file.display()))?;

    info!(path = %file.display(), rows = klines.len(), "스냅샷 로드 완료");

    let signals = ThreeLineStrike::new().scan(&klines);

    if signals.is_empty() {
        info!("No signals");
        return Ok(());
    }

    info!(count = signals.len(), pattern = PATTERN_NAME, "패턴 감지");
    for signal in &signals {
        println!("{}", signal);
    }

    Ok(())
}
