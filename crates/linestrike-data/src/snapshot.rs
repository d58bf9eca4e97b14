//! CSV 스냅샷 저장/로드.
//!
//! 형식: `timestamp,open,high,low,close,volume` 헤더 뒤에 캔들당 한 행.
//! 타임스탬프는 epoch 밀리초입니다. 로드 시 행 순서(과거 우선/최신 우선)와
//! 무관하게 타임스탬프 오름차순으로 정렬해 반환합니다.

use crate::error::{SnapshotError, SnapshotResult};
use chrono::{DateTime, Utc};
use linestrike_core::{Kline, Symbol, Timeframe};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// 스냅샷 CSV 헤더.
const HEADER: &str = "timestamp,open,high,low,close,volume";

/// 캔들 시퀀스를 CSV 스냅샷으로 저장합니다.
///
/// 저장된 행 수를 반환합니다.
pub fn save_snapshot(path: &Path, klines: &[Kline]) -> SnapshotResult<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", HEADER)?;

    for kline in klines {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            kline.open_time.timestamp_millis(),
            kline.open,
            kline.high,
            kline.low,
            kline.close,
            kline.volume,
        )?;
    }

    writer.flush()?;
    debug!(path = %path.display(), rows = klines.len(), "스냅샷 저장 완료");

    Ok(klines.len())
}

/// CSV 스냅샷에서 캔들 시퀀스를 로드합니다.
///
/// 필드 누락이나 숫자가 아닌 값은 `InvalidRow` 오류로 처리합니다.
/// 스캔 전에 정렬이 보장되도록 결과는 타임스탬프 오름차순입니다.
pub fn load_snapshot(
    path: &Path,
    symbol: &Symbol,
    timeframe: Timeframe,
) -> SnapshotResult<Vec<Kline>> {
    let content = std::fs::read_to_string(path)?;
    let mut lines = content.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim() == HEADER => {}
        Some((_, header)) => {
            return Err(SnapshotError::InvalidHeader {
                expected: HEADER.to_string(),
                found: header.trim().to_string(),
            })
        }
        None => {
            return Err(SnapshotError::InvalidHeader {
                expected: HEADER.to_string(),
                found: String::new(),
            })
        }
    }

    let mut klines = Vec::new();

    for (index, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        klines.push(parse_row(line, index + 1, symbol, timeframe)?);
    }

    klines.sort_by_key(|k| k.open_time);
    debug!(path = %path.display(), rows = klines.len(), "스냅샷 로드 완료");

    Ok(klines)
}

/// CSV 행 하나를 Kline으로 파싱합니다.
fn parse_row(
    line: &str,
    line_number: usize,
    symbol: &Symbol,
    timeframe: Timeframe,
) -> SnapshotResult<Kline> {
    let invalid = |reason: String| SnapshotError::InvalidRow {
        line: line_number,
        reason,
    };

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 6 {
        return Err(invalid(format!(
            "expected 6 fields, found {}",
            fields.len()
        )));
    }

    let timestamp = fields[0]
        .parse::<i64>()
        .map_err(|e| invalid(format!("timestamp: {}", e)))?;
    let open_time = DateTime::<Utc>::from_timestamp_millis(timestamp)
        .ok_or_else(|| invalid(format!("timestamp out of range: {}", timestamp)))?;

    let mut decimals = [Decimal::ZERO; 5];
    for (i, name) in ["open", "high", "low", "close", "volume"].iter().enumerate() {
        decimals[i] = fields[i + 1]
            .parse()
            .map_err(|e| invalid(format!("{}: {}", name, e)))?;
    }

    let close_time = open_time + chrono::Duration::seconds(timeframe.as_secs() as i64)
        - chrono::Duration::milliseconds(1);

    Ok(Kline::new(
        symbol.clone(),
        timeframe,
        open_time,
        decimals[0],
        decimals[1],
        decimals[2],
        decimals[3],
        decimals[4],
        close_time,
    ))
}
