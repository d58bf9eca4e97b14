//! 실시간 감시 명령어.
//!
//! 주기적으로 OKX에서 최근 캔들을 조회해 약세 삼선격침 패턴을 스캔하고,
//! 감지된 시그널마다 텔레그램 알림을 전송합니다.
//!
//! 사이클마다 조회 윈도우 전체를 다시 스캔하며, 이전 사이클에서 보낸
//! 시그널을 기억하지 않습니다. 윈도우가 겹치면 같은 패턴이 다시
//! 알림될 수 있습니다.

use crate::{WatchConfig, WatchStats};
use anyhow::Result;
use linestrike_exchange::{MarketDataProvider, OkxClient};
use linestrike_notification::{NotificationManager, TelegramSender};
use linestrike_pattern::ThreeLineStrike;
use tracing::{error, info, warn};

/// 알림 메시지에 사용되는 패턴 이름.
pub const PATTERN_NAME: &str = "Bearish Three-Line Strike";

/// 감시 루프 실행.
///
/// `ctrl_c` 수신 시까지 설정된 주기로 사이클을 반복합니다.
pub async fn run(config: WatchConfig) -> Result<()> {
    let client = OkxClient::from_env()?;
    let scanner = ThreeLineStrike::new();

    let mut notifier = NotificationManager::new();
    if let Some(sender) = TelegramSender::from_env() {
        notifier.add_sender(sender);
    }
    if !notifier.has_enabled_sender() {
        warn!("텔레그램 설정이 없어 시그널을 로그로만 출력합니다");
    }

    info!(
        symbol = %config.symbol,
        bar = %config.timeframe,
        limit = config.limit,
        interval_minutes = config.interval_minutes,
        "감시 시작"
    );

    let mut stats = WatchStats::new();
    let mut interval = tokio::time::interval(config.interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("종료 신호 수신, 감시 종료 중...");
                break;
            }
            _ = interval.tick() => {
                run_cycle(&client, &scanner, &notifier, &config, &mut stats).await;
                stats.log_summary("감시");
            }
        }
    }

    Ok(())
}

/// 감시 사이클 하나 실행: 조회 → 스캔 → 알림.
///
/// 조회 실패는 로그 후 이번 사이클을 건너뜁니다. 스캐너로 전파되는
/// 에러는 없습니다.
async fn run_cycle(
    client: &OkxClient,
    scanner: &ThreeLineStrike,
    notifier: &NotificationManager,
    config: &WatchConfig,
    stats: &mut WatchStats,
) {
    stats.cycles += 1;

    let klines = match client
        .get_klines(&config.symbol, config.timeframe, Some(config.limit))
        .await
    {
        Ok(klines) if !klines.is_empty() => klines,
        Ok(_) => {
            warn!(symbol = %config.symbol, "조회된 캔들이 없습니다");
            return;
        }
        Err(e) => {
            stats.fetch_errors += 1;
            error!(
                symbol = %config.symbol,
                error = %e,
                retryable = e.is_retryable(),
                "캔들 조회 실패, 이번 사이클 건너뜀"
            );
            return;
        }
    };
    stats.fetched_klines += klines.len();

    let signals = scanner.scan(&klines);
    if signals.is_empty() {
        info!(klines = klines.len(), "시그널 없음");
        return;
    }

    for signal in signals {
        stats.signals += 1;
        info!(triggered_at = %signal, "패턴 감지");

        if notifier.has_enabled_sender() {
            if let Err(e) = notifier
                .notify_pattern_detected(
                    PATTERN_NAME,
                    &config.symbol.to_inst_id(),
                    config.timeframe.to_okx_bar(),
                    signal.triggered_at,
                )
                .await
            {
                stats.notify_errors += 1;
                error!(error = %e, "알림 전송 실패");
            }
        }
    }
}
