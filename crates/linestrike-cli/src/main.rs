//! LineStrike pattern watcher CLI.

use clap::{Parser, Subcommand};
use linestrike_cli::{commands, WatchConfig};
use linestrike_core::logging::{init_logging, LogConfig};
use linestrike_core::{Symbol, Timeframe};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linestrike")]
#[command(about = "Bearish Three-Line Strike pattern watcher", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 실시간 감시: 주기적으로 캔들을 조회해 패턴 감지 시 알림 전송
    Watch {
        /// 감시할 심볼 (예: BTC-USDT)
        #[arg(long, short)]
        symbol: Option<Symbol>,

        /// 캔들 bar (예: 15m, 1H, 1D)
        #[arg(long, short)]
        bar: Option<Timeframe>,

        /// 사이클당 조회 캔들 수
        #[arg(long)]
        limit: Option<u32>,

        /// 조회 주기 (분, 기본: bar 길이)
        #[arg(long)]
        interval_minutes: Option<u64>,
    },

    /// 스냅샷 리플레이: CSV 스냅샷을 스캔해 시그널 시각 출력
    Backtest {
        /// 스냅샷 CSV 경로
        #[arg(long, short, default_value = "candlestick_data.csv")]
        file: PathBuf,

        /// 스냅샷의 심볼 (예: BTC-USDT)
        #[arg(long, short, default_value = "BTC-USDT")]
        symbol: Symbol,

        /// 스냅샷의 캔들 bar (예: 15m)
        #[arg(long, short, default_value = "15m")]
        bar: Timeframe,
    },

    /// 스냅샷 캡처: 캔들을 조회해 CSV 스냅샷으로 저장
    Download {
        /// 출력 CSV 경로
        #[arg(long, short, default_value = "candlestick_data.csv")]
        output: PathBuf,

        /// 조회할 심볼 (예: BTC-USDT)
        #[arg(long, short, default_value = "BTC-USDT")]
        symbol: Symbol,

        /// 캔들 bar (예: 15m)
        #[arg(long, short, default_value = "15m")]
        bar: Timeframe,

        /// 조회 캔들 수
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 로깅 초기화
    init_logging(LogConfig::new(cli.log_level))?;

    tracing::info!("LineStrike 시작");

    match cli.command {
        Commands::Watch {
            symbol,
            bar,
            limit,
            interval_minutes,
        } => {
            // CLI 인자가 환경변수 설정보다 우선
            let mut config = WatchConfig::from_env();
            if let Some(symbol) = symbol {
                config.symbol = symbol;
            }
            if let Some(bar) = bar {
                config.timeframe = bar;
                if interval_minutes.is_none()
                    && std::env::var("WATCH_INTERVAL_MINUTES").is_err()
                {
                    config.interval_minutes = bar.as_minutes();
                }
            }
            if let Some(limit) = limit {
                config.limit = limit;
            }
            if let Some(interval_minutes) = interval_minutes {
                config.interval_minutes = interval_minutes;
            }

            commands::watch::run(config).await?;
        }
        Commands::Backtest { file, symbol, bar } => {
            commands::backtest::run(&file, &symbol, bar)?;
        }
        Commands::Download {
            output,
            symbol,
            bar,
            limit,
        } => {
            commands::download::run(&output, &symbol, bar, limit).await?;
        }
    }

    tracing::info!("LineStrike 종료");

    Ok(())
}
