//! OKX 거래소 커넥터.
//!
//! OKX v5 REST API의 공개 시장 데이터 엔드포인트 구현.
//! API 자격증명이 설정된 경우 요청에 서명을 붙여 인증 사용자용
//! 요청 한도를 적용받습니다. 모의거래 계정도 지원합니다.

use crate::traits::{ExchangeResult, MarketDataProvider};
use crate::ExchangeError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use linestrike_core::{Kline, Symbol, Timeframe};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::Sha256;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error};

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_BASE_URL: &str = "https://www.okx.com";

// ============================================================================
// 설정
// ============================================================================

/// OKX API 자격증명.
///
/// # 보안
/// - `Debug` 구현은 민감 정보를 마스킹합니다.
#[derive(Clone)]
pub struct OkxCredentials {
    /// API 키
    pub api_key: String,
    /// API 시크릿
    pub api_secret: String,
    /// API 패스프레이즈
    pub passphrase: String,
}

impl fmt::Debug for OkxCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked_key = if self.api_key.len() > 8 {
            format!(
                "{}...{}",
                &self.api_key[..4],
                &self.api_key[self.api_key.len() - 4..]
            )
        } else {
            "***REDACTED***".to_string()
        };

        f.debug_struct("OkxCredentials")
            .field("api_key", &masked_key)
            .field("api_secret", &"***REDACTED***")
            .field("passphrase", &"***REDACTED***")
            .finish()
    }
}

/// OKX 클라이언트 설정.
#[derive(Debug, Clone)]
pub struct OkxConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// API 자격증명 (없으면 공개 요청만 수행)
    pub credentials: Option<OkxCredentials>,
    /// 모의거래 계정 사용 (`x-simulated-trading` 헤더)
    pub simulated: bool,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for OkxConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            simulated: false,
            timeout_secs: 30,
        }
    }
}

impl OkxConfig {
    /// 새 설정 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 URL 설정.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 자격증명 설정.
    pub fn with_credentials(mut self, credentials: OkxCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// 모의거래 사용 여부 설정.
    pub fn with_simulated(mut self, simulated: bool) -> Self {
        self.simulated = simulated;
        self
    }

    /// 환경 변수에서 생성.
    ///
    /// `OKX_API_KEY`/`OKX_SECRET`/`OKX_PASS` 세 개가 모두 설정된 경우에만
    /// 자격증명을 포함합니다. `OKX_SIMULATED`는 기본 true(모의거래)입니다.
    pub fn from_env() -> Self {
        let credentials = match (
            std::env::var("OKX_API_KEY"),
            std::env::var("OKX_SECRET"),
            std::env::var("OKX_PASS"),
        ) {
            (Ok(api_key), Ok(api_secret), Ok(passphrase)) => Some(OkxCredentials {
                api_key,
                api_secret,
                passphrase,
            }),
            _ => None,
        };

        let simulated = std::env::var("OKX_SIMULATED")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(true);

        Self {
            base_url: std::env::var("OKX_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            credentials,
            simulated,
            timeout_secs: 30,
        }
    }
}

// ============================================================================
// API 응답 타입
// ============================================================================

/// OKX 공통 응답 래퍼. 에러도 HTTP 200에 `code != "0"`으로 도착합니다.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct OkxResponse<T> {
    code: String,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)] // API 응답 필드 전체 매핑 (일부만 사용)
struct OkxKline(
    String, // 0: 캔들 시작 시각 (epoch ms)
    String, // 1: 시가
    String, // 2: 고가
    String, // 3: 저가
    String, // 4: 종가
    String, // 5: 거래량 (기준 자산)
    String, // 6: 거래량 (통화 환산)
    String, // 7: 거래대금 (호가 통화)
    String, // 8: 캔들 확정 여부
);

// ============================================================================
// 클라이언트
// ============================================================================

/// OKX REST 클라이언트.
pub struct OkxClient {
    config: OkxConfig,
    client: Client,
}

impl OkxClient {
    /// 새 클라이언트 생성.
    pub fn new(config: OkxConfig) -> ExchangeResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExchangeError::Unknown(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// 환경 변수 설정으로 클라이언트 생성.
    pub fn from_env() -> ExchangeResult<Self> {
        Self::new(OkxConfig::from_env())
    }

    /// 요청 서명 생성.
    ///
    /// OKX 규격: `timestamp + method + requestPath`를 HMAC-SHA256으로
    /// 서명한 뒤 base64로 인코딩합니다.
    fn sign(credentials: &OkxCredentials, timestamp: &str, method: &str, request_path: &str) -> String {
        let prehash = format!("{}{}{}", timestamp, method, request_path);
        let mut mac = HmacSha256::new_from_slice(credentials.api_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(prehash.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }

    /// 파라미터에서 쿼리 문자열 생성.
    fn build_query(params: &[(&str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// 시장 데이터 GET 요청.
    ///
    /// 자격증명이 있으면 `OK-ACCESS-*` 헤더를 붙입니다. 시장 데이터
    /// 엔드포인트는 인증 없이도 동작하지만 인증 시 요청 한도가 높습니다.
    async fn market_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ExchangeResult<Vec<T>> {
        let query = Self::build_query(params);
        let request_path = if query.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, query)
        };
        let full_url = format!("{}{}", self.config.base_url, request_path);

        debug!("GET {}", full_url);

        let mut request = self.client.get(&full_url);

        if let Some(credentials) = &self.config.credentials {
            let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
            let signature = Self::sign(credentials, &timestamp, "GET", &request_path);
            request = request
                .header("OK-ACCESS-KEY", &credentials.api_key)
                .header("OK-ACCESS-SIGN", signature)
                .header("OK-ACCESS-TIMESTAMP", timestamp)
                .header("OK-ACCESS-PASSPHRASE", &credentials.passphrase);
        }

        if self.config.simulated {
            request = request.header("x-simulated-trading", "1");
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkError(e.to_string()))?;

        self.handle_response(response).await
    }

    /// API 응답 처리.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ExchangeResult<Vec<T>> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(ExchangeError::ApiError {
                code: status.as_u16() as i32,
                message: body,
            });
        }

        let envelope: OkxResponse<T> = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse response: {} - Body: {}", e, body);
            ExchangeError::ParseError(e.to_string())
        })?;

        if envelope.code != "0" {
            let code = envelope.code.parse::<i32>().unwrap_or(-1);
            return Err(Self::map_error_code(code, &envelope.msg));
        }

        Ok(envelope.data)
    }

    /// OKX 에러 코드를 ExchangeError로 매핑.
    fn map_error_code(code: i32, msg: &str) -> ExchangeError {
        match code {
            50011 => ExchangeError::RateLimited,
            50102 => ExchangeError::TimestampError(msg.to_string()),
            50111 | 50113 => ExchangeError::Unauthorized(msg.to_string()),
            51001 => ExchangeError::SymbolNotFound(msg.to_string()),
            _ => ExchangeError::ApiError {
                code,
                message: msg.to_string(),
            },
        }
    }

    /// 문자열에서 Decimal 파싱.
    fn parse_decimal(s: &str) -> Decimal {
        s.parse().unwrap_or(Decimal::ZERO)
    }

    /// OKX 캔들 행을 Kline으로 변환.
    fn to_kline(row: OkxKline, symbol: &Symbol, timeframe: Timeframe) -> Kline {
        let open_time = row
            .0
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or_else(Utc::now);
        let close_time = open_time + chrono::Duration::seconds(timeframe.as_secs() as i64)
            - chrono::Duration::milliseconds(1);

        let mut kline = Kline::new(
            symbol.clone(),
            timeframe,
            open_time,
            Self::parse_decimal(&row.1),
            Self::parse_decimal(&row.2),
            Self::parse_decimal(&row.3),
            Self::parse_decimal(&row.4),
            Self::parse_decimal(&row.5),
            close_time,
        );
        kline.quote_volume = Some(Self::parse_decimal(&row.7));
        kline
    }
}

#[async_trait]
impl MarketDataProvider for OkxClient {
    fn name(&self) -> &str {
        "OKX"
    }

    async fn get_klines(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        limit: Option<u32>,
    ) -> ExchangeResult<Vec<Kline>> {
        let rows: Vec<OkxKline> = self
            .market_get(
                "/api/v5/market/history-candles",
                &[
                    ("instId", symbol.to_inst_id()),
                    ("bar", timeframe.to_okx_bar().to_string()),
                    ("limit", limit.unwrap_or(100).to_string()),
                ],
            )
            .await?;

        // OKX는 최신 캔들부터 반환하므로 과거 → 현재 순으로 뒤집는다
        let mut klines: Vec<Kline> = rows
            .into_iter()
            .map(|row| Self::to_kline(row, symbol, timeframe))
            .collect();
        klines.reverse();

        Ok(klines)
    }
}
