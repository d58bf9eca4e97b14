//! 텔레그램 알림 서비스.
//!
//! Telegram Bot API를 통해 패턴 감지 알림을 전송합니다.

use crate::types::{
    Notification, NotificationError, NotificationEvent, NotificationPriority, NotificationResult,
    NotificationSender,
};
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

/// 텔레그램 알림 전송 설정.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: String,
    /// 메시지를 보낼 채팅 ID
    pub chat_id: String,
    /// 전송 활성화 여부
    pub enabled: bool,
    /// 파싱 모드 (HTML 또는 MarkdownV2)
    pub parse_mode: String,
}

impl TelegramConfig {
    /// 새 텔레그램 설정을 생성합니다.
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            bot_token,
            chat_id,
            enabled: true,
            parse_mode: "HTML".to_string(),
        }
    }

    /// 환경 변수에서 설정을 생성합니다.
    ///
    /// `TELEGRAM_TOKEN`과 `TELEGRAM_CHAT_ID`를 읽습니다.
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").ok()?;
        let enabled = std::env::var("TELEGRAM_ENABLED")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(true);

        Some(Self {
            bot_token,
            chat_id,
            enabled,
            parse_mode: "HTML".to_string(),
        })
    }
}

/// 텔레그램 알림 전송기.
pub struct TelegramSender {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramSender {
    /// 새 텔레그램 전송기를 생성합니다.
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// 환경 변수에서 전송기를 생성합니다.
    pub fn from_env() -> Option<Self> {
        TelegramConfig::from_env().map(Self::new)
    }

    /// 알림을 텔레그램 메시지로 포맷합니다.
    fn format_message(&self, notification: &Notification) -> String {
        let priority_emoji = match notification.priority {
            NotificationPriority::Low => "ℹ️",
            NotificationPriority::Normal => "📊",
            NotificationPriority::High => "⚠️",
            NotificationPriority::Critical => "🚨",
        };

        let content = match &notification.event {
            NotificationEvent::PatternDetected {
                pattern,
                symbol,
                timeframe,
                triggered_at,
            } => {
                format!(
                    "🔔 <b>패턴 감지</b>\n\n\
                     심볼: <code>{symbol}</code>\n\
                     타임프레임: {timeframe}\n\n\
                     {pattern} pattern detected at {}",
                    triggered_at.to_rfc3339()
                )
            }

            NotificationEvent::SystemError {
                error_code,
                message,
            } => {
                format!(
                    "🚨 <b>시스템 오류</b>\n\n\
                     코드: <code>{error_code}</code>\n\
                     메시지: {message}"
                )
            }

            NotificationEvent::Custom { title, message } => {
                format!("{priority_emoji} <b>{title}</b>\n\n{message}")
            }
        };

        let timestamp = notification.timestamp.format("%Y-%m-%d %H:%M:%S UTC");
        format!("{content}\n\n<i>🕐 {timestamp}</i>")
    }

    /// 텔레그램에 원시 메시지를 전송합니다.
    async fn send_message(&self, text: &str) -> NotificationResult<()> {
        let url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.config.bot_token
        );

        let params = serde_json::json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": self.config.parse_mode,
            "disable_web_page_preview": true,
        });

        debug!(
            "Sending Telegram message to chat_id: {}",
            self.config.chat_id
        );

        let response = self
            .client
            .post(&url)
            .json(&params)
            .send()
            .await
            .map_err(NotificationError::NetworkError)?;

        if response.status().is_success() {
            info!("Telegram notification sent successfully");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // 요청 한도 제한 확인
            if status.as_u16() == 429 {
                warn!("Telegram rate limited");
                return Err(NotificationError::RateLimited(60));
            }

            error!("Failed to send Telegram message: {} - {}", status, body);
            Err(NotificationError::SendFailed(format!(
                "HTTP {}: {}",
                status, body
            )))
        }
    }
}

#[async_trait]
impl NotificationSender for TelegramSender {
    async fn send(&self, notification: &Notification) -> NotificationResult<()> {
        if !self.is_enabled() {
            debug!("Telegram notifications are disabled, skipping");
            return Ok(());
        }

        let message = self.format_message(notification);
        self.send_message(&message).await
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.bot_token.is_empty() && !self.config.chat_id.is_empty()
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

/// 여러 전송기를 관리하는 알림 관리자.
pub struct NotificationManager {
    senders: Vec<Box<dyn NotificationSender>>,
}

impl NotificationManager {
    /// 새 알림 관리자를 생성합니다.
    pub fn new() -> Self {
        Self {
            senders: Vec::new(),
        }
    }

    /// 알림 전송기를 추가합니다.
    pub fn add_sender<S: NotificationSender + 'static>(&mut self, sender: S) {
        self.senders.push(Box::new(sender));
    }

    /// 활성화된 전송기가 하나라도 있는지 확인합니다.
    pub fn has_enabled_sender(&self) -> bool {
        self.senders.iter().any(|s| s.is_enabled())
    }

    /// 활성화된 모든 전송기를 통해 알림을 전송합니다.
    pub async fn notify(&self, notification: &Notification) -> NotificationResult<()> {
        let mut last_error = None;

        for sender in &self.senders {
            if sender.is_enabled() {
                if let Err(e) = sender.send(notification).await {
                    error!("Failed to send notification via {}: {}", sender.name(), e);
                    last_error = Some(e);
                }
            }
        }

        if let Some(e) = last_error {
            // 모든 전송기가 실패한 경우에만 에러 반환
            if self.senders.iter().filter(|s| s.is_enabled()).count() == 1 {
                return Err(e);
            }
        }

        Ok(())
    }

    /// 패턴 감지 알림을 전송합니다.
    pub async fn notify_pattern_detected(
        &self,
        pattern: &str,
        symbol: &str,
        timeframe: &str,
        triggered_at: chrono::DateTime<chrono::Utc>,
    ) -> NotificationResult<()> {
        let notification = Notification::new(NotificationEvent::PatternDetected {
            pattern: pattern.to_string(),
            symbol: symbol.to_string(),
            timeframe: timeframe.to_string(),
            triggered_at,
        })
        .with_priority(NotificationPriority::High);

        self.notify(&notification).await
    }

    /// 시스템 오류 알림을 전송합니다.
    pub async fn notify_system_error(
        &self,
        error_code: &str,
        message: &str,
    ) -> NotificationResult<()> {
        let notification = Notification::new(NotificationEvent::SystemError {
            error_code: error_code.to_string(),
            message: message.to_string(),
        })
        .with_priority(NotificationPriority::Critical);

        self.notify(&notification).await
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_format_pattern_detected() {
        let config = TelegramConfig::new("test_token".to_string(), "123456".to_string());
        let sender = TelegramSender::new(config);

        let triggered_at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let notification = Notification::new(NotificationEvent::PatternDetected {
            pattern: "Bearish Three-Line Strike".to_string(),
            symbol: "BTC-USDT".to_string(),
            timeframe: "15m".to_string(),
            triggered_at,
        });

        let message = sender.format_message(&notification);
        assert!(message.contains(&format!(
            "Bearish Three-Line Strike pattern detected at {}",
            triggered_at.to_rfc3339()
        )));
        assert!(message.contains("BTC-USDT"));
        assert!(message.contains("15m"));
    }

    #[test]
    fn test_format_system_error() {
        let config = TelegramConfig::new("test_token".to_string(), "123456".to_string());
        let sender = TelegramSender::new(config);

        let notification = Notification::new(NotificationEvent::SystemError {
            error_code: "FETCH".to_string(),
            message: "connection refused".to_string(),
        });

        let message = sender.format_message(&notification);
        assert!(message.contains("시스템 오류"));
        assert!(message.contains("FETCH"));
    }

    #[test]
    fn test_sender_disabled_without_token() {
        let config = TelegramConfig::new(String::new(), "123456".to_string());
        let sender = TelegramSender::new(config);
        assert!(!sender.is_enabled());

        let mut config = TelegramConfig::new("token".to_string(), "123456".to_string());
        config.enabled = false;
        assert!(!TelegramSender::new(config).is_enabled());
    }

    #[test]
    fn test_manager_without_senders() {
        let manager = NotificationManager::new();
        assert!(!manager.has_enabled_sender());
    }

    #[tokio::test]
    async fn test_manager_notify_without_senders_is_ok() {
        let manager = NotificationManager::new();
        let notification = Notification::new(NotificationEvent::Custom {
            title: "테스트".to_string(),
            message: "내용".to_string(),
        });

        assert!(manager.notify(&notification).await.is_ok());
    }
}
