//! # LineStrike Notification
//!
//! 패턴 감지 알림 서비스.
//!
//! 지원 채널:
//! - Telegram

pub mod telegram;
pub mod types;

pub use telegram::*;
pub use types::*;
