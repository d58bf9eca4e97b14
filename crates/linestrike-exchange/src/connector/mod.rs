//! 거래소별 커넥터 구현.

pub mod okx;

pub use okx::{OkxClient, OkxConfig, OkxCredentials};
