//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 스냅샷 관련 오류.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 헤더 불일치
    #[error("Invalid header: expected '{expected}', found '{found}'")]
    InvalidHeader { expected: String, found: String },

    /// 잘못된 데이터 행 (필드 누락 또는 숫자 아님)
    #[error("Invalid row at line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
}

/// 스냅샷 작업용 Result 타입.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
