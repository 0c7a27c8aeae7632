//! Error types for memoshare
//!
//! All errors use thiserror for structured error handling.
//! Page handlers turn any of these into the generic error page.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("备忘录不存在: {0}")]
    MemoNotFound(i64),

    #[error("标签不存在: {0}")]
    TagNotFound(String),

    #[error("用户不存在: {0}")]
    UserNotFound(i64),

    #[error("{0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        assert_eq!(AppError::MemoNotFound(7).to_string(), "备忘录不存在: 7");
        assert_eq!(
            AppError::TagNotFound("rust".to_string()).to_string(),
            "标签不存在: rust"
        );
        assert_eq!(AppError::Generic("boom".to_string()).to_string(), "boom");
    }
}
