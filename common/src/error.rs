//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input `{0}`, please use `y`, `n` or `q` (default: `y`)")]
    InvalidAnswer(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_answer() {
        let error = Error::InvalidAnswer("maybe".to_string());
        let display = format!("{}", error);
        assert!(display.contains("`maybe`"));
        assert!(display.contains("default: `y`"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidAnswer("x".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidAnswer"));
    }
}
