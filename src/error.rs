//! Error taxonomy for log-line parsing.
//!
//! Every failure inside [`LogParser::append`](crate::engine::LogParser::append)
//! is recovered locally: the error is recorded on the engine and the call
//! returns normally. Callers inspect `error_num()` / `error_text()` after
//! each append instead of catching anything.

use thiserror::Error;

/// Errors that can occur while parsing a log line or converting its fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line did not match the configured grammar, or a capture failed
    /// numeric/address conversion.
    #[error("parser failed: badly formatted input")]
    ParserFailed,

    #[error("invalid timestamp")]
    InvalidTimestamp,

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid time: {0}")]
    InvalidTime(String),

    #[error("timestamp and/or IP address is wrong")]
    InvalidTimestampOrIp,
}

impl ParseError {
    /// Stable numeric code for host collaborators that key on error numbers.
    /// `0` is reserved for "no error".
    pub fn code(&self) -> u32 {
        match self {
            ParseError::ParserFailed => 1,
            ParseError::InvalidTimestamp => 2,
            ParseError::InvalidDate(_) => 3,
            ParseError::InvalidTime(_) => 4,
            ParseError::InvalidTimestampOrIp => 5,
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_and_nonzero() {
        let all = [
            ParseError::ParserFailed,
            ParseError::InvalidTimestamp,
            ParseError::InvalidDate("x".into()),
            ParseError::InvalidTime("x".into()),
            ParseError::InvalidTimestampOrIp,
        ];
        let mut codes: Vec<u32> = all.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
        assert!(codes.iter().all(|&c| c != 0));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(
            ParseError::ParserFailed.to_string(),
            "parser failed: badly formatted input"
        );
        assert_eq!(
            ParseError::InvalidDate("32/Jan/2022".into()).to_string(),
            "invalid date: 32/Jan/2022"
        );
    }
}
