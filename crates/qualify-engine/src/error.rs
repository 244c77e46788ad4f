//! Error types for the qualification engine

use qualify_domain::ScoringError;
use qualify_llm::LlmError;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single oracle request
///
/// Never escapes a qualification run: the coordinator replaces the failed item
/// with its documented default and logs the error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    /// Transport failure, provider error or refusal
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    /// No answer within the per-call limit
    #[error("Oracle timed out after {0:?}")]
    Timeout(Duration),

    /// An answer that does not parse into the expected shape
    #[error("Malformed oracle response: {0}")]
    MalformedResponse(String),
}

impl From<LlmError> for OracleError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::InvalidResponse(msg) => OracleError::MalformedResponse(msg),
            other => OracleError::Unavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(e: serde_json::Error) -> Self {
        OracleError::MalformedResponse(format!("JSON parse error: {}", e))
    }
}

/// Errors that abort a qualification run or engine construction
#[derive(Error, Debug)]
pub enum QualificationError {
    /// Structural failure of the aggregator
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_mapping() {
        assert!(matches!(
            OracleError::from(LlmError::InvalidResponse("bad".into())),
            OracleError::MalformedResponse(_)
        ));
        assert!(matches!(
            OracleError::from(LlmError::RateLimitExceeded),
            OracleError::Unavailable(_)
        ));
        assert!(matches!(
            OracleError::from(LlmError::Communication("refused".into())),
            OracleError::Unavailable(msg) if msg.contains("refused")
        ));
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        assert!(matches!(OracleError::from(err), OracleError::MalformedResponse(_)));
    }
}
