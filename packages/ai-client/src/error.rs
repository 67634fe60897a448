//! Error types for the chat client.

use thiserror::Error;

/// Result type for chat client operations.
pub type Result<T> = std::result::Result<T, AiError>;

/// Chat client errors.
#[derive(Debug, Error)]
pub enum AiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection refused, DNS, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Non-2xx response from the provider
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the chat completion shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl AiError {
    /// Whether a second attempt has a reasonable chance of succeeding.
    ///
    /// Client-side 4xx errors (bad key, bad request) are not retried,
    /// except for 429.
    pub fn is_retryable(&self) -> bool {
        match self {
            AiError::Network(_) | AiError::Timeout(_) | AiError::Parse(_) => true,
            AiError::Api { status, .. } => *status == 429 || *status >= 500,
            AiError::Config(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> AiError {
        AiError::Api {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_retryable_classification() {
        assert!(AiError::Network("reset".into()).is_retryable());
        assert!(AiError::Timeout(30).is_retryable());
        assert!(api(503).is_retryable());
        assert!(api(429).is_retryable());
        assert!(!api(401).is_retryable());
        assert!(!AiError::Config("missing key".into()).is_retryable());
    }
}
