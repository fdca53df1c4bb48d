//! Error types for the auth hooks

use thiserror::Error;

/// Message shown to the end user when a sign-in attempt fails.
///
/// Deliberately generic; internal error detail stays in the logs.
pub const SIGN_IN_FAILED_MESSAGE: &str = "sign-in failed";

#[derive(Error, Debug)]
pub enum HookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transient upstream error: {0}")]
    TransientNetwork(String),

    #[error("Upstream rejected request with status {0}")]
    UpstreamRejected(reqwest::StatusCode),

    #[error("Malformed upstream profile: {0}")]
    MalformedProfile(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl HookError {
    /// Whether a retry may succeed. Only network-level failures and
    /// upstream 5xx responses qualify; a 4xx means the token or request
    /// itself is bad and retrying cannot help. Timeout and connect errors
    /// are classified into `TransientNetwork` at the fetch site.
    pub fn is_retryable(&self) -> bool {
        match self {
            HookError::TransientNetwork(_) => true,
            HookError::UpstreamRejected(status) => status.is_server_error(),
            _ => false,
        }
    }

    /// End-user facing message. Never leaks internal error detail.
    pub fn user_message(&self) -> &'static str {
        SIGN_IN_FAILED_MESSAGE
    }
}

pub type Result<T> = std::result::Result<T, HookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(HookError::TransientNetwork("connection reset".to_string()).is_retryable());
        assert!(
            HookError::UpstreamRejected(reqwest::StatusCode::INTERNAL_SERVER_ERROR).is_retryable()
        );
        assert!(!HookError::UpstreamRejected(reqwest::StatusCode::UNAUTHORIZED).is_retryable());
        assert!(!HookError::MalformedProfile("missing id".to_string()).is_retryable());
        assert!(!HookError::Config("bad base url".to_string()).is_retryable());

        let json_err: HookError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(!json_err.is_retryable());
    }

    #[test]
    fn test_user_message_is_generic() {
        let err = HookError::UpstreamRejected(reqwest::StatusCode::FORBIDDEN);
        assert_eq!(err.user_message(), SIGN_IN_FAILED_MESSAGE);
        assert!(!err.user_message().contains("403"));
    }
}
