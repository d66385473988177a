//! Error types for the dbt Cloud client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the dbt Cloud API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response (DNS, connect, timeout, reset)
    #[error("Network error: {message}")]
    Transient {
        /// Description of the failure
        message: String,
        /// Underlying transport error, when one exists
        #[source]
        source: Option<reqwest::Error>,
    },

    /// API rejected the credentials (401/403)
    #[error("Authentication failed (status {status}): {message}")]
    Unauthorized {
        /// HTTP status code
        status: u16,
        /// Error body returned by the API
        message: String,
    },

    /// API returned any other non-success status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error body returned by the API
        message: String,
    },

    /// Response body was not the expected JSON envelope
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an error from a non-success status code and response body
    ///
    /// 401 and 403 become [`ClientError::Unauthorized`], everything else
    /// [`ClientError::ApiError`].
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized { status, message },
            _ => Self::ApiError { status, message },
        }
    }

    /// Create a network error that has no underlying transport error
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
            source: None,
        }
    }

    /// Check if this is an authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Check if a later attempt may succeed
    ///
    /// Network failures, unparseable bodies, rate limiting and 5xx responses
    /// are retryable. Authentication failures and other 4xx responses are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transient { .. } | Self::ParseError(_) => true,
            Self::ApiError { status: 429, .. } => true,
            Self::ApiError { .. } => self.is_server_error(),
            Self::Unauthorized { .. } => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::Transient {
                message: err.to_string(),
                source: Some(err),
            }
        }
    }
}
