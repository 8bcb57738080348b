//! Error types for API communication.
//!
//! Every store operation returns `Result` for expected failures; callers
//! branch on the error rather than catching panics. The server's own
//! message is carried through for business-rule rejections so the UI can
//! show it verbatim.

use thiserror::Error;

/// Errors that can occur when talking to the Saffron API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, TLS).
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The request exceeded the configured client-side timeout.
    #[error("Request timed out")]
    Timeout,

    /// The server rejected the request; carries the server's message.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the response envelope, or a generic fallback.
        message: String,
    },

    /// The session is no longer valid; the token has been cleared.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response envelope carried no data where data was required.
    #[error("No data in response")]
    MissingData,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

impl ApiError {
    /// A message suitable for showing to the customer.
    ///
    /// Business-rule rejections surface the server's own text; transport
    /// failures and timeouts get a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Unauthorized(message) => message.clone(),
            Self::Timeout => "The request timed out. Please try again.".to_string(),
            Self::Http(_) | Self::Parse(_) | Self::MissingData => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }

    /// Whether this error means the session was torn down.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_surfaces_server_message() {
        let err = ApiError::Api {
            status: 400,
            message: "Coupon expired".to_string(),
        };
        assert_eq!(err.to_string(), "Coupon expired");
        assert_eq!(err.user_message(), "Coupon expired");
    }

    #[test]
    fn test_timeout_gets_generic_message() {
        let err = ApiError::Timeout;
        assert_eq!(err.user_message(), "The request timed out. Please try again.");
    }

    #[test]
    fn test_unauthorized_flag() {
        assert!(ApiError::Unauthorized("expired".to_string()).is_unauthorized());
        assert!(!ApiError::Timeout.is_unauthorized());
    }
}
