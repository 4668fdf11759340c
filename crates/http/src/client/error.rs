//! Client error types

use household_core::Role;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The role has no refresh token to exchange
    #[error("No refresh token available for {0}")]
    MissingRefreshToken(Role),

    /// A 401 on a shared endpoint, which belongs to no single role
    #[error("No role to refresh credentials for")]
    UnscopedRefresh,

    /// Exchanging the refresh token failed
    #[error("Token refresh failed: {0}")]
    RefreshFailed(Box<ClientError>),

    /// Reading or writing the session store failed
    #[error("Session error: {0}")]
    Session(#[from] household_core::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status carried by the error, if the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the caller has to log in again
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            Self::MissingRefreshToken(_) | Self::RefreshFailed(_) | Self::UnscopedRefresh
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status() {
        let err = ClientError::from_status(StatusCode::UNAUTHORIZED, "expired".into());
        assert!(matches!(err, ClientError::AuthenticationFailed(ref m) if m == "expired"));
        assert_eq!(err.status(), Some(401));

        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into());
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_refresh_errors_have_no_status() {
        let err = ClientError::RefreshFailed(Box::new(ClientError::AuthenticationFailed(
            "invalid".into(),
        )));
        assert_eq!(err.status(), None);
        assert!(err.is_session_expired());
        assert!(!ClientError::Forbidden(String::new()).is_session_expired());
    }
}
