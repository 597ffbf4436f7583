use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoleCheckError {
    #[error("Network error: {status}")]
    Network { status: u16 },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("CSRF token cannot be sent as a header value: {0}")]
    InvalidToken(#[from] InvalidHeaderValue),

    #[error("Failed to deserialize role check response: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl RoleCheckError {
    /// Returns the HTTP status carried by a `Network` error
    pub fn status(&self) -> Option<u16> {
        match self {
            RoleCheckError::Network { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display() {
        let err = RoleCheckError::Network { status: 403 };
        assert_eq!(err.to_string(), "Network error: 403");
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_status_only_for_network_errors() {
        let err = RoleCheckError::from(url::ParseError::EmptyHost);
        assert_eq!(err.status(), None);
    }
}
