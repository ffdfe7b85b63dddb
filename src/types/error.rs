//! Error types for the site server

use hyper::StatusCode;

/// Main error type for content and page operations
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A singleton lookup (page, post, provider) matched nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// The content backend answered with a non-success status
    #[error("Backend error fetching {url}: {status}")]
    Backend { url: String, status: u16 },

    /// The content backend could not be reached
    #[error("Backend unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    /// The backend answered but the payload did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SiteError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Backend { .. } => StatusCode::BAD_GATEWAY,
            Self::Unreachable { .. } => StatusCode::BAD_GATEWAY,
            Self::Decode(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this is a lookup miss rather than a transport or data failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Text safe to show visitors; backend URLs and reasons stay in the logs
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound(_) => "Contingut no trobat".to_string(),
            Self::Backend { .. } | Self::Unreachable { .. } | Self::Decode(_) => format!(
                "El servidor de continguts no està disponible ({})",
                self.status_code().as_u16()
            ),
            Self::Config(_) | Self::Internal(_) => format!(
                "Error intern del servidor ({})",
                self.status_code().as_u16()
            ),
        }
    }
}

impl From<std::io::Error> for SiteError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("JSON error: {}", err))
    }
}

impl From<hyper::Error> for SiteError {
    fn from(err: hyper::Error) -> Self {
        Self::Internal(format!("HTTP error: {}", err))
    }
}

/// Result type alias for site operations
pub type Result<T> = std::result::Result<T, SiteError>;
