use std::fmt;
use thiserror::Error;

/// The `error` and `message` fields the API returns alongside a failing status.
///
/// For JSON object bodies these come from the `error` and `message` keys; for
/// any other body both carry the raw response text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiErrorDetails {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ApiErrorDetails {
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.error.is_empty(), self.message.is_empty()) {
            (true, true) => write!(f, "status {}", self.status),
            (false, true) => write!(f, "status {}: {}", self.status, self.error),
            (true, false) => write!(f, "status {}: {}", self.status, self.message),
            (false, false) if self.error == self.message => {
                write!(f, "status {}: {}", self.status, self.error)
            }
            (false, false) => write!(f, "status {}: {} ({})", self.status, self.error, self.message),
        }
    }
}

#[derive(Error, Debug)]
pub enum SteamWebApiError {
    #[error("Bad request: {0}")]
    BadRequest(ApiErrorDetails),

    #[error("Not authenticated: {0}")]
    NotAuthenticated(ApiErrorDetails),

    #[error("Forbidden: {0}")]
    Forbidden(ApiErrorDetails),

    #[error("Not found: {0}")]
    NotFound(ApiErrorDetails),

    #[error("Rate limited: {0}")]
    RateLimited(ApiErrorDetails),

    #[error("Server error: {0}")]
    ServerError(ApiErrorDetails),

    #[error("API error: {0}")]
    Api(ApiErrorDetails),

    #[error("Unhandled response: {0}")]
    Unhandled(ApiErrorDetails),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Expected a JSON response, got {kind}")]
    UnexpectedBody { kind: &'static str },

    #[error("Invalid Steam ID '{value}': {reason}")]
    InvalidSteamId { value: String, reason: String },

    #[error("Invalid value '{value}' for {kind}")]
    InvalidEnumValue { kind: &'static str, value: String },

    #[error("Cannot parse timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SteamWebApiError {
    /// Details of a failing HTTP response, if this error came from one.
    pub fn details(&self) -> Option<&ApiErrorDetails> {
        match self {
            Self::BadRequest(d)
            | Self::NotAuthenticated(d)
            | Self::Forbidden(d)
            | Self::NotFound(d)
            | Self::RateLimited(d)
            | Self::ServerError(d)
            | Self::Api(d)
            | Self::Unhandled(d) => Some(d),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => self.details().map(|d| d.status),
        }
    }

    pub fn is_http_error(&self) -> bool {
        self.details().is_some() || matches!(self, Self::Http(_))
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RateLimited(_) | Self::Http(_) => ErrorSeverity::Medium,
            Self::ServerError(_) | Self::Unhandled(_) | Self::Io(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NotAuthenticated(_) | Self::Forbidden(_) => {
                "Check that your steamwebapi.com key is valid and allowed to use this endpoint"
            }
            Self::RateLimited(_) => "Wait for the rate limit window to reset and try again",
            Self::ServerError(_) => "The API is having trouble, try again later",
            Self::NotFound(_) => "Check the request path and identifiers",
            Self::BadRequest(_) | Self::Api(_) => "Check the request parameters",
            Self::Http(_) => "Check your network connection and the configured base URL",
            Self::InvalidSteamId { .. } => {
                "Use a SteamID64, STEAM_X:Y:Z, [U:1:N] or a numeric account id"
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::Validation { .. } => "Fix the configuration and run again",
            _ => "See the error message for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, SteamWebApiError>;
