use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Invalid country code '{code}': {reason}")]
    InvalidCountryCode { code: String, reason: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Country '{code}' not found")]
    NotFound { code: String },

    #[error("Upstream API unavailable: {message}")]
    UpstreamUnavailable { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Expected outcome of a client request, nothing to act on.
    Low,
    /// Bad input from the caller.
    Medium,
    /// Something outside this service is broken.
    High,
    /// Local storage or configuration is broken.
    Critical,
}

impl LookupError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LookupError::NotFound { .. } => ErrorSeverity::Low,
            LookupError::InvalidCountryCode { .. } | LookupError::ValidationError { .. } => {
                ErrorSeverity::Medium
            }
            LookupError::UpstreamUnavailable { .. } => ErrorSeverity::High,
            LookupError::IoError(_)
            | LookupError::SerializationError(_)
            | LookupError::ConfigError { .. }
            | LookupError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn invalid_code(code: impl Into<String>, reason: impl Into<String>) -> Self {
        LookupError::InvalidCountryCode {
            code: code.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
