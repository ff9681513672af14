use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Rejection reasons for a user-supplied directive.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("Directive cannot be empty")]
    Empty,
}

/// Failure surfaced by a capability implementation.
///
/// The pipeline never propagates these; it converts them into degraded
/// [`crate::Outcome`]s and keeps going.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("{capability} request failed: {message}")]
    Request {
        capability: &'static str,
        message: String,
    },

    #[error("{capability} returned HTTP {status}")]
    Status { capability: &'static str, status: u16 },

    #[error("{capability} timed out")]
    Timeout { capability: &'static str },

    #[error("malformed {capability} response: {message}")]
    Malformed {
        capability: &'static str,
        message: String,
    },
}
