use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Caller-supplied input rejected before any upstream call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username and password are required")]
    MissingCredentials,

    #[error("percentage must be between {min} and {max}, got {value}")]
    PercentageOutOfRange {
        value: String,
        min: String,
        max: String,
    },
}

/// Classification of a failed call, shared by every transport implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Credentials rejected, or the auth response carried no token.
    Auth,
    /// The upstream could not be reached (connect, timeout, TLS).
    Transport,
    /// The upstream answered with a non-success status.
    UpstreamRejection,
    /// The response body did not have the expected shape.
    DataShape,
    /// A locally computed value could not be sent.
    Validation,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FailureKind::Auth => "auth",
            FailureKind::Transport => "transport",
            FailureKind::UpstreamRejection => "upstream_rejection",
            FailureKind::DataShape => "data_shape",
            FailureKind::Validation => "validation",
        };
        f.write_str(label)
    }
}

/// Errors produced by a transport know which [`FailureKind`] they belong to.
pub trait ClassifyFailure: std::error::Error + Send + Sync + 'static {
    fn kind(&self) -> FailureKind;
}
