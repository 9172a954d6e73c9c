//! Common Error Types
//!
//! Unified error handling for manifest loads.

use crate::manifest::ValidationError;

/// Failure reported by a manifest provider.
///
/// Propagated verbatim to the caller of a load; the engine never retries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// Non-2xx response carrying the backend's `{error:{code,message}}` envelope
    #[error("HTTP {status} {code}: {message}")]
    Status {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("I/O failure: {0}")]
    Io(String),

    #[error("Manifest not found: {0}")]
    NotFound(String),
}

impl ProviderError {
    /// Stable error code, for callers that branch on error kind
    pub fn code(&self) -> &str {
        match self {
            Self::Status { code, .. } => code,
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }
}

/// Engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Issues carried by a structural validation failure, if this is one
    pub fn validation_issues(&self) -> Option<&[crate::manifest::ValidationIssue]> {
        match self {
            Self::Validation(e) => Some(e.issues.as_slice()),
            _ => None,
        }
    }
}
