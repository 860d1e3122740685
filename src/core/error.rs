//! Route pause error types

use thiserror::Error;

/// Errors surfaced (or logged) by the transition interceptor
///
/// None of these are fatal. The interceptor always degrades toward letting
/// navigation through rather than leaving the application blocked.
#[derive(Error, Debug)]
pub enum PauseError {
    /// The decision handler returned an error or panicked
    #[error("Navigation handler failed: {0}")]
    HandlerFault(String),

    /// The decision handler returned a value outside the recognized set
    #[error("Invalid response from navigation handler: `{0}`. Response should be one of: true, false, null, undefined, deferred")]
    MalformedResponse(String),

    /// A deferred decision settled with an error
    #[error("Deferred navigation decision rejected: {0}")]
    RejectedDeferred(String),

    /// Resume requested while nothing is paused
    #[error("No paused navigation to resume")]
    NotPaused,

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PauseError {
    /// Create a handler fault from any displayable cause
    pub fn handler_fault(msg: impl Into<String>) -> Self {
        PauseError::HandlerFault(msg.into())
    }
}

/// Result type alias for route pause operations
pub type PauseResult<T> = Result<T, PauseError>;
