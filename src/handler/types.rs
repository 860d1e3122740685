//! Handler Types
//!
//! - `HandlerResponse` - what a decision handler returns
//! - `HandlerOutcome` - the normalized result after interpretation
//! - `DeferredDecision` / `PendingResolution` - asynchronous decisions

use std::future::Future;

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use tokio::sync::watch;

/// An asynchronous decision
///
/// Settles to `Ok(Some(false))` to cancel the paused transition; any other
/// `Ok` resumes it and `Err` cancels it.
pub type DeferredDecision = BoxFuture<'static, anyhow::Result<Option<bool>>>;

/// Response returned from a navigation handler
///
/// Conversions cover the usual shapes:
///
/// | From | Response |
/// |------|----------|
/// | `true` | `Allow` |
/// | `false` | `Deny` |
/// | `()` | `Proceed` |
/// | `None::<bool>` | `Pause` |
/// | JSON `null` | `Pause` |
/// | other JSON | `Unrecognized` |
pub enum HandlerResponse {
    /// Let the transition through
    Allow,
    /// Block the transition
    Deny,
    /// Hold the transition until `resume()` or `cancel()`
    Pause,
    /// No opinion; treated like `Allow`
    Proceed,
    /// Hold the transition until the future settles
    Deferred(DeferredDecision),
    /// Anything else; logged and treated like `Allow`
    Unrecognized(Value),
}

impl HandlerResponse {
    /// Wrap a future as a deferred decision
    pub fn deferred<F>(decision: F) -> Self
    where
        F: Future<Output = anyhow::Result<Option<bool>>> + Send + 'static,
    {
        HandlerResponse::Deferred(decision.boxed())
    }
}

impl std::fmt::Debug for HandlerResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerResponse::Allow => write!(f, "Allow"),
            HandlerResponse::Deny => write!(f, "Deny"),
            HandlerResponse::Pause => write!(f, "Pause"),
            HandlerResponse::Proceed => write!(f, "Proceed"),
            HandlerResponse::Deferred(_) => write!(f, "Deferred(..)"),
            HandlerResponse::Unrecognized(value) => write!(f, "Unrecognized({})", value),
        }
    }
}

impl From<bool> for HandlerResponse {
    fn from(allow: bool) -> Self {
        if allow {
            HandlerResponse::Allow
        } else {
            HandlerResponse::Deny
        }
    }
}

impl From<()> for HandlerResponse {
    fn from(_: ()) -> Self {
        HandlerResponse::Proceed
    }
}

impl From<Option<bool>> for HandlerResponse {
    fn from(decision: Option<bool>) -> Self {
        match decision {
            Some(allow) => allow.into(),
            None => HandlerResponse::Pause,
        }
    }
}

impl From<Value> for HandlerResponse {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(allow) => allow.into(),
            Value::Null => HandlerResponse::Pause,
            other => HandlerResponse::Unrecognized(other),
        }
    }
}

/// Handle to a deferred decision that has not necessarily settled yet
#[derive(Debug, Clone)]
pub struct PendingResolution {
    settled: watch::Receiver<bool>,
}

impl PendingResolution {
    pub(crate) fn new(settled: watch::Receiver<bool>) -> Self {
        Self { settled }
    }

    /// Has the decision settled and been applied?
    pub fn is_settled(&self) -> bool {
        *self.settled.borrow()
    }

    /// Wait until the decision has been applied
    pub async fn settled(mut self) {
        // An error means the driver went away; nothing left to wait for
        let _ = self.settled.wait_for(|settled| *settled).await;
    }
}

/// Normalized result of asking the handler
#[derive(Debug, Clone)]
pub enum HandlerOutcome {
    Allow,
    Deny,
    Pause,
    /// Denied now, settled later by a deferred decision
    Async(PendingResolution),
}

impl HandlerOutcome {
    /// Whether the current transition attempt may proceed
    pub fn allows(&self) -> bool {
        matches!(self, HandlerOutcome::Allow)
    }
}
