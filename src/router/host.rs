//! Router host contract

use std::sync::Arc;

use serde_json::Value;

use crate::core::{Location, NavigationTarget, TransitionAction};

/// Callback fired before a transition commits; returning false blocks it
pub type Interceptor = Arc<dyn Fn(&Location, TransitionAction) -> bool + Send + Sync>;

/// Detaches an interceptor when called
pub struct Unsubscribe(Box<dyn FnOnce() + Send>);

impl Unsubscribe {
    pub fn new<F: FnOnce() + Send + 'static>(f: F) -> Self {
        Self(Box::new(f))
    }

    pub fn call(self) {
        (self.0)()
    }
}

impl std::fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Unsubscribe")
    }
}

/// The routing library the interceptor plugs into
///
/// Implementations must not hold internal locks while invoking interceptors:
/// a handler may navigate from inside the interception hook.
pub trait RouterHost: Send + Sync {
    /// Location currently committed
    fn location(&self) -> Location;

    /// Register an interceptor that runs before every transition
    fn subscribe(&self, interceptor: Interceptor) -> Unsubscribe;

    /// Single step back through history
    fn go_back(&self);

    /// Push a new entry; `state`, when given, replaces the target's state
    fn push(&self, target: NavigationTarget, state: Option<Value>);

    /// Replace the current entry; `state`, when given, replaces the target's state
    fn replace(&self, target: NavigationTarget, state: Option<Value>);
}
