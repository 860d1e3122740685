//! Navigation Handler
//!
//! Contains:
//! - `NavigationHandler` trait - the caller-supplied decision function
//! - `NamedHandler` - a handler with a declared name
//! - `handlers_equivalent` - identity check used when reconciling subscriptions

use std::sync::Arc;

use super::capability::NavigationCapability;
use super::types::HandlerResponse;
use crate::core::{Location, TransitionAction};

/// Trait for navigation decision handlers
///
/// Handlers run synchronously inside the router's interception hook. To decide
/// later, return `HandlerResponse::Deferred` or `HandlerResponse::Pause` and
/// keep a clone of the capability around.
pub trait NavigationHandler: Send + Sync {
    /// Decide what happens to an attempted transition
    fn call(
        &self,
        nav: &NavigationCapability,
        location: &Location,
        action: TransitionAction,
    ) -> anyhow::Result<HandlerResponse>;

    /// Declared name; handlers sharing a name are treated as the same handler
    fn name(&self) -> Option<&str> {
        None
    }
}

/// Implement NavigationHandler for closures (anonymous)
impl<F> NavigationHandler for F
where
    F: Fn(&NavigationCapability, &Location, TransitionAction) -> anyhow::Result<HandlerResponse>
        + Send
        + Sync,
{
    fn call(
        &self,
        nav: &NavigationCapability,
        location: &Location,
        action: TransitionAction,
    ) -> anyhow::Result<HandlerResponse> {
        (self)(nav, location, action)
    }
}

/// Type alias for stored handlers
pub type ArcHandler = Arc<dyn NavigationHandler>;

/// Wrap a closure as a shareable anonymous handler
pub fn arc_handler<F>(f: F) -> ArcHandler
where
    F: Fn(&NavigationCapability, &Location, TransitionAction) -> anyhow::Result<HandlerResponse>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// A closure with a declared name
///
/// Recreating a `NamedHandler` with the same name on every configuration
/// update does not resubscribe the interceptor.
pub struct NamedHandler<F> {
    name: String,
    f: F,
}

impl<F> NamedHandler<F>
where
    F: Fn(&NavigationCapability, &Location, TransitionAction) -> anyhow::Result<HandlerResponse>
        + Send
        + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> NavigationHandler for NamedHandler<F>
where
    F: Fn(&NavigationCapability, &Location, TransitionAction) -> anyhow::Result<HandlerResponse>
        + Send
        + Sync,
{
    fn call(
        &self,
        nav: &NavigationCapability,
        location: &Location,
        action: TransitionAction,
    ) -> anyhow::Result<HandlerResponse> {
        (self.f)(nav, location, action)
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl<F> std::fmt::Debug for NamedHandler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedHandler")
            .field("name", &self.name)
            .finish()
    }
}

/// Same handler by reference, or both named with the same name
///
/// Anonymous handlers are only ever equivalent to themselves.
pub fn handlers_equivalent(a: &ArcHandler, b: &ArcHandler) -> bool {
    if Arc::ptr_eq(a, b) {
        return true;
    }
    matches!((a.name(), b.name()), (Some(x), Some(y)) if x == y)
}
