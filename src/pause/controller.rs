//! Subscription controller
//!
//! `RouterPause` is the long-lived object an application holds. Each call to
//! `update()` reconciles the router subscription with the latest props:
//!
//! | Current | Props | Result |
//! |---------|-------|--------|
//! | any | `when == false` | detach |
//! | unsubscribed | no handler | nothing |
//! | subscribed | no handler | detach |
//! | unsubscribed | handler | attach |
//! | subscribed | equivalent handler | nothing |
//! | subscribed | different handler | detach, then attach |

use std::sync::Arc;

use serde_json::Value;

use super::protocol::PauseCore;
use crate::core::{Location, NavigationTarget, PauseConfig, TransitionAction};
use crate::handler::{
    handlers_equivalent, ArcHandler, HandlerResponse, NamedHandler, NavigationCapability,
};
use crate::router::{Interceptor, RouterHost, Unsubscribe};

/// Inputs reconciled on every update
#[derive(Clone)]
pub struct PauseProps {
    /// Decision handler; no handler means no interception
    pub handler: Option<ArcHandler>,

    /// Set to false to detach without dropping the handler
    pub when: bool,

    pub config: PauseConfig,
}

impl Default for PauseProps {
    fn default() -> Self {
        Self {
            handler: None,
            when: true,
            config: PauseConfig::default(),
        }
    }
}

impl PauseProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an anonymous closure as the handler
    pub fn with_handler<F>(self, f: F) -> Self
    where
        F: Fn(&NavigationCapability, &Location, TransitionAction) -> anyhow::Result<HandlerResponse>
            + Send
            + Sync
            + 'static,
    {
        self.with_arc_handler(Arc::new(f))
    }

    /// Use a named closure as the handler
    pub fn with_named_handler<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&NavigationCapability, &Location, TransitionAction) -> anyhow::Result<HandlerResponse>
            + Send
            + Sync
            + 'static,
    {
        self.with_arc_handler(Arc::new(NamedHandler::new(name, f)))
    }

    pub fn with_arc_handler(mut self, handler: ArcHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn with_when(mut self, when: bool) -> Self {
        self.when = when;
        self
    }

    pub fn with_config(mut self, config: PauseConfig) -> Self {
        self.config = config;
        self
    }
}

impl std::fmt::Debug for PauseProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PauseProps")
            .field("handler", &self.handler.as_ref().map(|h| h.name().unwrap_or("<anonymous>")))
            .field("when", &self.when)
            .field("config", &self.config)
            .finish()
    }
}

/// Pauses route transitions for a router host
///
/// ```ignore
/// let history = MemoryHistory::new("/");
/// let mut pause = RouterPause::mount(history.clone(), PauseProps::new()
///     .with_named_handler("confirm_leave", |_nav, _location, _action| Ok(HandlerResponse::Pause)));
///
/// history.push("/next".into(), None);   // paused
/// pause.navigation().resume();          // now at /next
/// ```
pub struct RouterPause {
    core: Arc<PauseCore>,
    unsubscribe: Option<Unsubscribe>,
}

impl RouterPause {
    /// Create an unsubscribed controller
    pub fn new(host: Arc<dyn RouterHost>) -> Self {
        Self {
            core: PauseCore::new(host, PauseConfig::default()),
            unsubscribe: None,
        }
    }

    /// Create a controller and apply the initial props
    pub fn mount(host: Arc<dyn RouterHost>, props: PauseProps) -> Self {
        let mut pause = Self::new(host);
        pause.update(props);
        pause
    }

    /// Reconcile the subscription with new props
    pub fn update(&mut self, props: PauseProps) {
        self.core.set_config(props.config);

        if !props.when {
            self.detach();
            return;
        }

        match (self.core.handler(), props.handler) {
            (None, None) => {}
            (Some(_), None) => self.detach(),
            (None, Some(next)) => self.attach(next),
            (Some(prev), Some(next)) => {
                if !handlers_equivalent(&prev, &next) {
                    self.attach(next);
                }
            }
        }
    }

    fn attach(&mut self, handler: ArcHandler) {
        self.detach();

        tracing::debug!(handler = handler.name().unwrap_or("<anonymous>"), "Subscribing interceptor");
        self.core.set_handler(Some(handler));

        let core = Arc::downgrade(&self.core);
        let interceptor: Interceptor = Arc::new(move |location: &Location, action: TransitionAction| {
            match core.upgrade() {
                Some(core) => core.before_transition(location, action),
                None => true,
            }
        });
        self.unsubscribe = Some(self.core.host().subscribe(interceptor));
    }

    fn detach(&mut self) {
        self.core.set_handler(None);
        if let Some(unsubscribe) = self.unsubscribe.take() {
            tracing::debug!("Unsubscribing interceptor");
            unsubscribe.call();
        }
    }

    /// Detach from the router host
    pub fn teardown(&mut self) {
        self.detach();
    }

    /// Is the interceptor subscribed?
    pub fn is_blocking(&self) -> bool {
        self.unsubscribe.is_some()
    }

    /// Capability for driving paused navigation from outside a handler
    pub fn navigation(&self) -> NavigationCapability {
        NavigationCapability::new(Arc::clone(&self.core))
    }

    pub fn core(&self) -> &Arc<PauseCore> {
        &self.core
    }

    pub fn is_paused(&self) -> bool {
        self.core.is_paused()
    }

    pub fn paused_location(&self) -> Option<Location> {
        self.core.paused_location()
    }

    pub fn resume(&self) {
        self.core.resume();
    }

    pub fn cancel(&self) {
        self.core.cancel();
    }

    pub fn push(&self, target: impl Into<NavigationTarget>, state: Option<Value>) {
        self.core.push(target, state);
    }

    pub fn replace(&self, target: impl Into<NavigationTarget>, state: Option<Value>) {
        self.core.replace(target, state);
    }
}

impl Drop for RouterPause {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for RouterPause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterPause")
            .field("core", &self.core)
            .field("blocking", &self.is_blocking())
            .finish()
    }
}
