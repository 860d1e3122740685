//! Transition decision protocol
//!
//! `PauseCore` owns the interceptor state (pending navigation, bypass flag,
//! active handler, config) and decides every attempted transition:
//!
//! 1. Same page and same fragment: deny (redundant transition)
//! 2. Bypass armed: consume it and allow (our own navigation)
//! 3. Fragment-only change with `allow_bookmarks`: allow
//! 4. No handler: allow
//! 5. Otherwise ask the handler; deny unless it allowed
//!
//! No lock is held while the handler or the router host runs.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use futures::FutureExt;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::sync::watch;

use crate::core::{
    bookmark_only_change, same_page, Location, NavigationTarget, PauseConfig, PauseError,
    PauseResult, TransitionAction,
};
use crate::handler::{
    ArcHandler, DeferredDecision, HandlerOutcome, HandlerResponse, NavigationCapability,
    PendingResolution,
};
use crate::navigation::{BypassFlag, PendingNavigation, PendingNavigationCache};
use crate::router::RouterHost;

pub struct PauseCore {
    host: Arc<dyn RouterHost>,
    config: RwLock<PauseConfig>,
    handler: RwLock<Option<ArcHandler>>,
    pending: PendingNavigationCache,
    bypass: BypassFlag,
}

impl PauseCore {
    pub fn new(host: Arc<dyn RouterHost>, config: PauseConfig) -> Arc<Self> {
        Arc::new(Self {
            host,
            config: RwLock::new(config),
            handler: RwLock::new(None),
            pending: PendingNavigationCache::new(),
            bypass: BypassFlag::new(),
        })
    }

    pub fn host(&self) -> &Arc<dyn RouterHost> {
        &self.host
    }

    pub fn config(&self) -> PauseConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_config(&self, config: PauseConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Currently registered handler
    pub fn handler(&self) -> Option<ArcHandler> {
        self.handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_handler(&self, handler: Option<ArcHandler>) {
        *self.handler.write().unwrap_or_else(PoisonError::into_inner) = handler;
    }

    /// Interception hook entry point; compares against the host's current location
    pub fn before_transition(self: &Arc<Self>, location: &Location, action: TransitionAction) -> bool {
        let previous = self.host.location();
        self.evaluate_transition(location, action, &previous)
    }

    /// Decide whether a transition from `previous` to `location` may commit
    pub fn evaluate_transition(
        self: &Arc<Self>,
        location: &Location,
        action: TransitionAction,
        previous: &Location,
    ) -> bool {
        if same_page(location, previous) && location.fragment == previous.fragment {
            tracing::debug!(location = %location, "Blocked transition to current location");
            return false;
        }

        if self.bypass.consume_if_armed() {
            tracing::debug!(location = %location, action = %action, "Bypassing interception");
            return true;
        }

        if self.config().allow_bookmarks && bookmark_only_change(location, previous) {
            return true;
        }

        let Some(handler) = self.handler() else {
            return true;
        };

        let outcome = self.ask_handler(&handler, location, action);
        tracing::debug!(location = %location, action = %action, outcome = ?outcome, "Handler decided");
        outcome.allows()
    }

    /// Invoke the handler and normalize its response
    ///
    /// The transition is stashed before the call so that `is_paused()` and
    /// `resume()` work from inside the handler.
    pub fn ask_handler(
        self: &Arc<Self>,
        handler: &ArcHandler,
        location: &Location,
        action: TransitionAction,
    ) -> HandlerOutcome {
        self.pending.stash(location.clone(), action);
        let nav = NavigationCapability::new(Arc::clone(self));

        let call = panic::catch_unwind(AssertUnwindSafe(|| handler.call(&nav, location, action)));
        let response = match call {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                let err = PauseError::handler_fault(e.to_string());
                tracing::warn!(location = %location, error = %err, "Allowing navigation");
                HandlerResponse::Allow
            }
            Err(_) => {
                let err = PauseError::handler_fault("handler panicked");
                tracing::warn!(location = %location, error = %err, "Allowing navigation");
                HandlerResponse::Allow
            }
        };

        // The handler already navigated (resume, cancel, push or replace)
        if !self.pending.is_paused() {
            return HandlerOutcome::Deny;
        }

        if nav.pause_requested() {
            return HandlerOutcome::Pause;
        }

        self.interpret(response)
    }

    fn interpret(self: &Arc<Self>, response: HandlerResponse) -> HandlerOutcome {
        match response {
            HandlerResponse::Pause => HandlerOutcome::Pause,
            HandlerResponse::Deferred(decision) => HandlerOutcome::Async(self.settle_later(decision)),
            HandlerResponse::Allow | HandlerResponse::Proceed => {
                self.pending.clear();
                HandlerOutcome::Allow
            }
            HandlerResponse::Deny => {
                self.pending.clear();
                HandlerOutcome::Deny
            }
            HandlerResponse::Unrecognized(value) => {
                self.pending.clear();
                let err = PauseError::MalformedResponse(value.to_string());
                tracing::warn!(error = %err, "Allowing navigation");
                HandlerOutcome::Allow
            }
        }
    }

    /// Resume or cancel once the deferred decision settles
    ///
    /// Acts on whatever is pending at that moment, which may be a newer
    /// transition than the one the decision was made for. A decision that
    /// fails or panics cancels.
    fn settle_later(self: &Arc<Self>, decision: DeferredDecision) -> PendingResolution {
        let (settled_tx, settled_rx) = watch::channel(false);
        let core = Arc::clone(self);

        let settle = async move {
            match AssertUnwindSafe(decision).catch_unwind().await {
                Ok(Ok(Some(false))) => core.cancel(),
                Ok(Ok(_)) => core.resume(),
                Ok(Err(e)) => core.reject_deferred(e.to_string()),
                Err(_) => core.reject_deferred("deferred decision panicked"),
            }
            settled_tx.send_replace(true);
        };

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(settle);
            }
            Err(_) => match fallback_runtime() {
                Some(runtime) => {
                    runtime.spawn(settle);
                }
                None => {
                    std::thread::spawn(move || futures::executor::block_on(settle));
                }
            },
        }

        PendingResolution::new(settled_rx)
    }

    fn reject_deferred(&self, reason: impl Into<String>) {
        let err = PauseError::RejectedDeferred(reason.into());
        tracing::warn!(error = %err, "Cancelling paused navigation");
        self.cancel();
    }

    /// Is a transition currently paused?
    pub fn is_paused(&self) -> bool {
        self.pending.is_paused()
    }

    /// Copy of the paused location, if any
    pub fn paused_location(&self) -> Option<Location> {
        self.pending.paused_location()
    }

    /// Replay the paused transition; no-op when nothing is paused
    pub fn resume(&self) {
        let Some(PendingNavigation { location, action }) = self.pending.take() else {
            return;
        };

        tracing::debug!(location = %location, action = %action, "Resuming navigation");
        self.bypass.arm_once();

        match action {
            // History offsets are opaque, so a multi-step POP resumes as one step back
            TransitionAction::Pop => self.host.go_back(),
            TransitionAction::Push => self.host.push(location.into(), None),
            TransitionAction::Replace => self.host.replace(location.into(), None),
        }
    }

    /// Like `resume`, but reports when nothing was paused
    pub fn try_resume(&self) -> PauseResult<()> {
        if !self.is_paused() {
            return Err(PauseError::NotPaused);
        }
        self.resume();
        Ok(())
    }

    /// Drop the paused transition without navigating
    pub fn cancel(&self) {
        self.pending.clear();
    }

    /// Navigate past the interceptor
    pub fn push(&self, target: impl Into<NavigationTarget>, state: Option<Value>) {
        self.pending.clear();
        self.bypass.arm_once();
        self.host.push(target.into(), state);
    }

    /// Replace the current entry past the interceptor
    pub fn replace(&self, target: impl Into<NavigationTarget>, state: Option<Value>) {
        self.pending.clear();
        self.bypass.arm_once();
        self.host.replace(target.into(), state);
    }

    /// Whether the next interception will be bypassed
    pub fn bypass_armed(&self) -> bool {
        self.bypass.is_armed()
    }
}

/// Runtime for deferred decisions made outside any tokio runtime
///
/// Built on first use and shared, so decisions that use tokio timers, and
/// decisions raised while another one settles, still run to completion.
fn fallback_runtime() -> Option<&'static Runtime> {
    static RUNTIME: OnceLock<Option<Runtime>> = OnceLock::new();

    RUNTIME
        .get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("route-pause-deferred")
                .enable_all()
                .build()
                .map_err(|e| tracing::warn!(error = %e, "Failed to build deferred decision runtime"))
                .ok()
        })
        .as_ref()
}

impl std::fmt::Debug for PauseCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PauseCore")
            .field("config", &self.config())
            .field("has_handler", &self.handler().is_some())
            .field("pending", &self.pending)
            .field("bypass", &self.bypass)
            .finish()
    }
}
