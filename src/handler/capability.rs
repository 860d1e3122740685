//! Navigation capability handed to handlers
//!
//! Every method closes over the owning interceptor, so a clone kept past the
//! handler call (e.g. moved into a dialog callback) still works.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::core::{Location, NavigationTarget};
use crate::pause::PauseCore;

#[derive(Clone)]
pub struct NavigationCapability {
    core: Arc<PauseCore>,
    pause_requested: Arc<AtomicBool>,
}

impl NavigationCapability {
    pub(crate) fn new(core: Arc<PauseCore>) -> Self {
        Self {
            core,
            pause_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Is a transition currently paused?
    pub fn is_paused(&self) -> bool {
        self.core.is_paused()
    }

    /// Copy of the paused location, if any
    pub fn paused_location(&self) -> Option<Location> {
        self.core.paused_location()
    }

    /// Replay the paused transition
    pub fn resume(&self) {
        self.core.resume();
    }

    /// Drop the paused transition
    pub fn cancel(&self) {
        self.core.cancel();
    }

    /// Navigate without being intercepted
    pub fn push(&self, target: impl Into<NavigationTarget>, state: Option<Value>) {
        self.core.push(target, state);
    }

    /// Replace the current entry without being intercepted
    pub fn replace(&self, target: impl Into<NavigationTarget>, state: Option<Value>) {
        self.core.replace(target, state);
    }

    /// Pause the transition regardless of what the handler returns
    pub fn pause(&self) {
        self.pause_requested.store(true, Ordering::SeqCst);
    }

    pub(crate) fn pause_requested(&self) -> bool {
        self.pause_requested.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for NavigationCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationCapability")
            .field("is_paused", &self.is_paused())
            .field("pause_requested", &self.pause_requested())
            .finish()
    }
}
