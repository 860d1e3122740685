//! Pending navigation cache
//!
//! Holds the single transition that is currently paused. Shared between the
//! interceptor, the capability handed to handlers, and deferred decisions, so
//! the slot lives behind a mutex and every method takes `&self`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::core::{Location, TransitionAction};

/// A transition held until resumed or cancelled
#[derive(Debug, Clone, PartialEq)]
pub struct PendingNavigation {
    pub location: Location,
    pub action: TransitionAction,
}

/// Holds at most one paused transition
#[derive(Debug, Default)]
pub struct PendingNavigationCache {
    slot: Mutex<Option<PendingNavigation>>,
}

impl PendingNavigationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<PendingNavigation>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a transition, overwriting whatever was pending
    pub fn stash(&self, location: Location, action: TransitionAction) {
        let previous = self.slot().replace(PendingNavigation { location, action });
        if let Some(previous) = previous {
            tracing::debug!(
                location = %previous.location,
                action = %previous.action,
                "Pending navigation overwritten"
            );
        }
    }

    /// Is there a transition we can resume?
    pub fn is_paused(&self) -> bool {
        self.slot().is_some()
    }

    /// Independent copy of the paused location, if any
    pub fn paused_location(&self) -> Option<Location> {
        self.slot().as_ref().map(|pending| pending.location.clone())
    }

    /// Remove and return the pending transition
    pub fn take(&self) -> Option<PendingNavigation> {
        self.slot().take()
    }

    /// Drop the pending transition
    pub fn clear(&self) {
        self.slot().take();
    }
}
