//! In-memory router host
//!
//! A history stack with an index, suitable for headless apps and tests.
//! Interceptors are called with no lock held, so they may navigate
//! re-entrantly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use uuid::Uuid;

use super::host::{Interceptor, RouterHost, Unsubscribe};
use crate::core::{Location, NavigationTarget, TransitionAction};

type Blockers = Arc<Mutex<Vec<(u64, Interceptor)>>>;

#[derive(Debug)]
struct HistoryStack {
    entries: Vec<Location>,
    index: usize,
    action: TransitionAction,
}

pub struct MemoryHistory {
    stack: Mutex<HistoryStack>,
    blockers: Blockers,
    next_blocker_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn with_key(mut location: Location) -> Location {
    location.key = Some(Uuid::new_v4().to_string());
    location
}

impl MemoryHistory {
    /// Create a history with a single initial entry
    pub fn new(initial: impl Into<NavigationTarget>) -> Arc<Self> {
        let location = with_key(initial.into().into_location(None));
        Arc::new(Self {
            stack: Mutex::new(HistoryStack {
                entries: vec![location],
                index: 0,
                action: TransitionAction::Pop,
            }),
            blockers: Arc::new(Mutex::new(Vec::new())),
            next_blocker_id: AtomicU64::new(0),
        })
    }

    /// All entries, oldest first
    pub fn entries(&self) -> Vec<Location> {
        lock(&self.stack).entries.clone()
    }

    /// Index of the current entry
    pub fn index(&self) -> usize {
        lock(&self.stack).index
    }

    pub fn len(&self) -> usize {
        lock(&self.stack).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.stack).entries.is_empty()
    }

    /// Action of the last committed transition
    pub fn action(&self) -> TransitionAction {
        lock(&self.stack).action
    }

    /// Number of registered interceptors
    pub fn blocker_count(&self) -> usize {
        lock(&self.blockers).len()
    }

    /// Move `delta` entries through history; out-of-range moves are ignored
    pub fn go(&self, delta: isize) {
        let target = {
            let stack = lock(&self.stack);
            let index = stack.index as isize + delta;
            if delta == 0 || index < 0 || index as usize >= stack.entries.len() {
                return;
            }
            (index as usize, stack.entries[index as usize].clone())
        };
        let (index, location) = target;

        if !self.confirm(&location, TransitionAction::Pop) {
            return;
        }

        let mut stack = lock(&self.stack);
        stack.index = index;
        stack.action = TransitionAction::Pop;
    }

    /// Run every interceptor; any `false` blocks the transition
    fn confirm(&self, location: &Location, action: TransitionAction) -> bool {
        let blockers: Vec<Interceptor> = lock(&self.blockers)
            .iter()
            .map(|(_, interceptor)| interceptor.clone())
            .collect();

        // Every interceptor runs, as with multiple history blockers
        let allowed = blockers
            .iter()
            .fold(true, |allowed, interceptor| interceptor(location, action) && allowed);

        if !allowed {
            tracing::debug!(location = %location, action = %action, "Transition blocked");
        }
        allowed
    }
}

impl RouterHost for MemoryHistory {
    fn location(&self) -> Location {
        let stack = lock(&self.stack);
        stack.entries[stack.index].clone()
    }

    fn subscribe(&self, interceptor: Interceptor) -> Unsubscribe {
        let id = self.next_blocker_id.fetch_add(1, Ordering::SeqCst);
        lock(&self.blockers).push((id, interceptor));

        let blockers = Arc::downgrade(&self.blockers);
        Unsubscribe::new(move || {
            if let Some(blockers) = blockers.upgrade() {
                lock(&blockers).retain(|(blocker_id, _)| *blocker_id != id);
            }
        })
    }

    fn go_back(&self) {
        self.go(-1);
    }

    fn push(&self, target: NavigationTarget, state: Option<Value>) {
        let location = with_key(target.into_location(state));
        if !self.confirm(&location, TransitionAction::Push) {
            return;
        }

        let mut stack = lock(&self.stack);
        let next = stack.index + 1;
        stack.entries.truncate(next);
        stack.entries.push(location);
        stack.index = next;
        stack.action = TransitionAction::Push;
    }

    fn replace(&self, target: NavigationTarget, state: Option<Value>) {
        let location = with_key(target.into_location(state));
        if !self.confirm(&location, TransitionAction::Replace) {
            return;
        }

        let mut stack = lock(&self.stack);
        let index = stack.index;
        stack.entries[index] = location;
        stack.action = TransitionAction::Replace;
    }
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHistory")
            .field("stack", &*lock(&self.stack))
            .field("blockers", &self.blocker_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_push_replace_go() {
        let history = MemoryHistory::new("/");
        history.push("/a".into(), None);
        history.push("/b?x=1".into(), None);
        assert_eq!(history.len(), 3);
        assert_eq!(history.location().path, "/b");
        assert_eq!(history.location().query, "x=1");

        history.replace("/c".into(), Some(serde_json::json!(1)));
        assert_eq!(history.len(), 3);
        assert_eq!(history.location().state, Some(serde_json::json!(1)));
        assert_eq!(history.action(), TransitionAction::Replace);

        history.go_back();
        assert_eq!(history.location().path, "/a");
        assert_eq!(history.action(), TransitionAction::Pop);

        history.go(-5);
        assert_eq!(history.index(), 1);

        history.push("/d".into(), None);
        assert_eq!(
            history.entries().iter().map(|l| l.path.as_str()).collect::<Vec<_>>(),
            vec!["/", "/a", "/d"]
        );
    }

    #[test]
    fn test_entries_get_keys() {
        let history = MemoryHistory::new("/");
        history.push("/a".into(), None);
        let entries = history.entries();
        assert!(entries.iter().all(|l| l.key.is_some()));
        assert_ne!(entries[0].key, entries[1].key);
    }

    #[test]
    fn test_blocker_can_veto() {
        let history = MemoryHistory::new("/");
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let unsubscribe = history.subscribe(Arc::new(move |location: &Location, _action: TransitionAction| {
            counter.fetch_add(1, Ordering::SeqCst);
            location.path != "/blocked"
        }));
        assert_eq!(history.blocker_count(), 1);

        history.push("/blocked".into(), None);
        assert_eq!(history.location().path, "/");

        history.push("/open".into(), None);
        assert_eq!(history.location().path, "/open");
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        unsubscribe.call();
        assert_eq!(history.blocker_count(), 0);
        history.push("/blocked".into(), None);
        assert_eq!(history.location().path, "/blocked");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_interceptor_sees_pending_location() {
        let history = MemoryHistory::new("/");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let _unsubscribe = history.subscribe(Arc::new(move |location: &Location, action: TransitionAction| {
            log.lock().unwrap().push((location.clone(), action));
            true
        }));

        history.push("/a".into(), None);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, TransitionAction::Push);
        assert_eq!(seen[0].0, history.location());
    }
}
