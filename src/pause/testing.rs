//! Test doubles for the router host

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::core::{Location, NavigationTarget, TransitionAction};
use crate::handler::{arc_handler, ArcHandler, HandlerResponse, NavigationCapability};
use crate::router::{Interceptor, RouterHost, Unsubscribe};

/// A navigation the host was asked to perform
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Back,
    Push(Location),
    Replace(Location),
}

/// Host that records calls instead of navigating
#[derive(Default)]
pub struct RecordingHost {
    pub current: Mutex<Location>,
    pub calls: Mutex<Vec<HostCall>>,
    pub subscribes: AtomicUsize,
    pub unsubscribes: Arc<AtomicUsize>,
}

impl RecordingHost {
    pub fn at(path: &str) -> Arc<Self> {
        let host = Self::default();
        *host.current.lock().unwrap() = Location::new(path);
        Arc::new(host)
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn subscribe_count(&self) -> usize {
        self.subscribes.load(Ordering::SeqCst)
    }

    pub fn unsubscribe_count(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }
}

impl RouterHost for RecordingHost {
    fn location(&self) -> Location {
        self.current.lock().unwrap().clone()
    }

    fn subscribe(&self, _interceptor: Interceptor) -> Unsubscribe {
        self.subscribes.fetch_add(1, Ordering::SeqCst);
        let unsubscribes = self.unsubscribes.clone();
        Unsubscribe::new(move || {
            unsubscribes.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn go_back(&self) {
        self.calls.lock().unwrap().push(HostCall::Back);
    }

    fn push(&self, target: NavigationTarget, state: Option<Value>) {
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::Push(target.into_location(state)));
    }

    fn replace(&self, target: NavigationTarget, state: Option<Value>) {
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::Replace(target.into_location(state)));
    }
}

/// Handler that always returns the same kind of response and counts calls
pub fn counting_handler(
    calls: Arc<AtomicUsize>,
    respond: fn() -> HandlerResponse,
) -> ArcHandler {
    arc_handler(
        move |_nav: &NavigationCapability, _location: &Location, _action: TransitionAction| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(respond())
        },
    )
}
