//! Router host integration
//!
//! The interceptor does not route, match URLs, or store history. It plugs into
//! a `RouterHost`, which fires interceptors before committing a transition and
//! performs the navigation the interceptor asks for.
//!
//! `MemoryHistory` is an in-memory host for headless use and tests.

mod host;
mod memory;

pub use host::{Interceptor, RouterHost, Unsubscribe};
pub use memory::MemoryHistory;
