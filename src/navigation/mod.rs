//! Interceptor state
//!
//! - `PendingNavigationCache` - the (at most one) paused transition
//! - `BypassFlag` - lets the interceptor's own navigation through once

mod bypass;
mod cache;

pub use bypass::BypassFlag;
pub use cache::{PendingNavigation, PendingNavigationCache};
