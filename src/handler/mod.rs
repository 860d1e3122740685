//! Handler Module
//!
//! Caller-supplied decision functions consulted before a route transition.
//!
//! # Example
//!
//! ```ignore
//! use route_pause::handler::{HandlerResponse, NamedHandler};
//!
//! let handler = NamedHandler::new("confirm_leave", |nav, location, _action| {
//!     if location.path.starts_with("/admin") {
//!         return Ok(HandlerResponse::Deny);
//!     }
//!     if form_is_dirty() {
//!         // Keep `nav` and call nav.resume() / nav.cancel() from the dialog
//!         open_confirm_dialog(nav.clone());
//!         return Ok(HandlerResponse::Pause);
//!     }
//!     Ok(HandlerResponse::Allow)
//! });
//! ```
//!
//! # HandlerResponse
//!
//! | Response | Effect |
//! |----------|--------|
//! | `Allow` / `Proceed` | Transition commits |
//! | `Deny` | Transition blocked |
//! | `Pause` | Blocked now, held for `resume()` / `cancel()` |
//! | `Deferred(fut)` | Blocked now; resumed or cancelled when `fut` settles |
//! | `Unrecognized(v)` | Logged, transition commits |
//!
//! Calling `nav.pause()` overrides the returned value with `Pause`. Calling
//! `resume`, `cancel`, `push` or `replace` during the handler blocks the
//! original transition, since the handler already drove navigation itself.

mod capability;
mod decision;
mod types;

pub use capability::NavigationCapability;
pub use decision::{arc_handler, handlers_equivalent, ArcHandler, NamedHandler, NavigationHandler};
pub use types::{DeferredDecision, HandlerOutcome, HandlerResponse, PendingResolution};
