//! Route pause
//!
//! Intercepts route transitions before they commit and lets application code
//! allow, deny, or pause them, then resume or cancel paused ones later.
//!
//! ```ignore
//! use route_pause::{HandlerResponse, MemoryHistory, PauseProps, RouterPause};
//!
//! let history = MemoryHistory::new("/editor");
//! let pause = RouterPause::mount(
//!     history.clone(),
//!     PauseProps::new().with_named_handler("unsaved_changes", |nav, _location, _action| {
//!         if has_unsaved_changes() {
//!             show_dialog(nav.clone()); // dialog calls nav.resume() or nav.cancel()
//!             return Ok(HandlerResponse::Pause);
//!         }
//!         Ok(HandlerResponse::Allow)
//!     }),
//! );
//! ```

pub mod core;
pub mod handler;
pub mod navigation;
pub mod pause;
pub mod router;

pub mod logging;

pub use crate::core::{Location, NavigationTarget, PauseConfig, PauseError, PauseResult, TransitionAction};
pub use handler::{HandlerOutcome, HandlerResponse, NamedHandler, NavigationCapability, NavigationHandler};
pub use pause::{PauseCore, PauseProps, RouterPause};
pub use router::{MemoryHistory, RouterHost};
