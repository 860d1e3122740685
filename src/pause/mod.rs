//! Route pause
//!
//! - `PauseCore` - decides each attempted transition and replays paused ones
//! - `RouterPause` / `PauseProps` - keeps the router subscription in sync with
//!   the current handler and config

mod controller;
mod protocol;

#[cfg(test)]
mod testing;

pub use controller::{PauseProps, RouterPause};
pub use protocol::PauseCore;
