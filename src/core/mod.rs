//! Core types for the route interceptor
//!
//! - `Location` / `TransitionAction` / `NavigationTarget` - what is navigating where
//! - `fingerprint` - page identity used to detect redundant transitions
//! - `PauseConfig` - interceptor options
//! - `PauseError` - error types

pub mod config;
pub mod error;
pub mod location;

pub use config::PauseConfig;
pub use error::{PauseError, PauseResult};
pub use location::{
    bookmark_only_change, fingerprint, same_page, Location, NavigationTarget, TransitionAction,
};
