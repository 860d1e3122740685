//! Interceptor configuration

use serde::{Deserialize, Serialize};

use super::error::PauseResult;

/// Options recognized by the transition interceptor
///
/// ```ignore
/// let config = PauseConfig::default().with_allow_bookmarks(false);
/// let config = PauseConfig::from_json(r#"{"allowBookmarks": false}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PauseConfig {
    /// When true, a change of only the bookmark fragment is never intercepted
    pub allow_bookmarks: bool,
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self {
            allow_bookmarks: true,
        }
    }
}

impl PauseConfig {
    /// Set whether bookmark-only navigation bypasses the handler
    pub fn with_allow_bookmarks(mut self, allow: bool) -> Self {
        self.allow_bookmarks = allow;
        self
    }

    /// Parse from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> PauseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
