//! Location types and the fingerprint comparator
//!
//! A `Location` is what the router host reports for the current page and for
//! every attempted transition. For blocking purposes two locations describe the
//! same page when their fingerprints match; the bookmark fragment and the
//! history entry key are not part of that identity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A routable location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Path portion, e.g. `/users/42`
    pub path: String,

    /// Query string without the leading `?`
    #[serde(default)]
    pub query: String,

    /// Arbitrary state attached to the history entry
    #[serde(default)]
    pub state: Option<Value>,

    /// Bookmark fragment without the leading `#`
    #[serde(default)]
    pub fragment: String,

    /// Unique key of the history entry (assigned by the router host)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Location {
    /// Create a location for a bare path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Parse `path?query#fragment`
    pub fn parse(href: &str) -> Self {
        let (rest, fragment) = match href.split_once('#') {
            Some((rest, fragment)) => (rest, fragment),
            None => (href, ""),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, query),
            None => (rest, ""),
        };

        Self {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            query: query.to_string(),
            fragment: fragment.to_string(),
            ..Self::default()
        }
    }

    /// Set the query string
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the entry state
    pub fn with_state(mut self, state: Value) -> Self {
        self.state = Some(state);
        self
    }

    /// Set the bookmark fragment
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = fragment.into();
        self
    }

    /// Render back to `path?query#fragment`
    pub fn href(&self) -> String {
        let mut href = self.path.clone();
        if !self.query.is_empty() {
            href.push('?');
            href.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            href.push('#');
            href.push_str(&self.fragment);
        }
        href
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.href())
    }
}

/// How the new location was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransitionAction {
    /// A new entry pushed onto the history stack
    Push,
    /// The current entry replaced
    Replace,
    /// Back/forward traversal through existing entries
    Pop,
}

impl std::fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionAction::Push => write!(f, "PUSH"),
            TransitionAction::Replace => write!(f, "REPLACE"),
            TransitionAction::Pop => write!(f, "POP"),
        }
    }
}

/// Destination of a programmatic navigation: a path string or a full location
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationTarget {
    Path(String),
    Location(Location),
}

impl NavigationTarget {
    /// Resolve into a location, applying `state` when given
    pub fn into_location(self, state: Option<Value>) -> Location {
        let mut location = match self {
            NavigationTarget::Path(href) => Location::parse(&href),
            NavigationTarget::Location(location) => location,
        };
        if state.is_some() {
            location.state = state;
        }
        location
    }
}

impl From<&str> for NavigationTarget {
    fn from(href: &str) -> Self {
        NavigationTarget::Path(href.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(href: String) -> Self {
        NavigationTarget::Path(href)
    }
}

impl From<Location> for NavigationTarget {
    fn from(location: Location) -> Self {
        NavigationTarget::Location(location)
    }
}

/// Fields that make up page identity.
///
/// Field order here is the serialization order of the fingerprint.
#[derive(Serialize)]
struct PageIdentity<'a> {
    path: &'a str,
    query: &'a str,
    state: Option<Value>,
}

/// Rebuild objects with their keys in sorted order
///
/// `serde_json::Map` keeps insertion order once `preserve_order` is enabled
/// anywhere in the dependency graph, so ordering is not left to the map type.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<_> = map.iter().collect();
            fields.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key.clone(), canonical(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

/// Comparable identity for a location, excluding fragment and entry key
pub fn fingerprint(location: &Location) -> String {
    let identity = PageIdentity {
        path: &location.path,
        query: &location.query,
        state: location.state.as_ref().map(canonical),
    };
    // Serializing strings and a `Value` cannot fail
    serde_json::to_string(&identity).unwrap_or_default()
}

/// Whether both locations point at the same page
pub fn same_page(a: &Location, b: &Location) -> bool {
    fingerprint(a) == fingerprint(b)
}

/// Same page, different bookmark fragment
pub fn bookmark_only_change(a: &Location, b: &Location) -> bool {
    same_page(a, b) && a.fragment != b.fragment
}
