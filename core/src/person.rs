use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

/// A user of the network, identified solely by name.
///
/// Equality, ordering and hashing all derive from the name, so a freshly
/// built `Person` is a valid lookup key for any vertex stored earlier under
/// the same name. Matching is case-sensitive.
///
/// `Person::default()` is the unnamed sentinel. Graph operations reject it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Person {
    name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for the sentinel (empty name). Such a person is never a graph key.
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Person {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Person {
    fn from(name: String) -> Self {
        Self { name }
    }
}

// Lets maps keyed by Person be queried with a bare &str.
impl Borrow<str> for Person {
    fn borrow(&self) -> &str {
        &self.name
    }
}
