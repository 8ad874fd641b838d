use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned to an entity by the data source.
///
/// Ids are stable within a catalog but are not the external lookup key;
/// products, categories, and formats are addressed by [`Slug`] instead.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

/// URL-safe human-readable identifier (`chairs`, `atelier-brun`, ...).
///
/// Slugs are unique within their entity collection and serve as the external
/// lookup key. Comparisons are case-sensitive by default; the format facet is
/// the one place the catalog matches case-insensitively, via
/// [`Slug::matches_ignore_case`].
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(pub String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive match against a caller-supplied slug.
    pub fn matches_ignore_case(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Slug {
    fn from(value: &str) -> Self {
        Slug(value.to_string())
    }
}
