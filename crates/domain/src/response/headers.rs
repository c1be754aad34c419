//! Case-folded response headers

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response headers with names folded to lowercase at the boundary.
///
/// Repeated headers are joined with `", "`, so every lookup yields at most
/// one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseHeaders {
    items: BTreeMap<String, String>,
}

impl ResponseHeaders {
    /// Creates an empty header map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Adds a header, appending to an existing value of the same name.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        self.items
            .entry(name.trim().to_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    /// Looks up a header by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items.get(&name.trim().to_lowercase()).map(String::as_str)
    }

    /// Iterates over `(lowercase name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ResponseHeaders
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.append(name.as_ref(), value);
        }
        headers
    }
}
