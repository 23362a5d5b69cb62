//! Snowflake identifiers.
//!
//! The platform transmits ids as decimal strings to avoid precision loss in
//! consumers without 64-bit integers. [`Id`] keeps the string form and is
//! used as the key type for every cache registry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A snowflake id, kept in its wire (string) form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Creates an id from anything string-like.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serde_transparent() {
        let id: Id = serde_json::from_str(r#""290926798626357250""#).unwrap();
        assert_eq!(id, "290926798626357250");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            r#""290926798626357250""#
        );
    }

    #[test]
    fn test_id_from_u64() {
        assert_eq!(Id::from(42u64), "42");
    }
}
