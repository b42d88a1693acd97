/// The polymorphic LSIF element identifier.
///
/// The LSIF wire format allows an element `id` to be either a JSON string or
/// a JSON integer. [`Id`] canonicalizes both into a single textual form at
/// deserialization time: integers render as their decimal digits, strings
/// render with their surrounding double quotes preserved. The quotes are
/// load-bearing — they keep the string `"1"` and the integer `1` distinct, so
/// a producer that mixes both styles can never alias two elements.
///
/// Equality, ordering, and hashing all operate on the canonical text; the
/// original JSON type is not retained and is never compared.
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// An LSIF element identifier in canonical textual form.
///
/// Construct via serde deserialization of a JSON string or integer, or via
/// [`Id::from_integer`] / [`Id::from_string`] in tests and tools.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(String);

impl Id {
    /// Builds an [`Id`] from an integer id, canonicalized to decimal digits.
    pub fn from_integer(value: i64) -> Self {
        Self(value.to_string())
    }

    /// Builds an [`Id`] from a string id, canonicalized with surrounding quotes.
    pub fn from_string(value: &str) -> Self {
        Self(format!("\"{value}\""))
    }

    /// Returns the canonical textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IdVisitor)
    }
}

struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = Id;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer id")
    }

    fn visit_str<E>(self, v: &str) -> Result<Id, E>
    where
        E: de::Error,
    {
        Ok(Id::from_string(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Id, E>
    where
        E: de::Error,
    {
        Ok(Id(v.to_string()))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Id, E>
    where
        E: de::Error,
    {
        Ok(Id::from_integer(v))
    }

    // Floats, booleans, nulls, arrays, and objects are all unsupported id
    // types; serde routes them here and the default Visitor impls reject
    // them with a type error mentioning the expecting() string above.
}
