//! Person identifiers backed by a global string interner.
//!
//! Family data references people by opaque string ids (typically UUIDs).
//! [`PersonId`] interns them so ids are `Copy`, cheap to hash and cheap to
//! compare, while still serializing as the original string.

use std::{
    fmt,
    str::FromStr,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for person ids.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        // The interner is append-only, a poisoned lock still holds valid data.
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier of a [`Person`](crate::family::Person).
///
/// # Examples
///
/// ```
/// use kindred_core::identifier::PersonId;
///
/// let a = PersonId::new("7f1c-grandma");
/// let b = PersonId::new("7f1c-grandma");
/// assert_eq!(a, b);
/// assert_eq!(a, "7f1c-grandma");
/// assert_eq!(a.to_string(), "7f1c-grandma");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonId(DefaultSymbol);

impl PersonId {
    /// Creates a `PersonId` from its string form, interning it if needed.
    pub fn new(id: &str) -> Self {
        Self(interner().get_or_intern(id))
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let value = interner.resolve(self.0).unwrap_or_default();
        f.write_str(value)
    }
}

impl FromStr for PersonId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<&str> for PersonId {
    fn eq(&self, other: &&str) -> bool {
        interner().resolve(self.0) == Some(*other)
    }
}

impl PartialEq<str> for PersonId {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl Serialize for PersonId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PersonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(&value))
    }
}
