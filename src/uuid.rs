//! Process-unique 64-bit identifiers
//!
//! Entities carry two of these: their own identifier and a group identifier
//! shared by every entity created from the same import operation. The nil
//! value marks an entity that does not belong to any import group.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A randomly generated 64-bit identifier.
///
/// Identifiers are never recycled: destroying an entity does not free its
/// identifier for reuse, and deserialized scenes keep the identifiers they
/// were saved with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uuid(u64);

impl Uuid {
    /// The zero identifier, used as the "no group" marker.
    pub const NIL: Uuid = Uuid(0);

    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Uuid(rand::random::<u64>())
    }

    /// Returns the raw 64-bit value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// True for the "no group" marker.
    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Uuid {
    fn default() -> Self {
        Uuid::new()
    }
}

impl From<u64> for Uuid {
    fn from(value: u64) -> Self {
        Uuid(value)
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_uuids_are_distinct() {
        let a = Uuid::new();
        let b = Uuid::new();
        assert_ne!(a, b);
    }

    #[test]
    fn nil_round_trips_through_u64() {
        assert!(Uuid::NIL.is_nil());
        assert_eq!(Uuid::from(0), Uuid::NIL);
        assert_eq!(Uuid::from(42).as_u64(), 42);
    }
}
