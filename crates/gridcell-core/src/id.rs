//! Storage row identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identifier assigned by whatever store persists a record.
///
/// Records built in memory have no id until a store hands one out, so the
/// model carries `Option<RecordId>`. Ids are always positive.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Create a RecordId from a raw value, rejecting zero
    pub fn new(id: u64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// Interpret a JSON-style signed id; non-positive values mean "no id"
    pub fn from_signed(id: i64) -> Option<Self> {
        u64::try_from(id).ok().and_then(Self::new)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
