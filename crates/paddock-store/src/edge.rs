//! Edge representations for the association graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::RecordId;

/// A (collection, identifier) tag naming one record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordRef {
    pub collection: String,
    pub id: RecordId,
}

impl RecordRef {
    pub fn new(collection: impl Into<String>, id: impl Into<RecordId>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn is(&self, collection: &str, id: &str) -> bool {
        self.collection == collection && self.id == id
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// An edge between records of two distinct collections.
///
/// The two ends are stored in sorted order, so an edge built from `(a, b)`
/// equals one built from `(b, a)`. Since the collections differ, each edge
/// has at most one end per collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrossEdge {
    low: RecordRef,
    high: RecordRef,
}

impl CrossEdge {
    pub fn new(a: RecordRef, b: RecordRef) -> Self {
        debug_assert_ne!(a.collection, b.collection, "cross edge within one collection");
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn ends(&self) -> (&RecordRef, &RecordRef) {
        (&self.low, &self.high)
    }

    /// Whether either end is `collection/id`.
    pub fn touches(&self, collection: &str, id: &str) -> bool {
        self.low.is(collection, id) || self.high.is(collection, id)
    }

    /// The end lying in `collection`, if any.
    pub fn end_in(&self, collection: &str) -> Option<&RecordRef> {
        if self.low.collection == collection {
            Some(&self.low)
        } else if self.high.collection == collection {
            Some(&self.high)
        } else {
            None
        }
    }

    /// If one end is `from_collection/from_id`, the identifier at the
    /// `to_collection` end.
    pub fn counterpart(&self, from_collection: &str, from_id: &str, to_collection: &str) -> Option<&RecordId> {
        let from = self.end_in(from_collection)?;
        if from.id != from_id {
            return None;
        }
        self.end_in(to_collection).map(|end| &end.id)
    }
}

/// An undirected edge between two records of the same collection, stored as
/// a sorted pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelfEdge {
    low: RecordId,
    high: RecordId,
}

impl SelfEdge {
    pub fn new(a: RecordId, b: RecordId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn pair(&self) -> (&RecordId, &RecordId) {
        (&self.low, &self.high)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.low == id || self.high == id
    }

    /// The endpoint opposite `id`, or `None` if `id` is not an endpoint.
    pub fn other(&self, id: &str) -> Option<&RecordId> {
        if self.low == id {
            Some(&self.high)
        } else if self.high == id {
            Some(&self.low)
        } else {
            None
        }
    }
}
