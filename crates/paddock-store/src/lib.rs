//! In-memory data layer for Paddock.
//!
//! Paddock serves a fixed set of named record collections over REST. This
//! crate holds everything below the HTTP surface: the records themselves and
//! the many-to-many associations between them.
//!
//! # Components
//!
//! - [`CollectionStore`] -- create/read/update by identifier within named
//!   collections, with identifier generation for records that lack one
//! - [`AssociationGraph`] -- idempotent links between records, across
//!   collections ([`CrossEdge`]) or within one ([`SelfEdge`])
//! - [`Paddock`] -- both of the above as one owned value; destroying a record
//!   through it also removes every edge that references the record
//!
//! # Design Rules
//!
//! 1. Identifiers are unique within a collection and never change.
//! 2. Edges only reference records that existed when the edge was set.
//! 3. Setting an edge twice stores it once.
//! 4. No edge outlives a destroyed endpoint.
//! 5. Every failure is a typed [`StoreError`]; a failed call changes nothing.

pub mod collection;
pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod paddock;
pub mod record;

pub use collection::CollectionStore;
pub use edge::{CrossEdge, RecordRef, SelfEdge};
pub use error::{StoreError, StoreResult};
pub use graph::AssociationGraph;
pub use id::{IdStrategy, RecordId};
pub use paddock::Paddock;
pub use record::Record;
