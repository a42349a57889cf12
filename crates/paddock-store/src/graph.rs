//! The association graph: many-to-many links between records.
//!
//! Edges come in two shapes. A [`CrossEdge`] joins records of two different
//! collections and is found from either side. A [`SelfEdge`] joins two
//! records of one collection and is undirected. Any call whose two
//! collection names are equal is handled with self edges.
//!
//! # Invariants
//!
//! - An edge is only created between records that exist at that moment.
//! - Setting an edge that already exists leaves the graph unchanged.
//! - A record is never linked to itself.
//! - The graph holds (collection, id) tags only, never records.

use std::collections::HashMap;

use tracing::debug;

use crate::collection::CollectionStore;
use crate::edge::{CrossEdge, RecordRef, SelfEdge};
use crate::error::{StoreError, StoreResult};
use crate::id::RecordId;
use crate::record::Record;

/// Edge storage, consulted against a [`CollectionStore`] for existence
/// checks and record resolution.
#[derive(Clone, Debug, Default)]
pub struct AssociationGraph {
    /// Edges between distinct collections, in insertion order.
    cross: Vec<CrossEdge>,
    /// Edges within a collection, keyed by collection name.
    same: HashMap<String, Vec<SelfEdge>>,
}

impl AssociationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of edges of both kinds.
    pub fn edge_count(&self) -> usize {
        self.cross.len() + self.same.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    pub fn cross_edges(&self) -> &[CrossEdge] {
        &self.cross
    }

    pub fn self_edges(&self, collection: &str) -> &[SelfEdge] {
        self.same.get(collection).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Link two existing records.
    ///
    /// Returns `Ok(true)` if a new edge was stored and `Ok(false)` if an
    /// equal edge was already present.
    pub fn set(
        &mut self,
        store: &CollectionStore,
        type1: &str,
        id1: &str,
        type2: &str,
        id2: &str,
    ) -> StoreResult<bool> {
        ensure_endpoint(store, type1, id1)?;
        ensure_endpoint(store, type2, id2)?;

        let inserted = if type1 == type2 {
            if id1 == id2 {
                return Err(StoreError::SelfAssociation {
                    collection: type1.to_string(),
                    id: id1.to_string(),
                });
            }
            let edge = SelfEdge::new(RecordId::from(id1), RecordId::from(id2));
            insert_unique(self.same.entry(type1.to_string()).or_default(), edge)
        } else {
            let edge = CrossEdge::new(RecordRef::new(type1, id1), RecordRef::new(type2, id2));
            insert_unique(&mut self.cross, edge)
        };

        debug!(type1, id1, type2, id2, inserted, "set association");
        Ok(inserted)
    }

    /// Records of `type2` linked to `type1/id1`, in edge insertion order.
    ///
    /// Edges whose far end no longer resolves in the store are skipped.
    pub fn find_by_association(
        &self,
        store: &CollectionStore,
        type1: &str,
        id1: &str,
        type2: &str,
    ) -> StoreResult<Vec<Record>> {
        ensure_collection(store, type1)?;
        ensure_collection(store, type2)?;

        let targets: Vec<&RecordId> = if type1 == type2 {
            self.self_edges(type1)
                .iter()
                .filter_map(|edge| edge.other(id1))
                .collect()
        } else {
            self.cross
                .iter()
                .filter_map(|edge| edge.counterpart(type1, id1, type2))
                .collect()
        };

        Ok(targets
            .into_iter()
            .filter_map(|id| store.get(type2, id.as_str()).cloned())
            .collect())
    }

    /// Remove the single edge between `type1/id1` and `type2/id2`.
    ///
    /// Absent edges are a no-op. Fails if `id2` does not name a record of
    /// `type2`.
    pub fn remove_edge(
        &mut self,
        store: &CollectionStore,
        type1: &str,
        id1: &str,
        type2: &str,
        id2: &str,
    ) -> StoreResult<()> {
        ensure_collection(store, type1)?;
        ensure_endpoint(store, type2, id2)?;

        if type1 == type2 {
            let target = SelfEdge::new(RecordId::from(id1), RecordId::from(id2));
            if let Some(edges) = self.same.get_mut(type1) {
                edges.retain(|edge| *edge != target);
            }
        } else {
            let target = CrossEdge::new(RecordRef::new(type1, id1), RecordRef::new(type2, id2));
            self.cross.retain(|edge| *edge != target);
        }

        debug!(type1, id1, type2, id2, "removed association");
        Ok(())
    }

    /// Remove every edge between `type1/id1` and any record of `type2`.
    ///
    /// Neither record needs to exist, so stale edges can always be cleared.
    pub fn remove_edges_by_type(
        &mut self,
        store: &CollectionStore,
        type1: &str,
        id1: &str,
        type2: &str,
    ) -> StoreResult<()> {
        ensure_collection(store, type1)?;
        ensure_collection(store, type2)?;

        if type1 == type2 {
            self.retain_self_edges_without(type1, id1);
        } else {
            self.cross
                .retain(|edge| edge.counterpart(type1, id1, type2).is_none());
        }

        debug!(type1, id1, type2, "removed associations by type");
        Ok(())
    }

    /// Remove every edge touching `type1/id1`, of either kind and in either
    /// position. This is the cascade run when a record is destroyed.
    pub fn remove_all_edges_of(
        &mut self,
        store: &CollectionStore,
        type1: &str,
        id1: &str,
    ) -> StoreResult<()> {
        ensure_collection(store, type1)?;

        let before = self.edge_count();
        self.cross.retain(|edge| !edge.touches(type1, id1));
        self.retain_self_edges_without(type1, id1);

        debug!(type1, id1, removed = before - self.edge_count(), "removed all associations");
        Ok(())
    }

    fn retain_self_edges_without(&mut self, collection: &str, id: &str) {
        if let Some(edges) = self.same.get_mut(collection) {
            edges.retain(|edge| !edge.contains(id));
        }
    }
}

fn insert_unique<E: PartialEq>(edges: &mut Vec<E>, edge: E) -> bool {
    if edges.contains(&edge) {
        return false;
    }
    edges.push(edge);
    true
}

fn ensure_collection(store: &CollectionStore, collection: &str) -> StoreResult<()> {
    if store.exists(collection) {
        Ok(())
    } else {
        Err(StoreError::unknown_collection(collection))
    }
}

fn ensure_endpoint(store: &CollectionStore, collection: &str, id: &str) -> StoreResult<()> {
    ensure_collection(store, collection)?;
    if store.contains(collection, id) {
        Ok(())
    } else {
        Err(StoreError::InvalidAssociationEndpoint {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }
}
