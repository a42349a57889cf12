//! [`Paddock`]: a collection store and its association graph as one unit.

use crate::collection::CollectionStore;
use crate::error::StoreResult;
use crate::graph::AssociationGraph;
use crate::id::IdStrategy;
use crate::record::Record;

/// The complete in-memory state: records and the edges between them.
///
/// `Paddock` is a plain owned value with no interior locking. Reads take
/// `&self` and writes take `&mut self`; a multi-threaded host wraps the whole
/// value in a single lock so that a destroy and its edge cascade are seen
/// together.
#[derive(Clone, Debug)]
pub struct Paddock {
    store: CollectionStore,
    graph: AssociationGraph,
}

impl Paddock {
    /// Build an empty paddock with a fixed set of collections.
    pub fn new<I, S>(collections: I, id_field: impl Into<String>) -> StoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            store: CollectionStore::new(collections, id_field)?,
            graph: AssociationGraph::new(),
        })
    }

    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.store = self.store.with_id_strategy(strategy);
        self
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn graph(&self) -> &AssociationGraph {
        &self.graph
    }

    pub fn id_field(&self) -> &str {
        self.store.id_field()
    }

    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.store.collections()
    }

    pub fn exists(&self, collection: &str) -> bool {
        self.store.exists(collection)
    }

    // ---- Records ----

    pub fn create(&mut self, collection: &str, record: Record) -> StoreResult<&Record> {
        self.store.create(collection, record)
    }

    pub fn find_all(&self, collection: &str) -> StoreResult<Vec<Record>> {
        self.store.find_all(collection)
    }

    pub fn find(&self, collection: &str, id: &str) -> StoreResult<&Record> {
        self.store.find(collection, id)
    }

    pub fn update(&mut self, collection: &str, id: &str, patch: Record) -> StoreResult<&Record> {
        self.store.update(collection, id, patch)
    }

    /// Remove a record and every edge that references it.
    ///
    /// Returns `Ok(false)` without touching the graph when no record matches.
    pub fn destroy(&mut self, collection: &str, id: &str) -> StoreResult<bool> {
        if !self.store.remove(collection, id)? {
            return Ok(false);
        }
        self.graph.remove_all_edges_of(&self.store, collection, id)?;
        Ok(true)
    }

    // ---- Associations ----

    /// Link two records; see [`AssociationGraph::set`].
    pub fn associate(&mut self, type1: &str, id1: &str, type2: &str, id2: &str) -> StoreResult<bool> {
        self.graph.set(&self.store, type1, id1, type2, id2)
    }

    pub fn find_by_association(&self, type1: &str, id1: &str, type2: &str) -> StoreResult<Vec<Record>> {
        self.graph.find_by_association(&self.store, type1, id1, type2)
    }

    pub fn remove_edge(&mut self, type1: &str, id1: &str, type2: &str, id2: &str) -> StoreResult<()> {
        self.graph.remove_edge(&self.store, type1, id1, type2, id2)
    }

    pub fn remove_edges_by_type(&mut self, type1: &str, id1: &str, type2: &str) -> StoreResult<()> {
        self.graph.remove_edges_by_type(&self.store, type1, id1, type2)
    }

    pub fn remove_all_edges_of(&mut self, type1: &str, id1: &str) -> StoreResult<()> {
        self.graph.remove_all_edges_of(&self.store, type1, id1)
    }
}
