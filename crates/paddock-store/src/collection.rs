//! The collection store: identifier-indexed records in named collections.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::id::{IdGenerator, IdStrategy, RecordId};
use crate::record::Record;

/// A stored record together with its identifier, which never changes after
/// creation.
#[derive(Clone, Debug)]
struct Entry {
    id: RecordId,
    record: Record,
}

/// Named collections of records, keyed by the configured identifier field.
///
/// The set of collection names is fixed at construction. Records within a
/// collection keep their insertion order and never share an identifier.
///
/// Removal is crate-private: records are destroyed through
/// [`Paddock::destroy`](crate::Paddock::destroy) so that their associations
/// are cascaded in the same step.
#[derive(Clone, Debug)]
pub struct CollectionStore {
    id_field: String,
    names: Vec<String>,
    collections: HashMap<String, Vec<Entry>>,
    ids: IdGenerator,
}

impl CollectionStore {
    /// Build a store with a fixed set of collections.
    ///
    /// Fails if no names are given, a name repeats, or `id_field` is empty.
    pub fn new<I, S>(collections: I, id_field: impl Into<String>) -> StoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id_field = id_field.into();
        if id_field.is_empty() {
            return Err(StoreError::EmptyIdField);
        }

        let mut names = Vec::new();
        let mut map = HashMap::new();
        for name in collections {
            let name = name.into();
            if map.insert(name.clone(), Vec::new()).is_some() {
                return Err(StoreError::DuplicateCollection(name));
            }
            names.push(name);
        }
        if names.is_empty() {
            return Err(StoreError::NoCollections);
        }

        Ok(Self {
            id_field,
            names,
            collections: map,
            ids: IdGenerator::new(IdStrategy::default()),
        })
    }

    /// Use `strategy` for records created without an identifier.
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.ids = IdGenerator::new(strategy);
        self
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.ids.strategy()
    }

    /// Registered collection names, in registration order.
    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether `collection` was registered at construction.
    pub fn exists(&self, collection: &str) -> bool {
        self.collections.contains_key(collection)
    }

    /// Number of records in `collection`.
    pub fn len(&self, collection: &str) -> StoreResult<usize> {
        Ok(self.entries(collection)?.len())
    }

    /// Whether a record with `id` is present in `collection`. Unknown
    /// collections contain nothing.
    pub fn contains(&self, collection: &str, id: &str) -> bool {
        self.get(collection, id).is_some()
    }

    /// Look up a record without producing an error.
    pub fn get(&self, collection: &str, id: &str) -> Option<&Record> {
        if id.is_empty() {
            return None;
        }
        self.collections
            .get(collection)?
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.record)
    }

    /// Insert a record, generating an identifier if it has none.
    ///
    /// A record whose identifier is already taken is rejected with
    /// [`StoreError::DuplicateIdentifier`] and nothing is stored.
    pub fn create(&mut self, collection: &str, mut record: Record) -> StoreResult<&Record> {
        if !self.exists(collection) {
            return Err(StoreError::unknown_collection(collection));
        }

        let id = match record.identifier(&self.id_field)? {
            Some(id) => {
                if self.contains(collection, id.as_str()) {
                    return Err(StoreError::DuplicateIdentifier {
                        collection: collection.to_string(),
                        id: id.into_string(),
                    });
                }
                id
            }
            None => {
                let id = self.generate_id(collection);
                record.insert(self.id_field.clone(), Value::String(id.to_string()));
                id
            }
        };

        debug!(collection, id = %id, "created record");
        let entries = self.entries_mut(collection)?;
        let index = entries.len();
        entries.push(Entry { id, record });
        Ok(&entries[index].record)
    }

    /// Snapshot of every record in `collection`, in insertion order.
    pub fn find_all(&self, collection: &str) -> StoreResult<Vec<Record>> {
        Ok(self
            .entries(collection)?
            .iter()
            .map(|entry| entry.record.clone())
            .collect())
    }

    /// The record with `id`. An empty `id` is never found.
    pub fn find(&self, collection: &str, id: &str) -> StoreResult<&Record> {
        self.entries(collection)?;
        self.get(collection, id)
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    /// Merge `patch` into the record with `id`.
    ///
    /// The identifier field is dropped from `patch` first, so identifiers
    /// never change after creation.
    pub fn update(&mut self, collection: &str, id: &str, mut patch: Record) -> StoreResult<&Record> {
        patch.remove(&self.id_field);
        let entry = self.entry_mut(collection, id)?;
        entry.record.merge(patch);
        debug!(collection, id, "updated record");
        Ok(&entry.record)
    }

    /// Drop the record with `id`. Returns `false` if there was none.
    pub(crate) fn remove(&mut self, collection: &str, id: &str) -> StoreResult<bool> {
        let entries = self.entries_mut(collection)?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        Ok(entries.len() != before)
    }

    fn generate_id(&mut self, collection: &str) -> RecordId {
        loop {
            let candidate = self.ids.next_candidate();
            if !self.contains(collection, candidate.as_str()) {
                return candidate;
            }
        }
    }

    fn entries(&self, collection: &str) -> StoreResult<&Vec<Entry>> {
        self.collections
            .get(collection)
            .ok_or_else(|| StoreError::unknown_collection(collection))
    }

    fn entries_mut(&mut self, collection: &str) -> StoreResult<&mut Vec<Entry>> {
        self.collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::unknown_collection(collection))
    }

    fn entry_mut(&mut self, collection: &str, id: &str) -> StoreResult<&mut Entry> {
        let entries = self.entries_mut(collection)?;
        if id.is_empty() {
            return Err(StoreError::not_found(collection, id));
        }
        entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| StoreError::not_found(collection, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).expect("object")
    }

    fn store() -> CollectionStore {
        CollectionStore::new(["tigers", "llamas", "donkeys"], "id").unwrap()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn construction_rejects_bad_input() {
        let empty: [&str; 0] = [];
        assert_eq!(
            CollectionStore::new(empty, "id").unwrap_err(),
            StoreError::NoCollections
        );
        assert_eq!(
            CollectionStore::new(["a", "b", "a"], "id").unwrap_err(),
            StoreError::DuplicateCollection("a".into())
        );
        assert_eq!(
            CollectionStore::new(["a"], "").unwrap_err(),
            StoreError::EmptyIdField
        );
    }

    #[test]
    fn exists_only_for_registered_names() {
        let store = store();
        assert!(store.exists("tigers"));
        assert!(store.exists("llamas"));
        assert!(!store.exists("tiger"));
        assert!(!store.exists("llama"));
    }

    #[test]
    fn collections_keep_registration_order() {
        let store = store();
        assert_eq!(
            store.collections().collect::<Vec<_>>(),
            vec!["tigers", "llamas", "donkeys"]
        );
    }

    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    #[test]
    fn create_adds_to_target_collection_only() {
        let mut store = store();
        store.create("tigers", Record::new()).unwrap();
        assert_eq!(store.len("tigers").unwrap(), 1);
        assert_eq!(store.len("llamas").unwrap(), 0);
    }

    #[test]
    fn create_returns_stored_record() {
        let mut store = store();
        let created = store
            .create("tigers", record(json!({"name": "Tony", "id": "1"})))
            .unwrap()
            .clone();
        assert_eq!(created, record(json!({"name": "Tony", "id": "1"})));
        assert_eq!(store.find("tigers", "1").unwrap(), &created);
    }

    #[test]
    fn create_rejects_duplicate_identifier() {
        let mut store = store();
        store.create("tigers", record(json!({"id": "1"}))).unwrap();
        let err = store
            .create("tigers", record(json!({"id": "1", "name": "Tony2"})))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateIdentifier {
                collection: "tigers".into(),
                id: "1".into()
            }
        );
        assert_eq!(store.len("tigers").unwrap(), 1);
        assert!(store.find("tigers", "1").unwrap().get("name").is_none());
    }

    #[test]
    fn same_identifier_allowed_across_collections() {
        let mut store = store();
        store.create("tigers", record(json!({"id": "1"}))).unwrap();
        store.create("llamas", record(json!({"id": "1"}))).unwrap();
        assert_eq!(store.len("llamas").unwrap(), 1);
    }

    #[test]
    fn numeric_identifier_collides_with_string_form() {
        let mut store = store();
        store.create("tigers", record(json!({"id": 7}))).unwrap();
        assert!(store.find("tigers", "7").is_ok());
        assert!(matches!(
            store.create("tigers", record(json!({"id": "7"}))),
            Err(StoreError::DuplicateIdentifier { .. })
        ));
    }

    #[test]
    fn create_generates_missing_identifiers() {
        let mut store = store();
        store
            .create("tigers", record(json!({"name": "Tony", "id": "1"})))
            .unwrap();
        store
            .create("tigers", record(json!({"name": "Tigger", "id": "2"})))
            .unwrap();
        let generated = store
            .create("tigers", record(json!({"name": "Shere Khan"})))
            .unwrap()
            .clone();

        let id = generated.get("id").and_then(Value::as_str).unwrap().to_string();
        assert_ne!(id, "1");
        assert_ne!(id, "2");
        assert_eq!(store.find("tigers", &id).unwrap().get("name"), Some(&json!("Shere Khan")));
    }

    #[test]
    fn generated_identifier_replaces_null_and_empty() {
        let mut store = store();
        let a = store.create("tigers", record(json!({"id": null}))).unwrap().clone();
        let b = store.create("tigers", record(json!({"id": ""}))).unwrap().clone();
        assert!(a.get("id").and_then(Value::as_str).is_some_and(|s| !s.is_empty()));
        assert!(b.get("id").and_then(Value::as_str).is_some_and(|s| !s.is_empty()));
        assert_ne!(a.get("id"), b.get("id"));
    }

    #[test]
    fn generation_is_checked_against_target_collection() {
        let mut store = store();
        // "1" is taken in llamas only, so tigers may still receive it.
        store.create("llamas", record(json!({"id": "1"}))).unwrap();
        let tiger = store.create("tigers", Record::new()).unwrap();
        assert_eq!(tiger.get("id"), Some(&json!("1")));
    }

    #[test]
    fn uuid_strategy_generates_uuids() {
        let mut store = store().with_id_strategy(IdStrategy::Uuid);
        assert_eq!(store.id_strategy(), IdStrategy::Uuid);
        let created = store.create("tigers", Record::new()).unwrap();
        let id = created.get("id").and_then(Value::as_str).unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn create_rejects_invalid_identifier_type() {
        let mut store = store();
        assert_eq!(
            store.create("tigers", record(json!({"id": true}))).unwrap_err(),
            StoreError::InvalidIdentifier { field: "id".into() }
        );
        assert_eq!(store.len("tigers").unwrap(), 0);
    }

    #[test]
    fn create_in_unknown_collection() {
        let mut store = store();
        assert_eq!(
            store.create("elephants", Record::new()).unwrap_err(),
            StoreError::UnknownCollection("elephants".into())
        );
    }

    // -----------------------------------------------------------------------
    // Find
    // -----------------------------------------------------------------------

    #[test]
    fn find_all_in_insertion_order() {
        let mut store = store();
        let t1 = store.create("tigers", record(json!({"name": "Tony"}))).unwrap().clone();
        let t2 = store.create("tigers", record(json!({"name": "Tigger"}))).unwrap().clone();
        let t3 = store.create("tigers", record(json!({"name": "Shere Khan"}))).unwrap().clone();

        assert_eq!(store.find_all("tigers").unwrap(), vec![t1, t2, t3]);
        assert!(store.find_all("llamas").unwrap().is_empty());
    }

    #[test]
    fn find_all_is_a_snapshot() {
        let mut store = store();
        store.create("tigers", record(json!({"id": "1"}))).unwrap();
        let mut snapshot = store.find_all("tigers").unwrap();
        snapshot.clear();
        assert_eq!(store.len("tigers").unwrap(), 1);
    }

    #[test]
    fn find_by_identifier() {
        let mut store = store();
        store.create("tigers", record(json!({"name": "Tony", "id": "1"}))).unwrap();
        assert_eq!(
            store.find("tigers", "1").unwrap(),
            &record(json!({"name": "Tony", "id": "1"}))
        );
        assert_eq!(
            store.find("tigers", "2").unwrap_err(),
            StoreError::NotFound { collection: "tigers".into(), id: "2".into() }
        );
    }

    #[test]
    fn find_with_empty_identifier_is_not_found() {
        let mut store = store();
        store.create("tigers", record(json!({"id": "1"}))).unwrap();
        assert!(matches!(store.find("tigers", ""), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn find_in_unknown_collection() {
        let store = store();
        assert_eq!(
            store.find("elephants", "1").unwrap_err(),
            StoreError::UnknownCollection("elephants".into())
        );
        assert!(store.find_all("elephants").is_err());
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[test]
    fn update_merges_all_but_identifier() {
        let mut store = store();
        store.create("tigers", record(json!({"name": "Tony", "id": "1"}))).unwrap();
        store.create("tigers", record(json!({"name": "Tigger", "id": "2"}))).unwrap();

        let updated = store
            .update("tigers", "1", record(json!({"name": "Baloney", "id": "2", "sells": "Sandwiches"})))
            .unwrap()
            .clone();
        assert_eq!(
            updated,
            record(json!({"name": "Baloney", "id": "1", "sells": "Sandwiches"}))
        );
        assert_eq!(store.find("tigers", "1").unwrap(), &updated);
        assert_eq!(store.find("tigers", "2").unwrap().get("name"), Some(&json!("Tigger")));
    }

    #[test]
    fn update_missing_record() {
        let mut store = store();
        assert_eq!(
            store.update("tigers", "4", record(json!({"name": "x"}))).unwrap_err(),
            StoreError::NotFound { collection: "tigers".into(), id: "4".into() }
        );
        assert!(matches!(
            store.update("elephants", "4", Record::new()),
            Err(StoreError::UnknownCollection(_))
        ));
    }

    // -----------------------------------------------------------------------
    // Remove
    // -----------------------------------------------------------------------

    #[test]
    fn remove_reports_presence() {
        let mut store = store();
        store.create("tigers", record(json!({"id": "1"}))).unwrap();
        store.create("tigers", record(json!({"id": "2"}))).unwrap();
        assert!(store.remove("tigers", "1").unwrap());
        assert!(!store.remove("tigers", "1").unwrap());
        assert_eq!(store.len("tigers").unwrap(), 1);
        assert!(store.find("tigers", "1").is_err());
    }
}
