/// Errors from collection store and association graph operations.
///
/// Every variant is deterministic and local to a single call: none of them
/// describes a transient condition, and the store is left unchanged whenever
/// one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The collection name was not registered when the store was built.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// A record with this identifier already exists in the collection.
    #[error("duplicated identifier in {collection}: {id}")]
    DuplicateIdentifier { collection: String, id: String },

    /// No record in the collection has this identifier.
    #[error("record not found in {collection}: {id}")]
    NotFound { collection: String, id: String },

    /// An association references a record that does not exist.
    #[error("invalid association endpoint in {collection}: {id}")]
    InvalidAssociationEndpoint { collection: String, id: String },

    /// The identifier field holds a value that cannot serve as an identifier.
    #[error("identifier field `{field}` must be a string or a number")]
    InvalidIdentifier { field: String },

    /// A record cannot be associated with itself.
    #[error("cannot associate {collection}/{id} with itself")]
    SelfAssociation { collection: String, id: String },

    /// A store needs at least one collection.
    #[error("at least one collection name is required")]
    NoCollections,

    /// The same collection name was registered twice.
    #[error("duplicate collection name: {0}")]
    DuplicateCollection(String),

    /// The identifier field name is empty.
    #[error("identifier field name must not be empty")]
    EmptyIdField,
}

impl StoreError {
    pub(crate) fn unknown_collection(collection: &str) -> Self {
        Self::UnknownCollection(collection.to_string())
    }

    pub(crate) fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
