//! Document store backends.
//!
//! [`DocumentStore`] dispatches to one concrete backend chosen at connect time.
//! Every backend exposes documents as JSON objects whose identifier lives under
//! the `id` key, whatever the native representation is.

pub mod mongo;
pub mod sqlite;

use std::fmt;

pub use mongo::MongoStore;
pub use sqlite::SqliteStore;

use crate::types::{DatabaseResult, Document};

/// Key under which every document exposes its identifier.
pub const ID_FIELD: &str = "id";

/// Which kind of store a [`DocumentStore`] talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    MongoDb,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::MongoDb => "mongodb",
        }
    }

    /// Pick the backend from a connection string's scheme.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
            Some(Backend::MongoDb)
        } else if url.starts_with("sqlite:") {
            Some(Backend::Sqlite)
        } else {
            None
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide handle to the document store. Cloning is cheap.
#[derive(Clone)]
pub enum DocumentStore {
    Sqlite(SqliteStore),
    Mongo(MongoStore),
}

impl DocumentStore {
    pub fn backend(&self) -> Backend {
        match self {
            DocumentStore::Sqlite(_) => Backend::Sqlite,
            DocumentStore::Mongo(_) => Backend::MongoDb,
        }
    }

    /// All documents of a collection. A collection that was never written is empty.
    pub async fn list(&self, collection: &str) -> DatabaseResult<Vec<Document>> {
        match self {
            DocumentStore::Sqlite(store) => store.list(collection).await,
            DocumentStore::Mongo(store) => store.list(collection).await,
        }
    }

    /// Persist a new document and return it with its generated `id`.
    pub async fn insert(&self, collection: &str, document: Document) -> DatabaseResult<Document> {
        match self {
            DocumentStore::Sqlite(store) => store.insert(collection, document).await,
            DocumentStore::Mongo(store) => store.insert(collection, document).await,
        }
    }

    pub async fn find(&self, collection: &str, id: &str) -> DatabaseResult<Option<Document>> {
        match self {
            DocumentStore::Sqlite(store) => store.find(collection, id).await,
            DocumentStore::Mongo(store) => store.find(collection, id).await,
        }
    }

    /// Overwrite the patch's top-level fields on the stored document.
    ///
    /// Returns `None` when no document has this id.
    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> DatabaseResult<Option<Document>> {
        match self {
            DocumentStore::Sqlite(store) => store.update(collection, id, patch).await,
            DocumentStore::Mongo(store) => store.update(collection, id, patch).await,
        }
    }

    /// Returns whether a document was removed.
    pub async fn delete(&self, collection: &str, id: &str) -> DatabaseResult<bool> {
        match self {
            DocumentStore::Sqlite(store) => store.delete(collection, id).await,
            DocumentStore::Mongo(store) => store.delete(collection, id).await,
        }
    }

    /// Names of the collections that currently exist, sorted.
    pub async fn list_collections(&self) -> DatabaseResult<Vec<String>> {
        match self {
            DocumentStore::Sqlite(store) => store.list_collections().await,
            DocumentStore::Mongo(store) => store.list_collections().await,
        }
    }

    pub async fn ping(&self) -> DatabaseResult<()> {
        match self {
            DocumentStore::Sqlite(store) => store.ping().await,
            DocumentStore::Mongo(store) => store.ping().await,
        }
    }

    pub async fn close(&self) {
        match self {
            DocumentStore::Sqlite(store) => store.close().await,
            DocumentStore::Mongo(store) => store.close().await,
        }
    }
}

/// Identity is owned by the store; callers never choose or change it.
pub(crate) fn strip_identity(document: &mut Document) {
    document.remove(ID_FIELD);
    document.remove("_id");
}
