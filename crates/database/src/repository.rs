//! Typed CRUD access to one collection of the document store.

use std::marker::PhantomData;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::store::DocumentStore;
use crate::types::{DatabaseError, DatabaseResult, Document};

/// A record type that lives in its own collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Collection holding documents of this kind.
    const COLLECTION: &'static str;
}

pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Repository for one [`Entity`] kind.
///
/// Stamps `created_at` on insert and `updated_at` on every write. Patches can
/// never change `id` or `created_at`.
pub struct Repository<T> {
    store: DocumentStore,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Every document in the collection.
    pub async fn list(&self) -> DatabaseResult<Vec<T>> {
        self.store
            .list(T::COLLECTION)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<T>> {
        self.store
            .find(T::COLLECTION, id)
            .await?
            .map(from_document)
            .transpose()
    }

    pub async fn get(&self, id: &str) -> DatabaseResult<T> {
        self.find_by_id(id).await?.ok_or_else(|| not_found::<T>(id))
    }

    /// Insert a new document built from `fields` and return the stored entity.
    pub async fn create<N>(&self, fields: &N) -> DatabaseResult<T>
    where
        N: Serialize + Sync,
    {
        let mut document = to_document(fields)?;
        let now = Value::String(Utc::now().to_rfc3339());
        document.insert(CREATED_AT_FIELD.to_string(), now.clone());
        document.insert(UPDATED_AT_FIELD.to_string(), now);

        let stored = self.store.insert(T::COLLECTION, document).await?;
        debug!(collection = T::COLLECTION, "document inserted");
        from_document(stored)
    }

    /// Merge `patch` into the stored document.
    pub async fn update<P>(&self, id: &str, patch: &P) -> DatabaseResult<T>
    where
        P: Serialize + Sync,
    {
        let mut document = to_document(patch)?;
        document.remove(CREATED_AT_FIELD);
        document.insert(
            UPDATED_AT_FIELD.to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let updated = self
            .store
            .update(T::COLLECTION, id, document)
            .await?
            .ok_or_else(|| not_found::<T>(id))?;
        from_document(updated)
    }

    pub async fn delete(&self, id: &str) -> DatabaseResult<()> {
        if self.store.delete(T::COLLECTION, id).await? {
            Ok(())
        } else {
            Err(not_found::<T>(id))
        }
    }

    pub async fn count(&self) -> DatabaseResult<usize> {
        Ok(self.store.list(T::COLLECTION).await?.len())
    }
}

fn not_found<T: Entity>(id: &str) -> DatabaseError {
    DatabaseError::NotFound(format!("{}/{}", T::COLLECTION, id))
}

fn to_document<V: Serialize + ?Sized>(value: &V) -> DatabaseResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(DatabaseError::SerializationError(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

fn from_document<T: DeserializeOwned>(document: Document) -> DatabaseResult<T> {
    serde_json::from_value(Value::Object(document)).map_err(DatabaseError::from)
}
