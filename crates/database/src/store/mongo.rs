//! MongoDB-backed document store.

use std::time::Duration;

use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document as BsonDocument};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use serde_json::Value;
use tracing::info;

use natter_config::DatabaseConfig;

use super::{strip_identity, ID_FIELD};
use crate::types::{DatabaseError, DatabaseResult, Document};

const MONGO_ID_FIELD: &str = "_id";

#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Connect and verify the deployment answers a `ping`.
    ///
    /// A database named in the connection string wins over `config.name`.
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let mut options = ClientOptions::parse(&config.url)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        let timeout = Duration::from_secs(config.connect_timeout_seconds);
        options.connect_timeout.get_or_insert(timeout);
        options.server_selection_timeout.get_or_insert(timeout);
        options.max_pool_size = Some(config.max_connections);
        options.app_name.get_or_insert_with(|| "natter".to_string());

        let database_name = options
            .default_database
            .clone()
            .unwrap_or_else(|| config.name.clone());

        let client = Client::with_options(options)
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
        let database = client.database(&database_name);

        let store = Self { client, database };
        store.ping().await?;

        info!(database = %database_name, "mongodb connection established");
        Ok(store)
    }

    fn collection(&self, name: &str) -> Collection<BsonDocument> {
        self.database.collection::<BsonDocument>(name)
    }

    pub async fn list(&self, collection: &str) -> DatabaseResult<Vec<Document>> {
        let cursor = self.collection(collection).find(doc! {}).await?;
        let documents: Vec<BsonDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(into_json).collect())
    }

    pub async fn insert(&self, collection: &str, document: Document) -> DatabaseResult<Document> {
        let mut document = document;
        strip_identity(&mut document);

        let mut record = from_json(&document)?;
        record.insert(MONGO_ID_FIELD, ObjectId::new());

        self.collection(collection).insert_one(record.clone()).await?;
        Ok(into_json(record))
    }

    pub async fn find(&self, collection: &str, id: &str) -> DatabaseResult<Option<Document>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let found = self
            .collection(collection)
            .find_one(doc! { "_id": oid })
            .await?;
        Ok(found.map(into_json))
    }

    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> DatabaseResult<Option<Document>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let mut patch = patch;
        strip_identity(&mut patch);
        if patch.is_empty() {
            return self.find(collection, id).await;
        }

        let updated = self
            .collection(collection)
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": from_json(&patch)? })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.map(into_json))
    }

    pub async fn delete(&self, collection: &str, id: &str) -> DatabaseResult<bool> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };

        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": oid })
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn list_collections(&self) -> DatabaseResult<Vec<String>> {
        let mut names: Vec<String> = self
            .database
            .list_collection_names()
            .await?
            .into_iter()
            .filter(|name| !name.starts_with("system."))
            .collect();
        names.sort();
        Ok(names)
    }

    pub async fn ping(&self) -> DatabaseResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
        Ok(())
    }

    pub async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}

/// Ids that are not ObjectIds can never match a stored document.
fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

fn from_json(document: &Document) -> DatabaseResult<BsonDocument> {
    bson::to_document(document).map_err(|e| DatabaseError::SerializationError(e.to_string()))
}

fn into_json(mut record: BsonDocument) -> Document {
    let id = match record.remove(MONGO_ID_FIELD) {
        Some(Bson::ObjectId(oid)) => Some(Value::String(oid.to_hex())),
        Some(other) => Some(other.into_relaxed_extjson()),
        None => None,
    };

    let mut document = match Bson::Document(record).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Document::new(),
    };

    if let Some(id) = id {
        document.insert(ID_FIELD.to_string(), id);
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_ids_never_parse() {
        assert!(parse_id("not-an-object-id").is_none());
        assert!(parse_id("").is_none());
        assert!(parse_id("65f1c0ffee0000000000beef").is_some());
    }

    #[test]
    fn object_ids_are_exposed_as_hex_strings() {
        let oid = ObjectId::new();
        let record = doc! { "_id": oid, "username": "alice" };

        let document = into_json(record);

        assert_eq!(document.get("id"), Some(&json!(oid.to_hex())));
        assert_eq!(document.get("username"), Some(&json!("alice")));
        assert!(!document.contains_key("_id"));
    }

    #[test]
    fn json_documents_convert_to_bson() {
        let Value::Object(document) = json!({ "title": "hi", "likes": 3, "draft": false }) else {
            unreachable!()
        };

        let record = from_json(&document).expect("convert");

        assert_eq!(record.get_str("title").ok(), Some("hi"));
        assert_eq!(record.get_bool("draft").ok(), Some(false));
    }
}
