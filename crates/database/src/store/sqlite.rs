//! SQLite-backed document store.
//!
//! Documents are stored as JSON text keyed by `(collection, id)`. Collections
//! are registered the first time a document is written to them.

use chrono::Utc;
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use super::{strip_identity, ID_FIELD};
use crate::types::{DatabaseError, DatabaseResult, Document};

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list(&self, collection: &str) -> DatabaseResult<Vec<Document>> {
        let rows = sqlx::query(
            "SELECT id, body FROM documents WHERE collection = ? ORDER BY seq ASC",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| decode(row.get("id"), row.get("body")))
            .collect()
    }

    pub async fn insert(&self, collection: &str, document: Document) -> DatabaseResult<Document> {
        let mut document = document;
        strip_identity(&mut document);

        let id = cuid2::cuid();
        let body = serde_json::to_string(&document)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT OR IGNORE INTO collections (name, created_at) VALUES (?, ?)")
            .bind(collection)
            .bind(Utc::now().to_rfc3339())
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(&id)
            .bind(&body)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        document.insert(ID_FIELD.to_string(), Value::String(id));
        Ok(document)
    }

    pub async fn find(&self, collection: &str, id: &str) -> DatabaseResult<Option<Document>> {
        let row = sqlx::query("SELECT id, body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| decode(row.get("id"), row.get("body")))
            .transpose()
    }

    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> DatabaseResult<Option<Document>> {
        let mut tx = self.pool.begin().await?;

        // Take the write lock before reading; a WAL read snapshot cannot be
        // upgraded once another writer has committed.
        let rows = sqlx::query(
            "UPDATE documents SET body = body WHERE collection = ? AND id = ? RETURNING body",
        )
        .bind(collection)
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let mut document = parse_body(row.get("body"))?;
        let mut patch = patch;
        strip_identity(&mut patch);
        document.extend(patch);

        sqlx::query("UPDATE documents SET body = ? WHERE collection = ? AND id = ?")
            .bind(serde_json::to_string(&document)?)
            .bind(collection)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        Ok(Some(document))
    }

    pub async fn delete(&self, collection: &str, id: &str) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_collections(&self) -> DatabaseResult<Vec<String>> {
        let registered: i64 = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'collections')",
        )
        .fetch_one(&self.pool)
        .await?;
        if registered == 0 {
            return Ok(Vec::new());
        }

        let names = sqlx::query_scalar::<_, String>("SELECT name FROM collections ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    pub async fn ping(&self) -> DatabaseResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn parse_body(body: String) -> DatabaseResult<Document> {
    match serde_json::from_str::<Value>(&body)? {
        Value::Object(map) => Ok(map),
        other => Err(DatabaseError::SerializationError(format!(
            "stored document is not an object: {other}"
        ))),
    }
}

fn decode(id: String, body: String) -> DatabaseResult<Document> {
    let mut document = parse_body(body)?;
    document.insert(ID_FIELD.to_string(), Value::String(id));
    Ok(document)
}
