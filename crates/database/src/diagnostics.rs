//! Connectivity diagnostic: open the store, list its collections, close it.

use natter_config::DatabaseConfig;
use tracing::info;

use crate::connection::{open_existing, redact};
use crate::store::Backend;
use crate::types::DatabaseResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityReport {
    pub backend: Backend,
    pub collections: Vec<String>,
}

/// Open a dedicated connection, enumerate collections, and close it again.
///
/// The connection never outlives this call, even when listing fails. A SQLite
/// file that does not exist yet is reported as a connection error.
pub async fn check_connectivity(config: &DatabaseConfig) -> DatabaseResult<ConnectivityReport> {
    info!(url = %redact(&config.url), "checking document store connectivity");

    let store = open_existing(config).await?;
    let collections = store.list_collections().await;
    store.close().await;

    let collections = collections?;
    info!(
        backend = %store.backend(),
        collections = collections.len(),
        "document store reachable"
    );

    Ok(ConnectivityReport {
        backend: store.backend(),
        collections,
    })
}
