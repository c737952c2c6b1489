use anyhow::{Context, Result};
use natter_config::AppConfig;
use natter_database::{connect, redact, DocumentStore};
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    /// Install the global fmt subscriber; `RUST_LOG` overrides the `info` default.
    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Process-wide handles, created once at startup.
#[derive(Clone)]
pub struct BackendServices {
    pub store: DocumentStore,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let store = connect(&config.database).await.with_context(|| {
            format!(
                "failed to connect to document store at {}",
                redact(&config.database.url)
            )
        })?;

        info!(backend = %store.backend(), "document store ready");
        Ok(Self { store })
    }

    pub async fn shutdown(&self) {
        self.store.close().await;
        info!("document store connection closed");
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
