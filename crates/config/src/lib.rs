use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "natter.toml",
    "config/natter.toml",
    "crates/config/natter.toml",
    "../natter.toml",
    "../config/natter.toml",
    "../crates/config/natter.toml",
];

/// Connection string variable consulted after every other source.
pub const CONNECTION_STRING_VAR: &str = "MONGODB_URI";

/// Document store used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Document store settings.
///
/// The scheme of `url` selects the backend: `mongodb://` and `mongodb+srv://`
/// talk to MongoDB, `sqlite:` keeps documents in a local SQLite file.
///
/// ```
/// use natter_config::DatabaseConfig;
///
/// let database = DatabaseConfig::default();
/// assert_eq!(database.url, "mongodb://localhost:27017");
/// assert_eq!(database.name, "natter");
/// assert_eq!(database.connect_timeout_seconds, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "DatabaseConfig::default_name")]
    pub name: String,
    pub max_connections: u32,
    #[serde(default = "DatabaseConfig::default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl DatabaseConfig {
    fn default_name() -> String {
        "natter".to_string()
    }

    const fn default_connect_timeout() -> u64 {
        10
    }

    /// Convenience constructor used by tests and tooling that only care about the URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            name: Self::default_name(),
            max_connections: 10,
            connect_timeout_seconds: Self::default_connect_timeout(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use natter_config::load;
///
/// std::env::remove_var("NATTER_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let connect_timeout =
        i64::try_from(defaults.database.connect_timeout_seconds).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())
        .and_then(|b| b.set_default("http.port", i64::from(defaults.http.port)))
        .and_then(|b| b.set_default("database.url", defaults.database.url.clone()))
        .and_then(|b| b.set_default("database.name", defaults.database.name.clone()))
        .and_then(|b| {
            b.set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )
        })
        .and_then(|b| b.set_default("database.connect_timeout_seconds", connect_timeout))
        .context("unable to register configuration defaults")?;

    let environment_overrides = config::Environment::with_prefix("NATTER").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("NATTER_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via NATTER_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if let Ok(url) = std::env::var(CONNECTION_STRING_VAR) {
        let url = url.trim();
        if !url.is_empty() {
            debug!(var = CONNECTION_STRING_VAR, "database url taken from environment");
            config.database.url = url.to_string();
        }
    }

    if config.database.max_connections == 0 {
        anyhow::bail!("invalid configuration: database.max_connections must be at least 1");
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
