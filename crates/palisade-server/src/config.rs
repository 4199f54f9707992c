//! Configuration for the palisade-server daemon.

use serde::Deserialize;

use palisade_ingest::FeedSchedule;
use palisade_store::{CategorySpec, MemoryStore, StoreError};

/// Top-level server configuration.
///
/// Loaded from the `[server]` table of `palisade.toml`, with feed
/// schedules and category seeds nested as `[[server.feeds]]` and
/// `[[server.categories]]`. Environment overrides use the `PALISADE__`
/// prefix, e.g. `PALISADE__SERVER__LISTEN_ADDR`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Expiry sweep interval in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Slug of the holding category feed indicators land in.
    #[serde(default = "default_holding_category")]
    pub holding_category: String,

    /// Feed pull schedules.
    #[serde(default)]
    pub feeds: Vec<FeedSchedule>,

    /// Categories created at startup (beyond the holding category).
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
}

/// A category declared in the config file.
///
/// Expiration is given in hours here because that is how operators
/// think about block windows; it is converted to seconds exactly once,
/// in [`CategorySeed::into_spec`]. Seconds are the canonical unit
/// everywhere past this boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    pub name: String,
    pub label: String,

    #[serde(default)]
    pub description: String,

    /// Hours until indicators in this category expire.
    #[serde(default)]
    pub expiration_hours: Option<u32>,

    #[serde(default)]
    pub auto_cleanup: bool,
}

impl CategorySeed {
    /// Convert the seed into a store spec. The hours → seconds
    /// conversion happens here and nowhere else.
    pub fn into_spec(self) -> CategorySpec {
        CategorySpec {
            name: self.name,
            label: self.label,
            description: self.description,
            color: "#607d8b".to_string(),
            icon: "shield".to_string(),
            is_default: false,
            expiration_secs: self.expiration_hours.map(|h| h * 3600),
            auto_cleanup: self.auto_cleanup,
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8484".to_string()
}

fn default_sweep_interval() -> u64 {
    30
}

fn default_holding_category() -> String {
    "sources".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            sweep_interval_secs: default_sweep_interval(),
            holding_category: default_holding_category(),
            feeds: Vec::new(),
            categories: Vec::new(),
        }
    }
}

/// Create the holding category and the configured seed categories.
/// Returns the holding category's store record.
pub fn seed_store(
    store: &MemoryStore,
    config: &ServerConfig,
) -> Result<palisade_core::types::Category, StoreError> {
    let holding = store.create_category(CategorySpec {
        name: config.holding_category.clone(),
        label: "Ingested sources".to_string(),
        description: "Holding pen for feed indicators pending promotion".to_string(),
        color: "#607d8b".to_string(),
        icon: "rss".to_string(),
        is_default: true,
        expiration_secs: None,
        auto_cleanup: false,
    })?;

    for seed in &config.categories {
        match store.create_category(seed.clone().into_spec()) {
            Ok(category) => {
                tracing::info!(category = %category.name, "Seed category created");
            }
            Err(StoreError::CategoryNameTaken { name }) => {
                tracing::warn!(category = %name, "Seed category already exists, skipping");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(holding)
}

/// Load the server configuration from file + environment.
pub fn load(file_prefix: &str) -> anyhow::Result<ServerConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("PALISADE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    from_config(cfg)
}

/// A missing `[server]` table means run on defaults; a malformed one
/// is an error the operator has to see, not a silent fallback.
fn from_config(cfg: config::Config) -> anyhow::Result<ServerConfig> {
    match cfg.get::<ServerConfig>("server") {
        Ok(c) => Ok(c),
        Err(config::ConfigError::NotFound(_)) => Ok(ServerConfig::default()),
        Err(e) => Err(e.into()),
    }
}
