//! Runtime configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_LOGO_PATH: &str = "public/logotext.png";

/// Which invoice store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
    /// Logo image, resolved against the working directory when relative.
    pub logo_path: PathBuf,
    /// Optional JSON file of invoice records loaded at startup.
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// - `BIND_ADDR` (default `0.0.0.0:8080`)
    /// - `USE_PERSISTENT_STORES` (`true` selects Postgres, default `false`)
    /// - `DATABASE_URL` (required when persistent)
    /// - `LOGO_PATH` (default `public/logotext.png`)
    /// - `INVOICE_SEED_PATH` (optional)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:8080")?;

        let use_persistent = match lookup("USE_PERSISTENT_STORES") {
            Some(v) => v
                .trim()
                .parse::<bool>()
                .context("USE_PERSISTENT_STORES must be true or false")?,
            None => false,
        };

        let store = if use_persistent {
            match lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
                Some(database_url) => StoreConfig::Postgres { database_url },
                None => bail!("DATABASE_URL must be set when USE_PERSISTENT_STORES=true"),
            }
        } else {
            StoreConfig::InMemory
        };

        let logo_path = lookup("LOGO_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGO_PATH));

        let seed_path = lookup("INVOICE_SEED_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            store,
            logo_path,
            seed_path,
        })
    }
}
