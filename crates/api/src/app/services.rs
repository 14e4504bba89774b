use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use invoicer_infra::config::{AppConfig, StoreConfig};
use invoicer_infra::read_model::{InMemoryInvoiceStore, InvoiceStore, PostgresInvoiceStore};
use invoicer_infra::seed::load_seed_file;
use invoicer_infra::InvoiceDocumentRenderer;

/// Everything the handlers need, shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub renderer: InvoiceDocumentRenderer,
}

impl AppServices {
    pub fn new(store: Arc<dyn InvoiceStore>, logo_path: impl Into<PathBuf>) -> Self {
        Self {
            renderer: InvoiceDocumentRenderer::new(store, logo_path),
        }
    }
}

/// Select the store, apply the seed file if configured, and build the renderer.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let store: Arc<dyn InvoiceStore> = match &config.store {
        StoreConfig::InMemory => {
            tracing::info!("using in-memory invoice store");
            Arc::new(InMemoryInvoiceStore::new())
        }
        StoreConfig::Postgres { database_url } => {
            tracing::info!("using postgres invoice store");
            let store = PostgresInvoiceStore::connect(database_url)
                .await
                .context("failed to connect to postgres")?;
            store
                .ensure_schema()
                .await
                .context("failed to create invoices table")?;
            Arc::new(store)
        }
    };

    if let Some(seed_path) = &config.seed_path {
        load_seed_file(store.as_ref(), seed_path).await?;
    }

    if !tokio::fs::try_exists(&config.logo_path).await.unwrap_or(false) {
        tracing::warn!(
            path = %config.logo_path.display(),
            "logo file not found; renders will fail until it exists"
        );
    }

    Ok(AppServices::new(store, config.logo_path.clone()))
}
