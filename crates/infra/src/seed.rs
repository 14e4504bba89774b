//! Loading invoice records from a JSON seed file.
//!
//! The file holds a JSON array of records in the same camelCase shape the
//! records serialize to. Seeding upserts, so re-running it is harmless.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use invoicer_invoicing::InvoiceRecord;

use crate::read_model::InvoiceStore;

pub fn parse_seed(json: &str) -> anyhow::Result<Vec<InvoiceRecord>> {
    serde_json::from_str(json).context("seed file is not a JSON array of invoice records")
}

/// Upsert every record from `path` into `store`, returning how many were loaded.
pub async fn load_seed_file(store: &dyn InvoiceStore, path: &Path) -> anyhow::Result<usize> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let records = parse_seed(&json)?;

    let count = records.len();
    for record in records {
        let id = record.id.clone();
        store
            .upsert_invoice(record)
            .await
            .with_context(|| format!("failed to seed invoice {id}"))?;
    }

    info!(path = %path.display(), count, "seeded invoices");
    Ok(count)
}
