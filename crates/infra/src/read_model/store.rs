use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use invoicer_core::InvoiceId;
use invoicer_invoicing::InvoiceRecord;

/// Storage failure. Never means "not found"; a missing record is `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("invoice row {id} could not be decoded: {message}")]
    CorruptRow { id: String, message: String },

    #[error("store lock poisoned")]
    Poisoned,
}

/// Invoice lookup by identifier.
///
/// Implementations must be safe for concurrent use; every render request
/// performs one independent lookup.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn find_invoice_by_id(&self, id: &InvoiceId) -> Result<Option<InvoiceRecord>, StoreError>;

    /// Insert or replace a record (seeding, tests).
    async fn upsert_invoice(&self, record: InvoiceRecord) -> Result<(), StoreError>;
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    inner: RwLock<HashMap<InvoiceId, InvoiceRecord>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = InvoiceRecord>) -> Self {
        let map = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            inner: RwLock::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn find_invoice_by_id(&self, id: &InvoiceId) -> Result<Option<InvoiceRecord>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(id).cloned())
    }

    async fn upsert_invoice(&self, record: InvoiceRecord) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(record.id.clone(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_invoice;

    #[tokio::test]
    async fn finds_upserted_records() {
        let store = InMemoryInvoiceStore::new();
        assert!(store.is_empty());

        store.upsert_invoice(sample_invoice("inv_a")).await.unwrap();
        let found = store
            .find_invoice_by_id(&InvoiceId::new("inv_a"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.invoice_name, "Invoice #1");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn unknown_ids_are_none() {
        let store = InMemoryInvoiceStore::with_records([sample_invoice("inv_a")]);
        let missing = store
            .find_invoice_by_id(&InvoiceId::new("inv_b"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn upsert_replaces_existing_record() {
        let store = InMemoryInvoiceStore::with_records([sample_invoice("inv_a")]);
        let mut updated = sample_invoice("inv_a");
        updated.invoice_name = "Invoice #1 (revised)".to_string();
        store.upsert_invoice(updated).await.unwrap();

        let found = store
            .find_invoice_by_id(&InvoiceId::new("inv_a"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.invoice_name, "Invoice #1 (revised)");
        assert_eq!(store.len(), 1);
    }
}
