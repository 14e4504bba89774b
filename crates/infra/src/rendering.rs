//! Fetch-then-render: the single operation behind `GET /invoice/:id`.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use invoicer_core::InvoiceId;
use invoicer_invoicing::{RenderError, RenderedDocument, render_invoice};

use crate::read_model::{InvoiceStore, StoreError};

#[derive(Debug, Error)]
pub enum InvoiceDocumentError {
    /// No record for the requested id. Malformed ids land here too.
    #[error("Invoice not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to read logo asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl InvoiceDocumentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Stable machine-readable code for error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Store(_) => "store_error",
            Self::Asset { .. } => "asset_error",
            Self::Render(_) => "render_error",
        }
    }
}

/// Looks up an invoice and renders it with the logo read from disk.
///
/// The logo is read on every call; nothing is cached between requests.
#[derive(Clone)]
pub struct InvoiceDocumentRenderer {
    store: Arc<dyn InvoiceStore>,
    logo_path: PathBuf,
}

impl InvoiceDocumentRenderer {
    pub fn new(store: Arc<dyn InvoiceStore>, logo_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            logo_path: logo_path.into(),
        }
    }

    #[instrument(skip(self), fields(invoice_id = %raw_id))]
    pub async fn render(&self, raw_id: &str) -> Result<RenderedDocument, InvoiceDocumentError> {
        let id: InvoiceId = raw_id
            .parse()
            .map_err(|_| InvoiceDocumentError::NotFound)?;

        let record = self
            .store
            .find_invoice_by_id(&id)
            .await?
            .ok_or(InvoiceDocumentError::NotFound)?;

        let logo = tokio::fs::read(&self.logo_path)
            .await
            .map_err(|source| InvoiceDocumentError::Asset {
                path: self.logo_path.clone(),
                source,
            })?;

        let document = render_invoice(&record, &logo)?;
        info!(bytes = document.len(), "rendered invoice");
        Ok(document)
    }
}

impl std::fmt::Debug for InvoiceDocumentRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceDocumentRenderer")
            .field("logo_path", &self.logo_path)
            .finish_non_exhaustive()
    }
}
