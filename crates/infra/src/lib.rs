//! Infrastructure for the invoice service: stores, configuration, seeding,
//! and the fetch-then-render operation.

pub mod config;
pub mod read_model;
pub mod rendering;
pub mod seed;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{AppConfig, StoreConfig};
pub use rendering::{InvoiceDocumentError, InvoiceDocumentRenderer};
