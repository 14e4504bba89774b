//! Invoice record storage (the data-access layer).

pub mod postgres;
pub mod store;

pub use postgres::PostgresInvoiceStore;
pub use store::{InMemoryInvoiceStore, InvoiceStore, StoreError};
