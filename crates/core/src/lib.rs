//! `invoicer-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, and the locale-fixed formatters used
//! when an invoice is drawn.

pub mod dates;
pub mod error;
pub mod id;
pub mod money;

pub use dates::{format_long_date, net_terms};
pub use error::{DomainError, DomainResult};
pub use id::InvoiceId;
pub use money::{Currency, format_currency};
