//! Invoicing domain module.
//!
//! Turns a stored invoice record into a single-page PDF. Everything here is
//! deterministic and free of IO: callers hand in the record and the logo
//! bytes, and get back the serialized document.
//!
//! The pipeline is load → draw → serialize:
//! - [`layout::InvoiceLayout::from_record`] formats the record into blocks,
//! - [`layout::InvoiceLayout::draw`] stacks the blocks and places the footer,
//! - [`pdf::write_pdf`] writes the drawn page with `lopdf`.

pub mod document;
pub mod error;
pub mod invoice;
pub mod layout;
pub mod logo;
pub mod pdf;

pub use document::{RenderedDocument, render_invoice};
pub use error::RenderError;
pub use invoice::{InvoiceRecord, LineItem, PartyDetails};
pub use layout::{FooterPlacement, InvoiceLayout, Page};
pub use logo::Logo;
