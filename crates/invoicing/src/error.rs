use thiserror::Error;

use invoicer_core::DomainError;

/// Failure while turning an invoice record into a document.
///
/// None of these are recoverable at the request boundary.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("logo decode failed: {0}")]
    Logo(#[from] image::ImageError),

    #[error("pdf serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("pdf write failed: {0}")]
    Io(#[from] std::io::Error),
}
