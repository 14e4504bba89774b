use tracing::debug;

use crate::error::RenderError;
use crate::invoice::InvoiceRecord;
use crate::layout::InvoiceLayout;
use crate::logo::Logo;
use crate::pdf::write_pdf;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Serialized single-page PDF produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    bytes: Vec<u8>,
}

impl RenderedDocument {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn content_type(&self) -> &'static str {
        PDF_CONTENT_TYPE
    }
}

/// Draw `record` with the PNG `logo_png` and serialize it.
pub fn render_invoice(record: &InvoiceRecord, logo_png: &[u8]) -> Result<RenderedDocument, RenderError> {
    let logo = Logo::from_png(logo_png)?;
    let page = InvoiceLayout::from_record(record)?.draw();
    debug!(
        invoice_id = %record.id,
        content_bottom_mm = page.content_bottom,
        footer = ?page.footer,
        "invoice page laid out"
    );

    let bytes = write_pdf(&page, &logo)?;
    Ok(RenderedDocument { bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::fixtures::design_work_invoice;
    use crate::logo::fixtures::logo_png;

    #[test]
    fn renders_non_empty_pdf() {
        let doc = render_invoice(&design_work_invoice(), &logo_png()).unwrap();
        assert!(!doc.is_empty());
        assert!(doc.as_bytes().starts_with(b"%PDF-"));
        assert_eq!(doc.content_type(), "application/pdf");
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let record = design_work_invoice();
        let logo = logo_png();
        let first = render_invoice(&record, &logo).unwrap();
        let second = render_invoice(&record, &logo).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bad_logo_fails_before_drawing() {
        let err = render_invoice(&design_work_invoice(), b"\x89PNG broken").unwrap_err();
        assert!(matches!(err, RenderError::Logo(_)));
    }
}
