use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Path},
    http::header,
    response::IntoResponse,
    routing::get,
};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/:invoice_id", get(get_invoice_pdf))
}

/// Render the stored invoice as an inline PDF.
pub async fn get_invoice_pdf(
    Extension(services): Extension<Arc<AppServices>>,
    Path(invoice_id): Path<String>,
) -> axum::response::Response {
    match services.renderer.render(&invoice_id).await {
        Ok(document) => (
            [
                (header::CONTENT_TYPE, document.content_type()),
                (header::CONTENT_DISPOSITION, "inline"),
            ],
            document.into_bytes(),
        )
            .into_response(),
        Err(e) => errors::document_error_to_response(e),
    }
}
