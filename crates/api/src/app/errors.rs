use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use invoicer_infra::InvoiceDocumentError;

pub const INVOICE_NOT_FOUND: &str = "Invoice not found";

pub fn document_error_to_response(err: InvoiceDocumentError) -> axum::response::Response {
    match err {
        InvoiceDocumentError::NotFound => not_found(INVOICE_NOT_FOUND),
        other => {
            tracing::error!(error = %other, "invoice render failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, other.code(), other.to_string())
        }
    }
}

/// `404` with a bare `{"error": message}` body.
pub fn not_found(message: &'static str) -> axum::response::Response {
    (StatusCode::NOT_FOUND, axum::Json(json!({ "error": message }))).into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
