use axum::Router;

pub mod invoices;
pub mod system;

pub fn router() -> Router {
    Router::new().nest("/invoice", invoices::router())
}
