pub mod health;
pub mod orders;
pub mod payments;
pub mod products;
pub mod tables;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Tables
        .route("/tables", get(tables::list_tables).post(tables::create_table))
        // Payment methods
        .route("/payments", get(payments::list_payment_methods))
        // Products
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Orders
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/:id",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .with_state(state)
}

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Validation(_) | DomainError::InvalidState(_) => StatusCode::BAD_REQUEST,
        DomainError::TableReserved(_) | DomainError::InsufficientStock(_) => StatusCode::CONFLICT,
        DomainError::CodeParse(_) | DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `{"success": false, "error": ...}` with the status matching the error kind
pub fn error_response(err: DomainError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
    }

    (
        status,
        Json(json!({
            "success": false,
            "error": err.to_string()
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            status_for(&DomainError::not_found("order", 3)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::TableReserved("Table 1".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::InsufficientStock("Latte".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::InvalidState("closed".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::CodeParse("ORDX".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
