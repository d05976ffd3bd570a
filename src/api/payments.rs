use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use super::error_response;
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/payments",
    responses((status = 200, description = "Active payment methods"))
)]
pub async fn list_payment_methods(State(state): State<AppState>) -> impl IntoResponse {
    match state.payment_method_repo.find_active().await {
        Ok(methods) => Json(json!({
            "success": true,
            "payment_methods": methods
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}
