//! Seating table handlers

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use super::error_response;
use crate::domain::{PageRequest, TableFilter};
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize)]
pub struct ListTablesQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Only free tables
    pub available: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTableRequest {
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/tables",
    responses((status = 200, description = "Paginated tables"))
)]
pub async fn list_tables(
    State(state): State<AppState>,
    Query(query): Query<ListTablesQuery>,
) -> impl IntoResponse {
    let page = PageRequest::new(query.page, query.limit);
    let filter = TableFilter {
        available_only: query.available.unwrap_or(false),
        page,
    };

    match state.table_repo.find_all(filter).await {
        Ok(result) => Json(json!({
            "success": true,
            "tables": result.tables,
            "total": result.total,
            "page": page.page,
            "total_pages": page.total_pages(result.total)
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/tables",
    responses(
        (status = 201, description = "Table created"),
        (status = 400, description = "Missing name")
    )
)]
pub async fn create_table(
    State(state): State<AppState>,
    Json(payload): Json<CreateTableRequest>,
) -> impl IntoResponse {
    match state.table_repo.create(payload.name).await {
        Ok(table) => (
            StatusCode::CREATED,
            Json(json!({"success": true, "table": table})),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
