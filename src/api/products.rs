//! Product API handlers using repository pattern

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use super::error_response;
use crate::domain::{
    Availability, CreateProductInput, DomainError, PageRequest, ProductFilter, ProductStatus,
    UpdateProductInput,
};
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub availability: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Paginated live products"),
        (status = 400, description = "Unknown status or availability filter")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> impl IntoResponse {
    let page = PageRequest::new(query.page, query.limit);

    let status = match query.status.as_deref().map(ProductStatus::parse).transpose() {
        Ok(status) => status,
        Err(e) => return error_response(e),
    };
    let availability = match query
        .availability
        .as_deref()
        .map(Availability::parse)
        .transpose()
    {
        Ok(availability) => availability,
        Err(e) => return error_response(e),
    };

    let filter = ProductFilter {
        status,
        availability,
        page,
    };

    match state.product_repo.find_all(filter).await {
        Ok(result) => Json(json!({
            "success": true,
            "products": result.products,
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
    path = "/api/products",
    responses(
        (status = 201, description = "Product created"),
        (status = 400, description = "Invalid product")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductInput>,
) -> impl IntoResponse {
    match state.product_repo.create(payload).await {
        Ok(product) => (
            StatusCode::CREATED,
            Json(json!({"success": true, "product": product})),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.product_repo.find_by_id(id).await {
        Ok(Some(product)) => Json(json!({"success": true, "product": product})).into_response(),
        Ok(None) => error_response(DomainError::not_found("product", id)),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product updated"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductInput>,
) -> impl IntoResponse {
    match state.product_repo.update(id, payload).await {
        Ok(product) => Json(json!({"success": true, "product": product})).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.product_repo.delete(id).await {
        Ok(()) => Json(json!({
            "success": true,
            "message": "Product deleted successfully"
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}
