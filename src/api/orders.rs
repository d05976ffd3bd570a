//! Order handlers. Writes go through the order service, which runs each
//! mutation in one transaction.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use super::error_response;
use crate::domain::{PageRequest, PaymentStatus};
use crate::models::OrderItemDto;
use crate::services::order_service::{self, OrderFilter, UpdateOrderRequest};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub name: String,
    pub table_id: i32,
    pub order_items: Vec<OrderItemDto>,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub name: Option<String>,
    pub code_order: Option<String>,
    pub status_payment: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Paginated live orders, newest first"),
        (status = 400, description = "Unknown payment status filter")
    )
)]
pub async fn list_orders(
    State(db): State<DatabaseConnection>,
    Query(query): Query<ListOrdersQuery>,
) -> impl IntoResponse {
    let status_payment = match query
        .status_payment
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(PaymentStatus::parse)
        .transpose()
    {
        Ok(status) => status,
        Err(e) => return error_response(e),
    };

    let page = PageRequest::new(query.page, query.limit);
    let filter = OrderFilter {
        name: query.name,
        code_order: query.code_order,
        status_payment,
        page,
    };

    match order_service::list_orders(&db, filter).await {
        Ok(result) => Json(json!({
            "success": true,
            "orders": result.orders,
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
    path = "/api/orders",
    responses(
        (status = 201, description = "Order created"),
        (status = 400, description = "Invalid order"),
        (status = 404, description = "Table or product not found"),
        (status = 409, description = "Table reserved or insufficient stock")
    )
)]
pub async fn create_order(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateOrderRequest>,
) -> impl IntoResponse {
    let created =
        order_service::create_order(&db, &payload.name, payload.table_id, payload.order_items)
            .await;

    let order = match created {
        Ok(order) => order,
        Err(e) => return error_response(e),
    };

    match order_service::get_order_detail(&db, order.id).await {
        Ok(detail) => (
            StatusCode::CREATED,
            Json(json!({"success": true, "order": detail})),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with items and totals"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match order_service::get_order_detail(&db, id).await {
        Ok(detail) => Json(json!({"success": true, "order": detail})).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order updated"),
        (status = 400, description = "Invalid change or status transition"),
        (status = 404, description = "Order, table, product or payment method not found"),
        (status = 409, description = "Table reserved or insufficient stock")
    )
)]
pub async fn update_order(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderRequest>,
) -> impl IntoResponse {
    if let Err(e) = order_service::update_order(&db, id, payload).await {
        return error_response(e);
    }

    match order_service::get_order_detail(&db, id).await {
        Ok(detail) => Json(json!({"success": true, "order": detail})).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted"),
        (status = 400, description = "Order is no longer In Process"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match order_service::delete_order(&db, id).await {
        Ok(()) => Json(json!({
            "success": true,
            "message": "Order deleted successfully"
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}
