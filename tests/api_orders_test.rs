use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use resto_pos::{db, seed, server};
use serde_json::{Value, json};
use tower::util::ServiceExt;

async fn setup_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    seed::seed_demo_data(&db).await.expect("Failed to seed");
    server::build_router(db, &[])
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = setup_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_order_flow_over_http() {
    let app = setup_app().await;

    let (status, body) = send(&app, "POST", "/api/tables", Some(json!({"name": "Patio"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let table_id = body["table"]["id"].as_i64().unwrap();
    assert_eq!(body["table"]["available"], true);

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "name": "Flat White",
            "code_product": "HBEV-010",
            "price": 2.5,
            "stock": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = body["product"]["id"].as_i64().unwrap();
    assert_eq!(body["product"]["availability"], "In Stock");

    let new_order = json!({
        "name": "Alice",
        "table_id": table_id,
        "order_items": [{"product_id": product_id, "quantity": 3}]
    });
    let (status, body) = send(&app, "POST", "/api/orders", Some(new_order.clone())).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["success"], true);
    assert_eq!(body["order"]["code_order"], "ORD0001");
    assert_eq!(body["order"]["table_name"], "Patio");
    assert_eq!(body["order"]["subtotal"], 7.5);
    assert_eq!(body["order"]["total"], 8.25);
    let order_id = body["order"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "POST", "/api/orders", Some(new_order)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Patio is already reserved");

    let uri = format!("/api/products/{}", product_id);
    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body["product"]["stock"], 7);

    let (status, body) = send(&app, "GET", "/api/payments", None).await;
    assert_eq!(status, StatusCode::OK);
    let cash_id = body["payment_methods"][0]["id"].as_i64().unwrap();
    assert_eq!(body["payment_methods"][0]["name"], "Cash");

    let order_uri = format!("/api/orders/{}", order_id);
    let (status, body) = send(
        &app,
        "PUT",
        &order_uri,
        Some(json!({"payment_method_id": cash_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["order"]["status_payment"], "Completed");
    assert_eq!(body["order"]["status_kitchen"], "Ready To Serve");
    assert_eq!(body["order"]["payment_method"], "Cash");

    let (_, body) = send(&app, "GET", "/api/tables?available=true&limit=100", None).await;
    let free: Vec<i64> = body["tables"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["id"].as_i64())
        .collect();
    assert!(free.contains(&table_id));

    let (status, body) = send(&app, "DELETE", &order_uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, "GET", "/api/orders?status_payment=Completed", None).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_order_errors_map_to_status_codes() {
    let app = setup_app().await;

    let (status, _) = send(&app, "GET", "/api/orders/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({"name": "Bob", "table_id": 1, "order_items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // Seeded "Coca Cola" (BEV-001) has no stock
    let (_, body) = send(&app, "GET", "/api/products?availability=Out%20Of%20Stock", None).await;
    let cola_id = body["products"][0]["id"].as_i64().unwrap();
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "name": "Bob",
            "table_id": 1,
            "order_items": [{"product_id": cola_id, "quantity": 1}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "insufficient stock for product Coca Cola");

    let (status, _) = send(&app, "GET", "/api/orders?status_payment=Paid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_crud() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "name": "Orange Juice",
            "code_product": "BEV-020",
            "price": 3.0,
            "stock": 20
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["product"]["status"], "Active");
    let uri = format!("/api/products/{}", body["product"]["id"]);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"stock": 3}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["availability"], "Low Stock");

    let (status, _) = send(&app, "PUT", &uri, Some(json!({"price": -1.0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "GET", "/api/products?status=Archived", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
