use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::tables::list_tables,
        api::tables::create_table,
        api::payments::list_payment_methods,
        api::products::list_products,
        api::products::create_product,
        api::products::get_product,
        api::products::update_product,
        api::products::delete_product,
        api::orders::list_orders,
        api::orders::create_order,
        api::orders::get_order,
        api::orders::update_order,
        api::orders::delete_order,
    ),
    tags(
        (name = "resto-pos", description = "Restaurant point-of-sale API")
    )
)]
pub struct ApiDoc;
