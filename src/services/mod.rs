//! Services Layer
//!
//! The order engine: stock and table bookkeeping, order codes, item
//! reconciliation and the lifecycle controller, plus the order service
//! that HTTP handlers call.

pub mod order_code;
pub mod order_items;
pub mod order_lifecycle;
pub mod order_service;
pub mod stock_ledger;
pub mod table_occupancy;

pub use order_service::{
    OrderDetail, OrderFilter, OrderItemDetail, PaginatedOrders, UpdateOrderRequest,
};
