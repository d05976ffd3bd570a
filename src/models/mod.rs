pub mod dining_table;
pub mod order;
pub mod order_item;
pub mod payment_method;
pub mod product;

pub use order::Model as Order;
pub use order_item::OrderItemDto;
