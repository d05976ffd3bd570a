//! Repository implementations using SeaORM

pub mod payment_method_repository;
pub mod product_repository;
pub mod table_repository;

pub use payment_method_repository::SeaOrmPaymentMethodRepository;
pub use product_repository::SeaOrmProductRepository;
pub use table_repository::SeaOrmTableRepository;
