//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{PaymentMethodRepository, ProductRepository, TableRepository};
use crate::infrastructure::{
    SeaOrmPaymentMethodRepository, SeaOrmProductRepository, SeaOrmTableRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Order handlers run the lifecycle services directly on the connection
    db: DatabaseConnection,
    pub product_repo: Arc<dyn ProductRepository>,
    pub table_repo: Arc<dyn TableRepository>,
    pub payment_method_repo: Arc<dyn PaymentMethodRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            product_repo: Arc::new(SeaOrmProductRepository::new(db.clone())),
            table_repo: Arc::new(SeaOrmTableRepository::new(db.clone())),
            payment_method_repo: Arc::new(SeaOrmPaymentMethodRepository::new(db.clone())),
            db,
        }
    }
}

impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
