//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! Every error raised inside an order transaction aborts that transaction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Referenced order, table, product, item or payment method does not exist
    #[error("{0} not found")]
    NotFound(String),
    /// Caller-level input rejected before any state change
    #[error("Validation error: {0}")]
    Validation(String),
    /// Target table is occupied by another open order
    #[error("{0} is already reserved")]
    TableReserved(String),
    /// A stock adjustment would drive a product below zero
    #[error("insufficient stock for product {0}")]
    InsufficientStock(String),
    /// The last order code could not be parsed into a sequence number
    #[error("failed to parse last order code number: {0}")]
    CodeParse(String),
    /// Operation not permitted in the entity's current status
    #[error("{0}")]
    InvalidState(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        DomainError::NotFound(format!("{} {}", entity, id))
    }
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        assert_eq!(
            DomainError::not_found("order", 12).to_string(),
            "order 12 not found"
        );
        assert_eq!(
            DomainError::TableReserved("Table 3".to_string()).to_string(),
            "Table 3 is already reserved"
        );
        assert_eq!(
            DomainError::InsufficientStock("Latte".to_string()).to_string(),
            "insufficient stock for product Latte"
        );
    }
}
