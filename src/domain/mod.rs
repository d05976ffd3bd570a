//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no Axum, no entities).
//! Error types, status vocabularies, repository traits and the order
//! state machine.

pub mod errors;
pub mod order_state;
pub mod repositories;
pub mod status;

pub use errors::DomainError;
pub use repositories::*;
pub use status::{Availability, KitchenStatus, PaymentStatus, ProductStatus};
