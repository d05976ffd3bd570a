//! Status vocabularies stored as text columns

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

/// Products at or below this stock count are labelled "Low Stock"
pub const LOW_STOCK_THRESHOLD: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "In Process")]
    InProcess,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::InProcess => "In Process",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse a stored or submitted value. An empty value is the unset
    /// status, which behaves as "In Process".
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim() {
            "" | "In Process" => Ok(PaymentStatus::InProcess),
            "Completed" => Ok(PaymentStatus::Completed),
            "Cancelled" => Ok(PaymentStatus::Cancelled),
            other => Err(DomainError::Validation(format!(
                "unknown payment status '{}'",
                other
            ))),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PaymentStatus::InProcess)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KitchenStatus {
    #[serde(rename = "In The Kitchen")]
    InTheKitchen,
    #[serde(rename = "Cooking Now")]
    CookingNow,
    #[serde(rename = "Ready To Serve")]
    ReadyToServe,
}

impl KitchenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KitchenStatus::InTheKitchen => "In The Kitchen",
            KitchenStatus::CookingNow => "Cooking Now",
            KitchenStatus::ReadyToServe => "Ready To Serve",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim() {
            "" | "In The Kitchen" => Ok(KitchenStatus::InTheKitchen),
            "Cooking Now" => Ok(KitchenStatus::CookingNow),
            "Ready To Serve" => Ok(KitchenStatus::ReadyToServe),
            other => Err(DomainError::Validation(format!(
                "unknown kitchen status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for KitchenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock-derived label shown next to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out Of Stock")]
    OutOfStock,
}

impl Availability {
    pub fn for_stock(stock: i32) -> Self {
        if stock <= 0 {
            Availability::OutOfStock
        } else if stock <= LOW_STOCK_THRESHOLD {
            Availability::LowStock
        } else {
            Availability::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::InStock => "In Stock",
            Availability::LowStock => "Low Stock",
            Availability::OutOfStock => "Out Of Stock",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim() {
            "In Stock" => Ok(Availability::InStock),
            "Low Stock" => Ok(Availability::LowStock),
            "Out Of Stock" => Ok(Availability::OutOfStock),
            other => Err(DomainError::Validation(format!(
                "unknown availability '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    Active,
    Inactive,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Active",
            ProductStatus::Inactive => "Inactive",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim() {
            "Active" => Ok(ProductStatus::Active),
            "Inactive" => Ok(ProductStatus::Inactive),
            other => Err(DomainError::Validation(format!(
                "unknown product status '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_thresholds() {
        assert_eq!(Availability::for_stock(0), Availability::OutOfStock);
        assert_eq!(Availability::for_stock(1), Availability::LowStock);
        assert_eq!(Availability::for_stock(5), Availability::LowStock);
        assert_eq!(Availability::for_stock(6), Availability::InStock);
    }

    #[test]
    fn test_unset_payment_status_is_in_process() {
        assert_eq!(PaymentStatus::parse("").unwrap(), PaymentStatus::InProcess);
        assert_eq!(
            PaymentStatus::parse("Cancelled").unwrap(),
            PaymentStatus::Cancelled
        );
        assert!(PaymentStatus::parse("Refunded").is_err());
    }

    #[test]
    fn test_kitchen_status_round_trips_through_text() {
        for status in [
            KitchenStatus::InTheKitchen,
            KitchenStatus::CookingNow,
            KitchenStatus::ReadyToServe,
        ] {
            assert_eq!(KitchenStatus::parse(status.as_str()).unwrap(), status);
        }
    }
}
