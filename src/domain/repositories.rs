//! Repository trait definitions
//!
//! These traits define the contract for data access of the plain CRUD
//! entities. Implementations live in the infrastructure layer. Orders are
//! not behind a trait: their mutations run through the lifecycle service
//! inside a transaction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DomainError;
use super::status::{Availability, ProductStatus};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Zero-based page index for the paginator
    pub fn index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Product data for API responses
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub code_product: String,
    pub price: f64,
    pub stock: i32,
    pub availability: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Filter criteria for product queries
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub status: Option<ProductStatus>,
    pub availability: Option<Availability>,
    pub page: PageRequest,
}

#[derive(Debug)]
pub struct PaginatedProducts {
    pub products: Vec<Product>,
    pub total: u64,
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub code_product: String,
    pub price: f64,
    pub stock: i32,
    pub status: Option<String>,
}

impl CreateProductInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("name is required".to_string()));
        }
        if self.code_product.trim().is_empty() {
            return Err(DomainError::Validation(
                "code_product is required".to_string(),
            ));
        }
        if self.price <= 0.0 {
            return Err(DomainError::Validation(
                "price must be greater than 0".to_string(),
            ));
        }
        if self.stock < 0 {
            return Err(DomainError::Validation(
                "stock cannot be negative".to_string(),
            ));
        }
        if let Some(status) = &self.status {
            ProductStatus::parse(status)?;
        }
        Ok(())
    }
}

/// Input for updating a product
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub code_product: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub status: Option<String>,
}

impl UpdateProductInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(DomainError::Validation("name cannot be empty".to_string()));
        }
        if matches!(self.price, Some(price) if price <= 0.0) {
            return Err(DomainError::Validation(
                "price must be greater than 0".to_string(),
            ));
        }
        if matches!(self.stock, Some(stock) if stock < 0) {
            return Err(DomainError::Validation(
                "stock cannot be negative".to_string(),
            ));
        }
        if let Some(status) = &self.status {
            ProductStatus::parse(status)?;
        }
        Ok(())
    }
}

/// Repository trait for Product entity
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find live products matching the filter, one page at a time
    async fn find_all(&self, filter: ProductFilter) -> Result<PaginatedProducts, DomainError>;

    /// Find a live product by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError>;

    /// Create a new product; availability is derived from stock
    async fn create(&self, input: CreateProductInput) -> Result<Product, DomainError>;

    /// Update a product; availability is re-derived from stock
    async fn update(&self, id: i32, input: UpdateProductInput) -> Result<Product, DomainError>;

    /// Soft-delete a product
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Table data for API responses
#[derive(Debug, Clone, Serialize)]
pub struct DiningTable {
    pub id: i32,
    pub name: String,
    pub available: bool,
}

#[derive(Debug, Default, Clone)]
pub struct TableFilter {
    pub available_only: bool,
    pub page: PageRequest,
}

#[derive(Debug)]
pub struct PaginatedTables {
    pub tables: Vec<DiningTable>,
    pub total: u64,
}

/// Repository trait for the seating tables
#[async_trait]
pub trait TableRepository: Send + Sync {
    async fn find_all(&self, filter: TableFilter) -> Result<PaginatedTables, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<DiningTable>, DomainError>;

    /// Create a new, free table
    async fn create(&self, name: String) -> Result<DiningTable, DomainError>;
}

/// Payment method data for API responses
#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethod {
    pub id: i32,
    pub name: String,
}

#[async_trait]
pub trait PaymentMethodRepository: Send + Sync {
    /// Find all payment methods that are switched on
    async fn find_active(&self) -> Result<Vec<PaymentMethod>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults_and_bounds() {
        let page = PageRequest::new(None, None);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, DEFAULT_PAGE_SIZE);

        let page = PageRequest::new(Some(0), Some(1000));
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 100);

        assert_eq!(PageRequest::new(Some(1), Some(10)).total_pages(21), 3);
        assert_eq!(PageRequest::new(Some(1), Some(10)).total_pages(0), 0);

        assert_eq!(PageRequest::new(Some(3), None).index(), 2);
        let raw = PageRequest { page: 0, limit: 10 };
        assert_eq!(raw.index(), 0);
    }

    #[test]
    fn test_create_product_validation() {
        let mut input = CreateProductInput {
            name: "Latte".to_string(),
            code_product: "HBEV-002".to_string(),
            price: 2.99,
            stock: 50,
            status: None,
        };
        assert!(input.validate().is_ok());

        input.stock = -1;
        assert!(matches!(input.validate(), Err(DomainError::Validation(_))));

        input.stock = 1;
        input.status = Some("Archived".to_string());
        assert!(input.validate().is_err());
    }
}
