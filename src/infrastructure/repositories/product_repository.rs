//! SeaORM implementation of ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::{
    Availability, CreateProductInput, DomainError, PaginatedProducts, Product, ProductFilter,
    ProductRepository, ProductStatus, UpdateProductInput,
};
use crate::models::product::{ActiveModel, Column, Entity as ProductEntity, Model};

/// SeaORM-based implementation of ProductRepository
pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_live(&self, id: i32) -> Result<Option<Model>, DomainError> {
        Ok(ProductEntity::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await?)
    }
}

/// Live product read for a write in the same transaction
async fn lock_live<C: ConnectionTrait>(db: &C, id: i32) -> Result<Model, DomainError> {
    ProductEntity::find_by_id(id)
        .filter(Column::DeletedAt.is_null())
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("product", id))
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self, filter: ProductFilter) -> Result<PaginatedProducts, DomainError> {
        let mut query = ProductEntity::find().filter(Column::DeletedAt.is_null());

        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status.as_str()));
        }

        if let Some(availability) = filter.availability {
            query = query.filter(Column::Availability.eq(availability.as_str()));
        }

        let paginator = query
            .order_by_asc(Column::Name)
            .paginate(&self.db, filter.page.limit);
        let total = paginator.num_items().await?;
        let products = paginator.fetch_page(filter.page.index()).await?;

        Ok(PaginatedProducts {
            products: products.into_iter().map(Product::from).collect(),
            total,
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        Ok(self.find_live(id).await?.map(Product::from))
    }

    async fn create(&self, input: CreateProductInput) -> Result<Product, DomainError> {
        input.validate()?;

        let status = match input.status.as_deref() {
            Some(status) => ProductStatus::parse(status)?,
            None => ProductStatus::Active,
        };
        let now = Utc::now().to_rfc3339();

        let product = ActiveModel {
            name: Set(input.name.trim().to_string()),
            code_product: Set(input.code_product.trim().to_string()),
            price: Set(input.price),
            stock: Set(input.stock),
            availability: Set(Availability::for_stock(input.stock).as_str().to_string()),
            status: Set(status.as_str().to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!("Created product {} ({})", product.id, product.name);

        Ok(product.into())
    }

    async fn update(&self, id: i32, input: UpdateProductInput) -> Result<Product, DomainError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let existing = lock_live(&txn, id).await?;
        let mut active: ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(code) = input.code_product {
            active.code_product = Set(code.trim().to_string());
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(status) = input.status.as_deref() {
            active.status = Set(ProductStatus::parse(status)?.as_str().to_string());
        }
        // Stock is only written when restocked here; orders move it through the ledger
        if let Some(stock) = input.stock {
            active.stock = Set(stock);
            active.availability = Set(Availability::for_stock(stock).as_str().to_string());
        }
        active.updated_at = Set(Utc::now().to_rfc3339());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;
        let existing = lock_live(&txn, id).await?;

        let now = Utc::now().to_rfc3339();
        let mut active: ActiveModel = existing.into();
        active.deleted_at = Set(Some(now.clone()));
        active.updated_at = Set(now);
        active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!("Soft-deleted product {}", id);
        Ok(())
    }
}
