//! Stock Ledger - signed adjustments of a product's on-hand quantity

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QuerySelect, Set};

use crate::domain::{Availability, DomainError};
use crate::models::product::{self, Entity as Product};

/// Add `delta` to a product's stock: negative consumes, positive restores.
///
/// Rejects with `InsufficientStock` when the result would be negative. The
/// availability label is re-derived from the new stock in the same write,
/// so it never goes stale after order-driven adjustments.
pub async fn adjust_stock<C: ConnectionTrait>(
    db: &C,
    product_id: i32,
    delta: i32,
) -> Result<product::Model, DomainError> {
    let product = Product::find_by_id(product_id)
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("product", product_id))?;

    let new_stock = match product.stock.checked_add(delta) {
        Some(stock) if stock >= 0 => stock,
        _ => {
            tracing::warn!(
                "Stock adjustment rejected for product {} ({}): stock {}, delta {}",
                product.id,
                product.name,
                product.stock,
                delta
            );
            return Err(DomainError::InsufficientStock(product.name));
        }
    };

    let old_stock = product.stock;
    let mut active: product::ActiveModel = product.into();
    active.stock = Set(new_stock);
    active.availability = Set(Availability::for_stock(new_stock).as_str().to_owned());
    active.updated_at = Set(Utc::now().to_rfc3339());

    let updated = active.update(db).await?;

    tracing::debug!(
        "Stock of product {} adjusted {} -> {}",
        updated.id,
        old_stock,
        updated.stock
    );

    Ok(updated)
}
