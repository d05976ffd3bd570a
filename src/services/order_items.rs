//! Order Item Reconciler and per-item stock hooks
//!
//! Every item write goes through `create_item`, `update_item` or
//! `delete_item`, which apply the matching stock adjustment in the same
//! connection (normally the enclosing order transaction).

use chrono::Utc;
use sea_orm::*;
use std::collections::{HashMap, HashSet};

use crate::domain::{DomainError, ProductStatus};
use crate::models::order_item::{self, Entity as OrderItem, OrderItemDto};
use crate::models::product::{self, Entity as Product};
use crate::services::stock_ledger::adjust_stock;

fn check_quantity(quantity: i32) -> Result<(), DomainError> {
    if quantity <= 0 {
        return Err(DomainError::Validation(format!(
            "quantity must be greater than 0, got {}",
            quantity
        )));
    }
    Ok(())
}

/// A product that may be put on an order: present, not deleted, active.
async fn sellable_product<C: ConnectionTrait>(
    db: &C,
    product_id: i32,
) -> Result<product::Model, DomainError> {
    let product = Product::find_by_id(product_id)
        .filter(product::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("product", product_id))?;

    if product.status != ProductStatus::Active.as_str() {
        return Err(DomainError::Validation(format!(
            "product {} is not active",
            product.name
        )));
    }

    Ok(product)
}

pub async fn items_of_order<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
) -> Result<Vec<order_item::Model>, DomainError> {
    Ok(OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await?)
}

/// Insert a line and consume its quantity from stock.
pub async fn create_item<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
    line: &OrderItemDto,
) -> Result<order_item::Model, DomainError> {
    check_quantity(line.quantity)?;
    let product = sellable_product(db, line.product_id).await?;
    let now = Utc::now().to_rfc3339();

    let item = order_item::ActiveModel {
        order_id: Set(order_id),
        product_id: Set(product.id),
        quantity: Set(line.quantity),
        sub_total: Set(product.price * f64::from(line.quantity)),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    adjust_stock(db, item.product_id, -item.quantity).await?;

    Ok(item)
}

/// Rewrite a persisted line, moving stock by the difference.
///
/// When the product changes, the old product gets its full quantity back
/// and the new one is charged the full new quantity.
pub async fn update_item<C: ConnectionTrait>(
    db: &C,
    current: order_item::Model,
    line: &OrderItemDto,
) -> Result<order_item::Model, DomainError> {
    check_quantity(line.quantity)?;

    if current.product_id == line.product_id && current.quantity == line.quantity {
        return Ok(current);
    }

    let product = if current.product_id == line.product_id {
        let delta = line.quantity - current.quantity;
        if delta > 0 {
            sellable_product(db, line.product_id).await?;
        }
        adjust_stock(db, line.product_id, -delta).await?
    } else {
        sellable_product(db, line.product_id).await?;
        adjust_stock(db, current.product_id, current.quantity).await?;
        adjust_stock(db, line.product_id, -line.quantity).await?
    };

    let mut active: order_item::ActiveModel = current.into();
    active.product_id = Set(product.id);
    active.quantity = Set(line.quantity);
    active.sub_total = Set(product.price * f64::from(line.quantity));
    active.updated_at = Set(Utc::now().to_rfc3339());

    Ok(active.update(db).await?)
}

/// Remove a line and give its quantity back to stock.
pub async fn delete_item<C: ConnectionTrait>(
    db: &C,
    item: &order_item::Model,
) -> Result<(), DomainError> {
    OrderItem::delete_by_id(item.id).exec(db).await?;
    adjust_stock(db, item.product_id, item.quantity).await?;

    tracing::debug!(
        "Removed item {} of order {} ({} x product {})",
        item.id,
        item.order_id,
        item.quantity,
        item.product_id
    );

    Ok(())
}

/// Create or update every submitted line, returning the ids to keep.
///
/// Must run before `reconcile_items`, otherwise freshly created lines
/// would be missing from the keep set and removed again.
pub async fn apply_items<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
    lines: &[OrderItemDto],
) -> Result<Vec<i32>, DomainError> {
    let mut persisted: HashMap<i32, order_item::Model> = items_of_order(db, order_id)
        .await?
        .into_iter()
        .map(|item| (item.id, item))
        .collect();

    let mut keep = Vec::with_capacity(lines.len());

    for line in lines {
        let item = match line.id {
            Some(id) => {
                let current = persisted.remove(&id).ok_or_else(|| {
                    if keep.contains(&id) {
                        DomainError::Validation(format!("order item {} submitted twice", id))
                    } else {
                        DomainError::not_found("order item", id)
                    }
                })?;
                update_item(db, current, line).await?
            }
            None => create_item(db, order_id, line).await?,
        };
        keep.push(item.id);
    }

    Ok(keep)
}

/// Delete every persisted item of the order that is not in `keep_ids`.
pub async fn reconcile_items<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
    keep_ids: &[i32],
) -> Result<usize, DomainError> {
    let keep: HashSet<i32> = keep_ids.iter().copied().collect();
    let mut removed = 0;

    for item in items_of_order(db, order_id).await? {
        if !keep.contains(&item.id) {
            delete_item(db, &item).await?;
            removed += 1;
        }
    }

    Ok(removed)
}

/// Give back the stock of every item of the order. Rows stay in place.
pub async fn restore_items_stock<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
) -> Result<(), DomainError> {
    for item in items_of_order(db, order_id).await? {
        adjust_stock(db, item.product_id, item.quantity).await?;
    }
    Ok(())
}

/// Delete every item of the order, restoring stock for each.
pub async fn remove_items<C: ConnectionTrait>(db: &C, order_id: i32) -> Result<(), DomainError> {
    for item in items_of_order(db, order_id).await? {
        delete_item(db, &item).await?;
    }
    Ok(())
}
