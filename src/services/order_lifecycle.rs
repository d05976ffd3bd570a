//! Order Lifecycle Controller
//!
//! Create, update and delete of orders, each in a single transaction. The
//! state machine in `domain::order_state` decides which table and stock
//! effects a mutation has; this module applies them around the order row
//! write. Any error drops the transaction uncommitted, which rolls back
//! the order, its items, the stock adjustments and the table flags.

use chrono::Utc;
use sea_orm::*;

use crate::domain::order_state::{
    Effect, OrderChange, OrderState, plan_create, plan_delete, plan_update,
};
use crate::domain::{DomainError, KitchenStatus, PaymentStatus};
use crate::models::order::{self, Entity as Order};
use crate::models::order_item::OrderItemDto;
use crate::models::payment_method::Entity as PaymentMethod;
use crate::services::order_code::next_order_code;
use crate::services::order_items;
use crate::services::table_occupancy::{ensure_table_available, set_table_status};

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub name: String,
    pub table_id: i32,
    /// Tax rate in percent
    pub tax: f64,
    pub items: Vec<OrderItemDto>,
}

/// Full desired state of an existing order, already merged with the
/// persisted one by the caller.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub id: i32,
    pub name: String,
    pub table_id: i32,
    pub payment_method_id: Option<i32>,
    pub payment_status: PaymentStatus,
    pub kitchen_status: KitchenStatus,
    pub items: Vec<OrderItemDto>,
}

pub async fn find_live_order<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
) -> Result<order::Model, DomainError> {
    Order::find_by_id(order_id)
        .filter(order::Column::DeletedAt.is_null())
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("order", order_id))
}

async fn ensure_payment_method_usable<C: ConnectionTrait>(
    db: &C,
    payment_method_id: i32,
) -> Result<(), DomainError> {
    let method = PaymentMethod::find_by_id(payment_method_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("payment method", payment_method_id))?;

    if !method.status {
        return Err(DomainError::Validation(format!(
            "payment method {} is not active",
            method.name
        )));
    }
    Ok(())
}

async fn apply_effect<C: ConnectionTrait>(db: &C, effect: Effect) -> Result<(), DomainError> {
    match effect {
        Effect::EnsureTableAvailable(table_id) => {
            ensure_table_available(db, table_id).await?;
        }
        Effect::ReleaseTable(table_id) => set_table_status(db, table_id, true).await?,
        Effect::OccupyTable(table_id) => set_table_status(db, table_id, false).await?,
        Effect::RestoreItemStock(order_id) => {
            order_items::restore_items_stock(db, order_id).await?
        }
        Effect::RemoveItems(order_id) => order_items::remove_items(db, order_id).await?,
    }
    Ok(())
}

async fn apply_effects<C: ConnectionTrait>(db: &C, effects: &[Effect]) -> Result<(), DomainError> {
    for effect in effects {
        apply_effect(db, *effect).await?;
    }
    Ok(())
}

/// Open a new order: check the table, assign a code, persist the order
/// and its items (consuming stock), then occupy the table.
pub async fn create(db: &DatabaseConnection, new: NewOrder) -> Result<order::Model, DomainError> {
    let plan = plan_create(new.table_id);
    let txn = db.begin().await?;

    apply_effects(&txn, &plan.before_save).await?;

    let code_order = next_order_code(&txn).await?;
    let now = Utc::now().to_rfc3339();

    let order = order::ActiveModel {
        table_id: Set(new.table_id),
        name: Set(new.name),
        code_order: Set(code_order),
        tax: Set(new.tax),
        payment_method_id: Set(None),
        status_payment: Set(PaymentStatus::InProcess.as_str().to_owned()),
        status_kitchen: Set(KitchenStatus::InTheKitchen.as_str().to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    // Submitted ids mean nothing for a fresh order
    for line in &new.items {
        let line = OrderItemDto { id: None, ..line.clone() };
        order_items::create_item(&txn, order.id, &line).await?;
    }

    apply_effects(&txn, &plan.after_save).await?;
    txn.commit().await?;

    tracing::info!(
        "Created order {} ({}) on table {} with {} item(s)",
        order.id,
        order.code_order,
        order.table_id,
        new.items.len()
    );

    Ok(order)
}

/// Apply a merged update: statuses, table move, cancellation and the
/// submitted item list.
pub async fn update(
    db: &DatabaseConnection,
    req: OrderUpdate,
) -> Result<order::Model, DomainError> {
    let txn = db.begin().await?;

    let prior = find_live_order(&txn, req.id).await?;
    if let Some(payment_method_id) = req.payment_method_id {
        ensure_payment_method_usable(&txn, payment_method_id).await?;
    }

    let prev = prior.state()?;
    let change = OrderChange {
        table_id: req.table_id,
        payment_method_id: req.payment_method_id,
        payment_status: req.payment_status,
        kitchen_status: req.kitchen_status,
    };
    let plan = plan_update(&prev, &change)?;

    apply_effects(&txn, &plan.before_save).await?;

    let payment_method_id = req.payment_method_id.or(prior.payment_method_id);
    let mut active: order::ActiveModel = prior.into();
    active.name = Set(req.name);
    active.table_id = Set(req.table_id);
    active.payment_method_id = Set(payment_method_id);
    active.status_payment = Set(plan.payment_status.as_str().to_owned());
    active.status_kitchen = Set(plan.kitchen_status.as_str().to_owned());
    active.updated_at = Set(Utc::now().to_rfc3339());
    let order = active.update(&txn).await?;

    apply_effects(&txn, &plan.after_save).await?;

    if plan.sync_items {
        let keep = order_items::apply_items(&txn, order.id, &req.items).await?;
        let removed = order_items::reconcile_items(&txn, order.id, &keep).await?;
        if removed > 0 {
            tracing::debug!("Order {}: removed {} item(s)", order.id, removed);
        }
    }

    txn.commit().await?;

    tracing::info!(
        "Updated order {} ({}): payment '{}', kitchen '{}' (was '{}')",
        order.id,
        order.code_order,
        order.status_payment,
        order.status_kitchen,
        prev.payment_status
    );

    Ok(order)
}

/// Soft-delete an order after giving back its items' stock and, for an
/// open order, its table.
///
/// `precondition` sees the order as locked inside the transaction; the
/// calling layer uses it to enforce its deletion policy.
pub async fn delete<F>(
    db: &DatabaseConnection,
    order_id: i32,
    precondition: F,
) -> Result<(), DomainError>
where
    F: FnOnce(&OrderState) -> Result<(), DomainError>,
{
    let txn = db.begin().await?;

    let order = find_live_order(&txn, order_id).await?;
    let state = order.state()?;
    precondition(&state)?;

    apply_effects(&txn, &plan_delete(&state)).await?;

    let now = Utc::now().to_rfc3339();
    let code_order = order.code_order.clone();
    let mut active: order::ActiveModel = order.into();
    active.deleted_at = Set(Some(now.clone()));
    active.updated_at = Set(now);
    active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!("Deleted order {} ({})", order_id, code_order);

    Ok(())
}
