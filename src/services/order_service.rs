//! Order Service - request validation and read models around the lifecycle
//!
//! Handlers call this layer. It checks caller-level rules, merges partial
//! update requests onto the stored order and builds the detail/list views.
//! All writes are delegated to `order_lifecycle`.

use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::domain::order_state::ensure_deletable;
use crate::domain::{DomainError, KitchenStatus, PageRequest, PaymentStatus};
use crate::models::dining_table::Entity as Table;
use crate::models::order::{self, DEFAULT_TAX, Entity as Order};
use crate::models::order_item::{self, Entity as OrderItem, OrderItemDto};
use crate::models::payment_method::Entity as PaymentMethod;
use crate::models::product::Entity as Product;
use crate::services::order_lifecycle::{self, NewOrder, OrderUpdate};
use crate::services::order_items::items_of_order;

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub name: Option<String>,
    pub table_id: Option<i32>,
    pub payment_method_id: Option<i32>,
    pub status_payment: Option<String>,
    pub status_kitchen: Option<String>,
    /// Full replacement item list. Omit to leave the items untouched.
    pub order_items: Option<Vec<OrderItemDto>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDetail {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub price: f64,
    pub quantity: i32,
    pub sub_total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    pub id: i32,
    pub code_order: String,
    pub name: String,
    pub table_id: i32,
    pub table_name: String,
    pub payment_method_id: Option<i32>,
    pub payment_method: Option<String>,
    pub status_payment: String,
    pub status_kitchen: String,
    pub items: Vec<OrderItemDetail>,
    pub subtotal: f64,
    /// Tax rate in percent
    pub tax: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Filter parameters for listing orders
#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    /// Customer name prefix
    pub name: Option<String>,
    pub code_order: Option<String>,
    pub status_payment: Option<PaymentStatus>,
    pub page: PageRequest,
}

#[derive(Debug)]
pub struct PaginatedOrders {
    pub orders: Vec<order::Model>,
    pub total: u64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::Validation("name is required".to_string()));
    }
    Ok(())
}

fn validate_lines(lines: &[OrderItemDto]) -> Result<(), DomainError> {
    if lines.is_empty() {
        return Err(DomainError::Validation(
            "order must contain at least one item".to_string(),
        ));
    }
    if let Some(line) = lines.iter().find(|line| line.quantity <= 0) {
        return Err(DomainError::Validation(format!(
            "quantity for product {} must be greater than 0",
            line.product_id
        )));
    }
    Ok(())
}

/// Open an order for a customer seated at `table_id`.
pub async fn create_order(
    db: &DatabaseConnection,
    name: &str,
    table_id: i32,
    items: Vec<OrderItemDto>,
) -> Result<order::Model, DomainError> {
    validate_name(name)?;
    validate_lines(&items)?;

    order_lifecycle::create(
        db,
        NewOrder {
            name: name.trim().to_string(),
            table_id,
            tax: DEFAULT_TAX,
            items,
        },
    )
    .await
}

/// Merge `req` onto the stored order and run the update.
pub async fn update_order(
    db: &DatabaseConnection,
    order_id: i32,
    req: UpdateOrderRequest,
) -> Result<order::Model, DomainError> {
    let prior = order_lifecycle::find_live_order(db, order_id).await?;

    let name = req.name.unwrap_or_else(|| prior.name.clone());
    validate_name(&name)?;

    let payment_status = match req.status_payment.as_deref() {
        Some(status) => PaymentStatus::parse(status)?,
        None => prior.payment_status()?,
    };
    let kitchen_status = match req.status_kitchen.as_deref() {
        Some(status) => KitchenStatus::parse(status)?,
        None => prior.kitchen_status()?,
    };

    let items = match req.order_items {
        Some(lines) => {
            validate_lines(&lines)?;
            lines
        }
        None => items_of_order(db, order_id)
            .await?
            .into_iter()
            .map(|item| OrderItemDto {
                id: Some(item.id),
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect(),
    };

    order_lifecycle::update(
        db,
        OrderUpdate {
            id: order_id,
            name: name.trim().to_string(),
            table_id: req.table_id.unwrap_or(prior.table_id),
            payment_method_id: req.payment_method_id,
            payment_status,
            kitchen_status,
            items,
        },
    )
    .await
}

/// Delete an order that is still "In Process".
pub async fn delete_order(db: &DatabaseConnection, order_id: i32) -> Result<(), DomainError> {
    order_lifecycle::delete(db, order_id, |state| {
        let allowed = ensure_deletable(state);
        if let Err(e) = &allowed {
            tracing::warn!("Refusing to delete order {}: {}", order_id, e);
        }
        allowed
    })
    .await
}

pub async fn get_order_detail(
    db: &DatabaseConnection,
    order_id: i32,
) -> Result<OrderDetail, DomainError> {
    let order = Order::find_by_id(order_id)
        .filter(order::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("order", order_id))?;

    let table_name = Table::find_by_id(order.table_id)
        .one(db)
        .await?
        .map(|t| t.name)
        .unwrap_or_default();

    let payment_method = match order.payment_method_id {
        Some(id) => PaymentMethod::find_by_id(id).one(db).await?.map(|m| m.name),
        None => None,
    };

    let rows = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order.id))
        .order_by_asc(order_item::Column::Id)
        .find_also_related(Product)
        .all(db)
        .await?;

    let items: Vec<OrderItemDetail> = rows
        .into_iter()
        .map(|(item, product)| {
            let (product_name, price) = product
                .map(|p| (p.name, p.price))
                .unwrap_or_default();
            OrderItemDetail {
                id: item.id,
                product_id: item.product_id,
                product_name,
                price,
                quantity: item.quantity,
                sub_total: round2(item.sub_total),
            }
        })
        .collect();

    let subtotal: f64 = items.iter().map(|i| i.sub_total).sum();
    let tax_amount = subtotal * order.tax / 100.0;

    Ok(OrderDetail {
        id: order.id,
        code_order: order.code_order,
        name: order.name,
        table_id: order.table_id,
        table_name,
        payment_method_id: order.payment_method_id,
        payment_method,
        status_payment: order.status_payment,
        status_kitchen: order.status_kitchen,
        items,
        subtotal: round2(subtotal),
        tax: order.tax,
        tax_amount: round2(tax_amount),
        total: round2(subtotal + tax_amount),
        created_at: order.created_at,
        updated_at: order.updated_at,
    })
}

/// List live orders, newest first.
pub async fn list_orders(
    db: &DatabaseConnection,
    filter: OrderFilter,
) -> Result<PaginatedOrders, DomainError> {
    let mut condition = Condition::all().add(order::Column::DeletedAt.is_null());

    if let Some(name) = filter.name.as_deref().map(str::trim)
        && !name.is_empty()
    {
        condition = condition.add(order::Column::Name.starts_with(name));
    }

    if let Some(code) = filter.code_order.as_deref().map(str::trim)
        && !code.is_empty()
    {
        condition = condition.add(order::Column::CodeOrder.eq(code));
    }

    if let Some(status) = filter.status_payment {
        condition = condition.add(order::Column::StatusPayment.eq(status.as_str()));
    }

    let paginator = Order::find()
        .filter(condition)
        .order_by_desc(order::Column::Id)
        .paginate(db, filter.page.limit);

    let total = paginator.num_items().await?;
    let orders = paginator.fetch_page(filter.page.index()).await?;

    Ok(PaginatedOrders { orders, total })
}
