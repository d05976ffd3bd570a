use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, KitchenStatus, PaymentStatus};
use crate::domain::order_state::OrderState;

/// Tax rate applied when an order is opened (percent)
pub const DEFAULT_TAX: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub table_id: i32,
    pub name: String,
    /// Sequential code (ORD0001...), assigned once on first save
    #[sea_orm(unique)]
    pub code_order: String,
    pub tax: f64,
    pub payment_method_id: Option<i32>,
    pub status_payment: String, // 'In Process', 'Completed', 'Cancelled'
    pub status_kitchen: String, // 'In The Kitchen', 'Cooking Now', 'Ready To Serve'
    pub created_at: String,
    pub updated_at: String,
    /// Soft-deletion marker; deleted orders keep their code
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dining_table::Entity",
        from = "Column::TableId",
        to = "super::dining_table::Column::Id"
    )]
    Table,
    #[sea_orm(
        belongs_to = "super::payment_method::Entity",
        from = "Column::PaymentMethodId",
        to = "super::payment_method::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    PaymentMethod,
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::dining_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Table.def()
    }
}

impl Related<super::payment_method::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentMethod.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn payment_status(&self) -> Result<PaymentStatus, DomainError> {
        PaymentStatus::parse(&self.status_payment)
    }

    pub fn kitchen_status(&self) -> Result<KitchenStatus, DomainError> {
        KitchenStatus::parse(&self.status_kitchen)
    }

    pub fn state(&self) -> Result<OrderState, DomainError> {
        Ok(OrderState {
            id: self.id,
            table_id: self.table_id,
            payment_status: self.payment_status()?,
            kitchen_status: self.kitchen_status()?,
        })
    }
}
