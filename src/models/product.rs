use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Product;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub code_product: String,
    pub price: f64,
    /// On-hand quantity, never negative
    pub stock: i32,
    /// Derived from stock: 'In Stock', 'Low Stock', 'Out Of Stock'
    pub availability: String,
    pub status: String, // 'Active', 'Inactive'
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code_product: model.code_product,
            price: model.price,
            stock: model.stock,
            availability: model.availability,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
