//! SeaORM implementation of PaymentMethodRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::{DomainError, PaymentMethod, PaymentMethodRepository};
use crate::models::payment_method::{Column, Entity as PaymentMethodEntity};

pub struct SeaOrmPaymentMethodRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentMethodRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentMethodRepository for SeaOrmPaymentMethodRepository {
    async fn find_active(&self) -> Result<Vec<PaymentMethod>, DomainError> {
        let methods = PaymentMethodEntity::find()
            .filter(Column::Status.eq(true))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(methods.into_iter().map(PaymentMethod::from).collect())
    }
}
