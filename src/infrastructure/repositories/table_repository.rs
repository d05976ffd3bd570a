//! SeaORM implementation of TableRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{DiningTable, DomainError, PaginatedTables, TableFilter, TableRepository};
use crate::models::dining_table::{ActiveModel, Column, Entity as TableEntity};

pub struct SeaOrmTableRepository {
    db: DatabaseConnection,
}

impl SeaOrmTableRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TableRepository for SeaOrmTableRepository {
    async fn find_all(&self, filter: TableFilter) -> Result<PaginatedTables, DomainError> {
        let mut query = TableEntity::find();
        if filter.available_only {
            query = query.filter(Column::Status.eq(true));
        }

        let paginator = query
            .order_by_asc(Column::Id)
            .paginate(&self.db, filter.page.limit);
        let total = paginator.num_items().await?;
        let tables = paginator.fetch_page(filter.page.index()).await?;

        Ok(PaginatedTables {
            tables: tables.into_iter().map(DiningTable::from).collect(),
            total,
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<DiningTable>, DomainError> {
        Ok(TableEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(DiningTable::from))
    }

    async fn create(&self, name: String) -> Result<DiningTable, DomainError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Validation("name is required".to_string()));
        }

        let now = Utc::now().to_rfc3339();
        let table = ActiveModel {
            name: Set(name),
            status: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(table.into())
    }
}
