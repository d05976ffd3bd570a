//! Table Occupancy Tracker - the free/occupied flag of seating tables

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QuerySelect, Set};

use crate::domain::DomainError;
use crate::models::dining_table::{self, Entity as Table};

async fn find_table<C: ConnectionTrait>(
    db: &C,
    table_id: i32,
) -> Result<dining_table::Model, DomainError> {
    Table::find_by_id(table_id)
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found("table", table_id))
}

/// Overwrite the availability flag. Transition rules belong to the caller.
pub async fn set_table_status<C: ConnectionTrait>(
    db: &C,
    table_id: i32,
    available: bool,
) -> Result<(), DomainError> {
    let table = find_table(db, table_id).await?;

    let mut active: dining_table::ActiveModel = table.into();
    active.status = Set(available);
    active.updated_at = Set(Utc::now().to_rfc3339());
    active.update(db).await?;

    tracing::debug!(
        "Table {} marked {}",
        table_id,
        if available { "available" } else { "occupied" }
    );

    Ok(())
}

/// Fail with `TableReserved` unless the table is free.
pub async fn ensure_table_available<C: ConnectionTrait>(
    db: &C,
    table_id: i32,
) -> Result<dining_table::Model, DomainError> {
    let table = find_table(db, table_id).await?;

    if !table.status {
        tracing::warn!("Table {} ({}) is already reserved", table.id, table.name);
        return Err(DomainError::TableReserved(table.name));
    }

    Ok(table)
}
