//! Order state machine
//!
//! Plans the side effects an order mutation has on table occupancy and
//! product stock, without touching the database. The lifecycle service
//! applies the returned plan inside the mutation's transaction.

use super::DomainError;
use super::status::{KitchenStatus, PaymentStatus};

/// Persisted state of an order before a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderState {
    pub id: i32,
    pub table_id: i32,
    pub payment_status: PaymentStatus,
    pub kitchen_status: KitchenStatus,
}

/// Desired state submitted for an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderChange {
    pub table_id: i32,
    pub payment_method_id: Option<i32>,
    pub payment_status: PaymentStatus,
    pub kitchen_status: KitchenStatus,
}

/// A single consistency effect on a shared resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Reject with `TableReserved` unless the table is free
    EnsureTableAvailable(i32),
    /// Mark the table free
    ReleaseTable(i32),
    /// Mark the table occupied
    OccupyTable(i32),
    /// Return the stock of every persisted item of the order, keeping the rows
    RestoreItemStock(i32),
    /// Delete every persisted item of the order, returning its stock
    RemoveItems(i32),
}

/// Effects of a create: checks before the order row exists, claims after
/// its items are persisted so a failed item never locks a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlan {
    pub before_save: Vec<Effect>,
    pub after_save: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    pub payment_status: PaymentStatus,
    pub kitchen_status: KitchenStatus,
    pub before_save: Vec<Effect>,
    pub after_save: Vec<Effect>,
    /// Whether the submitted item list is applied and reconciled
    pub sync_items: bool,
}

pub fn plan_create(table_id: i32) -> CreatePlan {
    CreatePlan {
        before_save: vec![Effect::EnsureTableAvailable(table_id)],
        after_save: vec![Effect::OccupyTable(table_id)],
    }
}

/// Payment status moves only forward out of "In Process".
pub fn check_payment_transition(
    from: PaymentStatus,
    to: PaymentStatus,
) -> Result<(), DomainError> {
    if from == to {
        return Ok(());
    }

    let allowed = match to {
        PaymentStatus::InProcess => false,
        PaymentStatus::Completed | PaymentStatus::Cancelled => from == PaymentStatus::InProcess,
    };

    if allowed {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "payment status cannot change from '{}' to '{}'",
            from, to
        )))
    }
}

pub fn plan_update(prev: &OrderState, change: &OrderChange) -> Result<UpdatePlan, DomainError> {
    let (payment_status, kitchen_status) = if change.payment_method_id.is_some() {
        (PaymentStatus::Completed, KitchenStatus::ReadyToServe)
    } else {
        (change.payment_status, change.kitchen_status)
    };

    check_payment_transition(prev.payment_status, payment_status)?;

    let mut before_save = Vec::new();
    let mut after_save = Vec::new();

    if change.table_id != prev.table_id {
        if !prev.payment_status.is_open() || !payment_status.is_open() {
            return Err(DomainError::InvalidState(format!(
                "table can only be changed while the order is '{}'",
                PaymentStatus::InProcess
            )));
        }
        before_save.push(Effect::EnsureTableAvailable(change.table_id));
        before_save.push(Effect::ReleaseTable(prev.table_id));
        before_save.push(Effect::OccupyTable(change.table_id));
    }

    // Guarded on the previous status so a repeated cancel never restores twice
    if payment_status == PaymentStatus::Cancelled && prev.payment_status != PaymentStatus::Cancelled
    {
        before_save.push(Effect::RestoreItemStock(prev.id));
    }

    if prev.payment_status.is_open() && !payment_status.is_open() {
        after_save.push(Effect::ReleaseTable(change.table_id));
    }

    Ok(UpdatePlan {
        payment_status,
        kitchen_status,
        before_save,
        after_save,
        sync_items: payment_status != PaymentStatus::Cancelled,
    })
}

/// Only open orders may be deleted.
pub fn ensure_deletable(state: &OrderState) -> Result<(), DomainError> {
    if state.payment_status.is_open() {
        Ok(())
    } else {
        Err(DomainError::InvalidState(format!(
            "Order cannot be deleted because the payment status is not '{}'. current status payment: {}",
            PaymentStatus::InProcess,
            state.payment_status
        )))
    }
}

pub fn plan_delete(state: &OrderState) -> Vec<Effect> {
    let mut effects = vec![Effect::RemoveItems(state.id)];
    if state.payment_status.is_open() {
        effects.push(Effect::ReleaseTable(state.table_id));
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_order(table_id: i32) -> OrderState {
        OrderState {
            id: 100 + table_id,
            table_id,
            payment_status: PaymentStatus::InProcess,
            kitchen_status: KitchenStatus::InTheKitchen,
        }
    }

    fn change_from(state: &OrderState) -> OrderChange {
        OrderChange {
            table_id: state.table_id,
            payment_method_id: None,
            payment_status: state.payment_status,
            kitchen_status: state.kitchen_status,
        }
    }

    #[test]
    fn test_create_checks_table_then_claims_it() {
        let plan = plan_create(4);
        assert_eq!(plan.before_save, vec![Effect::EnsureTableAvailable(4)]);
        assert_eq!(plan.after_save, vec![Effect::OccupyTable(4)]);
    }

    #[test]
    fn test_plain_edit_has_no_effects() {
        let prev = open_order(1);
        let mut change = change_from(&prev);
        change.kitchen_status = KitchenStatus::CookingNow;

        let plan = plan_update(&prev, &change).unwrap();
        assert!(plan.before_save.is_empty());
        assert!(plan.after_save.is_empty());
        assert!(plan.sync_items);
        assert_eq!(plan.kitchen_status, KitchenStatus::CookingNow);
    }

    #[test]
    fn test_payment_method_completes_and_releases_table() {
        let prev = open_order(2);
        let mut change = change_from(&prev);
        change.payment_method_id = Some(1);

        let plan = plan_update(&prev, &change).unwrap();
        assert_eq!(plan.payment_status, PaymentStatus::Completed);
        assert_eq!(plan.kitchen_status, KitchenStatus::ReadyToServe);
        assert_eq!(plan.after_save, vec![Effect::ReleaseTable(2)]);
        assert!(plan.sync_items);
    }

    #[test]
    fn test_table_change_moves_occupancy() {
        let prev = open_order(1);
        let mut change = change_from(&prev);
        change.table_id = 3;

        let plan = plan_update(&prev, &change).unwrap();
        assert_eq!(
            plan.before_save,
            vec![
                Effect::EnsureTableAvailable(3),
                Effect::ReleaseTable(1),
                Effect::OccupyTable(3),
            ]
        );
        assert!(plan.after_save.is_empty());
    }

    #[test]
    fn test_table_change_rejected_when_closing() {
        let prev = open_order(1);
        let mut change = change_from(&prev);
        change.table_id = 3;
        change.payment_method_id = Some(2);

        assert!(matches!(
            plan_update(&prev, &change),
            Err(DomainError::InvalidState(_))
        ));
    }

    #[test]
    fn test_cancel_restores_stock_once() {
        let prev = open_order(5);
        let mut change = change_from(&prev);
        change.payment_status = PaymentStatus::Cancelled;

        let plan = plan_update(&prev, &change).unwrap();
        assert_eq!(plan.before_save, vec![Effect::RestoreItemStock(105)]);
        assert_eq!(plan.after_save, vec![Effect::ReleaseTable(5)]);
        assert!(!plan.sync_items);

        let cancelled = OrderState {
            payment_status: PaymentStatus::Cancelled,
            ..prev
        };
        let again = plan_update(&cancelled, &change_from(&cancelled)).unwrap();
        assert!(again.before_save.is_empty());
        assert!(again.after_save.is_empty());
    }

    #[test]
    fn test_closed_order_edit_keeps_table_untouched() {
        let prev = OrderState {
            id: 1,
            table_id: 7,
            payment_status: PaymentStatus::Completed,
            kitchen_status: KitchenStatus::ReadyToServe,
        };
        let mut change = change_from(&prev);
        change.payment_method_id = Some(1);

        let plan = plan_update(&prev, &change).unwrap();
        assert!(plan.after_save.is_empty());
    }

    #[test]
    fn test_payment_transitions() {
        use PaymentStatus::*;
        assert!(check_payment_transition(InProcess, Completed).is_ok());
        assert!(check_payment_transition(InProcess, Cancelled).is_ok());
        assert!(check_payment_transition(Completed, Completed).is_ok());
        assert!(check_payment_transition(Completed, InProcess).is_err());
        assert!(check_payment_transition(Cancelled, Completed).is_err());
        assert!(check_payment_transition(Completed, Cancelled).is_err());
    }

    #[test]
    fn test_delete_rules() {
        let open = open_order(9);
        assert!(ensure_deletable(&open).is_ok());
        assert_eq!(
            plan_delete(&open),
            vec![Effect::RemoveItems(109), Effect::ReleaseTable(9)]
        );

        let completed = OrderState {
            payment_status: PaymentStatus::Completed,
            ..open
        };
        assert!(matches!(
            ensure_deletable(&completed),
            Err(DomainError::InvalidState(_))
        ));
        assert_eq!(plan_delete(&completed), vec![Effect::RemoveItems(109)]);
    }
}
