//! Order Code Generator - sequential human-readable order codes

use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::domain::DomainError;
use crate::models::order::{self, Entity as Order};

pub const ORDER_CODE_PREFIX: &str = "ORD";
const BASE_CODE: &str = "ORD0000";

/// Code following `last_code`, or the first code when there is none.
pub fn next_code_after(last_code: Option<&str>) -> Result<String, DomainError> {
    let last = match last_code {
        Some(code) if !code.is_empty() => code,
        _ => BASE_CODE,
    };

    let number = last
        .strip_prefix(ORDER_CODE_PREFIX)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u32>().ok())
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| DomainError::CodeParse(last.to_owned()))?;

    Ok(format!("{}{:04}", ORDER_CODE_PREFIX, number))
}

/// Next code, derived from the most recently created order.
///
/// Soft-deleted orders keep their rows, so the scan sees them too and a
/// deleted order's code is never handed out again.
pub async fn next_order_code<C: ConnectionTrait>(db: &C) -> Result<String, DomainError> {
    let last = Order::find()
        .order_by_desc(order::Column::Id)
        .one(db)
        .await?;

    next_code_after(last.as_ref().map(|o| o.code_order.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_code() {
        assert_eq!(next_code_after(None).unwrap(), "ORD0001");
        assert_eq!(next_code_after(Some("")).unwrap(), "ORD0001");
    }

    #[test]
    fn test_increments_and_pads() {
        assert_eq!(next_code_after(Some("ORD0007")).unwrap(), "ORD0008");
        assert_eq!(next_code_after(Some("ORD001")).unwrap(), "ORD0002");
        assert_eq!(next_code_after(Some("ORD9999")).unwrap(), "ORD10000");
    }

    #[test]
    fn test_malformed_code_is_rejected() {
        for bad in ["ORDX12", "INV0001", "ORD", "ORD+12"] {
            assert!(
                matches!(next_code_after(Some(bad)), Err(DomainError::CodeParse(_))),
                "{} should not parse",
                bad
            );
        }
    }
}
