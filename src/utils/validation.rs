//! Validation utilities

use bigdecimal::BigDecimal;

use crate::types::*;

/// Validate that a ledger amount is non-negative
///
/// Ledger amounts are stored unsigned; direction lives in the category.
pub fn validate_non_negative_amount(amount: &BigDecimal) -> ReconcileResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(ReconcileError::Validation(
            "Amount cannot be negative".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a transaction description is usable
pub fn validate_description(description: &str) -> ReconcileResult<()> {
    if description.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Description cannot be empty".to_string(),
        ));
    }

    if description.len() > 500 {
        return Err(ReconcileError::Validation(
            "Description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a ledger transaction before handing it to a store
pub fn validate_transaction(transaction: &LedgerTransaction) -> ReconcileResult<()> {
    validate_non_negative_amount(&transaction.amount)?;
    validate_description(&transaction.description)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(validate_non_negative_amount(&BigDecimal::from(-1)).is_err());
        assert!(validate_non_negative_amount(&BigDecimal::from(0)).is_ok());
        assert!(validate_non_negative_amount(&BigDecimal::from(45)).is_ok());
    }

    #[test]
    fn blank_and_oversized_descriptions_are_rejected() {
        assert!(validate_description("Coffee Shop").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description("   ").is_err());
        assert!(validate_description(&"x".repeat(501)).is_err());
        assert!(validate_description(&"x".repeat(500)).is_ok());
    }

    #[test]
    fn transaction_validation_covers_both_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let good = LedgerTransaction::new(
            date,
            BigDecimal::from(45),
            Category::Expense,
            "Coffee Shop".to_string(),
        );
        assert!(validate_transaction(&good).is_ok());

        let mut bad_amount = good.clone();
        bad_amount.amount = BigDecimal::from(-45);
        assert!(validate_transaction(&bad_amount).is_err());

        let mut bad_desc = good;
        bad_desc.description = "  ".to_string();
        assert!(validate_transaction(&bad_desc).is_err());
    }
}
