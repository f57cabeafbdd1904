//! Core types and data structures for the reconciliation engine

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ledger categories the engine distinguishes
///
/// The sign of a bank amount determines the default category when a new
/// ledger transaction is seeded from an unmatched statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Money leaving the account (negative bank amounts)
    Expense,
    /// Money entering the account (positive bank amounts)
    Income,
}

impl Category {
    /// Derive the category from a signed bank-statement amount
    pub fn from_signed_amount(amount: &BigDecimal) -> Self {
        if *amount < BigDecimal::from(0) {
            Category::Expense
        } else {
            Category::Income
        }
    }
}

/// Statement descriptions that never correspond to a ledger entry
/// (inter-account transfers, card payments, interest postings).
const NO_EVAL_PREFIXES: &[&str] = &[
    "Transfer",
    "PAYMENT - THANK YOU / PAIEMENT - MERCI",
    "INTEREST PAYMENT",
    "WWW TFR",
    "WWW PMT",
    "BR TO BR",
    "LOAN PROCEEDS",
];

/// One row from an imported bank statement
///
/// Constructed once per imported row and immutable thereafter. The core
/// never persists these; they exist only for the duration of a matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankLineItem {
    /// Date the bank recorded the transaction
    pub date: NaiveDate,
    /// Signed amount; negative means withdrawal/expense
    pub amount: BigDecimal,
    /// Combined statement description
    pub description: String,
}

impl BankLineItem {
    /// Create a line item from the raw statement fields.
    ///
    /// Statements carry up to two description columns; they are joined with
    /// `" - "` when the second is present.
    pub fn new(date: NaiveDate, desc1: &str, desc2: Option<&str>, amount: BigDecimal) -> Self {
        let description = match desc2 {
            Some(d2) => format!("{} - {}", desc1, d2),
            None => desc1.to_string(),
        };
        Self {
            date,
            amount,
            description,
        }
    }

    /// Whether this row represents money leaving the account
    pub fn is_expense(&self) -> bool {
        self.amount < BigDecimal::from(0)
    }

    /// Whether this row is known not to correspond to any ledger entry.
    ///
    /// Callers may skip ignorable rows before a matching run; the matcher
    /// itself never drops input rows.
    pub fn is_ignorable(&self) -> bool {
        NO_EVAL_PREFIXES
            .iter()
            .any(|prefix| self.description.starts_with(prefix))
    }

    /// The min..max date span covered by a batch of line items.
    ///
    /// Returns `None` for an empty batch. Ledger transactions inside this
    /// span form the candidate pool for a matching run.
    pub fn covering_span(items: &[BankLineItem]) -> Option<(NaiveDate, NaiveDate)> {
        let first = items.first()?.date;
        let (min, max) = items.iter().fold((first, first), |(min, max), item| {
            (min.min(item.date), max.max(item.date))
        });
        Some((min, max))
    }
}

/// One record in the user's own expense/income ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// Stable identity; `<= 0` means not yet persisted
    pub id: i64,
    /// Date the transaction occurred
    pub date: NaiveDate,
    /// Non-negative amount; the category carries the direction
    pub amount: BigDecimal,
    /// Expense or income
    pub category: Category,
    /// Free-form description
    pub description: String,
    /// Locked records cannot be realigned
    pub locked: bool,
}

impl LedgerTransaction {
    /// Create a new, unpersisted ledger transaction
    pub fn new(
        date: NaiveDate,
        amount: BigDecimal,
        category: Category,
        description: String,
    ) -> Self {
        Self {
            id: 0,
            date,
            amount,
            category,
            description,
            locked: false,
        }
    }

    /// Seed a new ledger transaction from an unmatched statement row.
    ///
    /// The amount is stored unsigned; the sign of the bank amount picks the
    /// category (negative = expense, positive = income).
    pub fn from_line_item(item: &BankLineItem) -> Self {
        Self::new(
            item.date,
            item.amount.abs(),
            Category::from_signed_amount(&item.amount),
            item.description.clone(),
        )
    }

    /// Whether this record has been persisted yet
    pub fn is_new(&self) -> bool {
        self.id <= 0
    }

    /// Validate the record before handing it to a ledger store
    pub fn validate(&self) -> ReconcileResult<()> {
        crate::utils::validation::validate_transaction(self)
    }
}

/// Errors that can occur at the reconciliation boundary
///
/// The matching pipeline itself is total and absorbs degenerate inputs into
/// defined score values; these variants cover the collaborator boundary.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Ledger store error: {0}")]
    Store(String),
    #[error("Statement import error: {0}")]
    Import(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Ledger transaction not found: {0}")]
    TransactionNotFound(i64),
    #[error("Ledger transaction is locked: {0}")]
    TransactionLocked(i64),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn category_follows_amount_sign() {
        assert_eq!(
            Category::from_signed_amount(&BigDecimal::from(-45)),
            Category::Expense
        );
        assert_eq!(
            Category::from_signed_amount(&BigDecimal::from(120)),
            Category::Income
        );
        // Zero is not a withdrawal
        assert_eq!(
            Category::from_signed_amount(&BigDecimal::from(0)),
            Category::Income
        );
    }

    #[test]
    fn line_item_joins_description_fields() {
        let item = BankLineItem::new(
            date(2024, 3, 1),
            "COFFEE SHOP",
            Some("CARD 1234"),
            BigDecimal::from(-45),
        );
        assert_eq!(item.description, "COFFEE SHOP - CARD 1234");
        assert!(item.is_expense());

        let single = BankLineItem::new(date(2024, 3, 1), "PAYROLL", None, BigDecimal::from(2500));
        assert_eq!(single.description, "PAYROLL");
        assert!(!single.is_expense());
    }

    #[test]
    fn transfer_rows_are_ignorable() {
        let transfer = BankLineItem::new(
            date(2024, 3, 4),
            "Transfer",
            Some("SAVINGS"),
            BigDecimal::from(-500),
        );
        assert!(transfer.is_ignorable());

        let purchase =
            BankLineItem::new(date(2024, 3, 4), "GROCERY MART", None, BigDecimal::from(-80));
        assert!(!purchase.is_ignorable());
    }

    #[test]
    fn covering_span_is_min_max_of_batch() {
        let items = vec![
            BankLineItem::new(date(2024, 3, 10), "A", None, BigDecimal::from(-1)),
            BankLineItem::new(date(2024, 3, 2), "B", None, BigDecimal::from(-2)),
            BankLineItem::new(date(2024, 3, 25), "C", None, BigDecimal::from(-3)),
        ];
        assert_eq!(
            BankLineItem::covering_span(&items),
            Some((date(2024, 3, 2), date(2024, 3, 25)))
        );
        assert_eq!(BankLineItem::covering_span(&[]), None);
    }

    #[test]
    fn seeding_from_line_item_strips_sign() {
        let item = BankLineItem::new(date(2024, 3, 1), "COFFEE SHOP", None, BigDecimal::from(-45));
        let txn = LedgerTransaction::from_line_item(&item);

        assert!(txn.is_new());
        assert_eq!(txn.amount, BigDecimal::from(45));
        assert_eq!(txn.category, Category::Expense);
        assert_eq!(txn.description, "COFFEE SHOP");
        assert_eq!(txn.date, item.date);
        assert!(!txn.locked);
    }
}
