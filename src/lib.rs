//! # Reconcile Core
//!
//! A bank-statement reconciliation library that matches imported statement
//! rows against a user's expense/income ledger with multi-factor fuzzy
//! scoring and greedy conflict resolution.
//!
//! ## Features
//!
//! - **Multi-factor scoring**: Independent amount, date, and description
//!   sub-scores with quadratic falloff and tuned auto-accept thresholds
//! - **Four-phase matching**: Cheap candidate generation, greedy exact
//!   resolution with no double-booking, lazy fuzzy description enrichment,
//!   and a review-ready ordering of the result
//! - **Follow-up actions**: Align a confirmed ledger record to the bank's
//!   date and amount, or seed new ledger records from unmatched rows
//! - **Storage abstraction**: Database-agnostic design with trait-based
//!   ledger and statement access
//!
//! ## Quick Start
//!
//! ```rust
//! use reconcile_core::{BankLineItem, Reconciler};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! // This example shows basic usage - you need to implement LedgerStore trait
//! // let store = YourStoreImplementation::new();
//! // let reconciler = Reconciler::new(store);
//! ```

pub mod matching;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use matching::*;
pub use traits::*;
pub use types::*;
