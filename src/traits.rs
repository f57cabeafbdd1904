//! Traits for the engine's external collaborators

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::*;

/// Storage abstraction for the user's ledger
///
/// The reconciliation core never talks to a database or network itself; it
/// works against whatever backend implements this trait (SQL, REST gateway,
/// in-memory, etc.). All I/O is completed outside the synchronous matching
/// boundary: candidates are fetched before a run, alignments persisted after.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Fetch all ledger transactions dated within `from..=to`
    async fn fetch_transactions(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ReconcileResult<Vec<LedgerTransaction>>;

    /// Get a single transaction by id
    async fn get_transaction(&self, id: i64) -> ReconcileResult<Option<LedgerTransaction>>;

    /// Persist a batch of new transactions, returning them with assigned ids
    async fn create_transactions(
        &mut self,
        transactions: &[LedgerTransaction],
    ) -> ReconcileResult<Vec<LedgerTransaction>>;

    /// Update an existing transaction
    async fn update_transaction(&mut self, transaction: &LedgerTransaction) -> ReconcileResult<()>;

    /// Delete a batch of transactions by id
    async fn delete_transactions(&mut self, ids: &[i64]) -> ReconcileResult<()>;
}

/// Source of imported bank-statement rows
///
/// How the rows are obtained (CSV file, download, paste buffer) is opaque to
/// the core. Malformed rows are the importer's problem; by the time line
/// items reach the matcher they are well-formed.
#[async_trait]
pub trait StatementSource: Send + Sync {
    /// Fetch the statement rows for one reconciliation batch
    async fn fetch_line_items(&self) -> ReconcileResult<Vec<BankLineItem>>;
}
