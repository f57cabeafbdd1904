//! Reconciler that coordinates the matcher with the ledger store

use crate::matching::matcher::{Alignment, Matcher, TransactionMatch};
use crate::matching::score::MatchConfig;
use crate::traits::*;
use crate::types::*;

/// Reconciliation front door over a ledger storage backend
///
/// Owns the I/O choreography around the pure matcher: fetch candidates for
/// the statement's date span, run the matching pipeline, and persist the
/// follow-up actions the user takes on the result.
pub struct Reconciler<S: LedgerStore> {
    store: S,
    matcher: Matcher,
}

impl<S: LedgerStore> Reconciler<S> {
    /// Create a reconciler with the default matching thresholds
    pub fn new(store: S) -> Self {
        Self {
            store,
            matcher: Matcher::new(),
        }
    }

    /// Create a reconciler with custom matching thresholds
    pub fn with_config(store: S, config: MatchConfig) -> Self {
        Self {
            store,
            matcher: Matcher::with_config(config),
        }
    }

    /// The matcher this reconciler runs
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Match a batch of statement rows against the ledger.
    ///
    /// Candidates are every ledger transaction dated inside the batch's
    /// min..max date span, fetched in one call before the synchronous
    /// matching run. An empty batch yields an empty result without touching
    /// the store.
    pub async fn reconcile(
        &self,
        line_items: &[BankLineItem],
    ) -> ReconcileResult<Vec<TransactionMatch>> {
        let Some((from, to)) = BankLineItem::covering_span(line_items) else {
            return Ok(Vec::new());
        };
        let candidates = self.store.fetch_transactions(from, to).await?;
        Ok(self.matcher.run(line_items, &candidates))
    }

    /// Import statement rows from a source and match them against the ledger
    pub async fn reconcile_from(
        &self,
        source: &impl StatementSource,
    ) -> ReconcileResult<Vec<TransactionMatch>> {
        let line_items = source.fetch_line_items().await?;
        self.reconcile(&line_items).await
    }

    /// Persist a user-confirmed match: move the ledger record's date and
    /// amount to the bank statement's values.
    ///
    /// The bank's record is authoritative once the user confirms the pairing.
    /// Fails without writing if the record is missing or locked.
    pub async fn align(&mut self, alignment: &Alignment) -> ReconcileResult<LedgerTransaction> {
        let mut transaction = self
            .store
            .get_transaction(alignment.transaction_id)
            .await?
            .ok_or(ReconcileError::TransactionNotFound(alignment.transaction_id))?;
        if transaction.locked {
            return Err(ReconcileError::TransactionLocked(transaction.id));
        }

        transaction.date = alignment.date;
        transaction.amount = alignment.amount.clone();
        self.store.update_transaction(&transaction).await?;
        Ok(transaction)
    }

    /// Create ledger transactions from unmatched statement rows.
    ///
    /// Each row seeds a record with the bank's date, unsigned amount, and
    /// description; the amount's sign picks the category. The whole batch is
    /// validated before anything is written, then persisted in one call.
    pub async fn create_from_line_items(
        &mut self,
        line_items: &[BankLineItem],
    ) -> ReconcileResult<Vec<LedgerTransaction>> {
        let seeds: Vec<LedgerTransaction> = line_items
            .iter()
            .map(LedgerTransaction::from_line_item)
            .collect();
        for seed in &seeds {
            seed.validate()?;
        }
        self.store.create_transactions(&seeds).await
    }

    /// Delete a batch of ledger transactions by id
    pub async fn delete_transactions(&mut self, ids: &[i64]) -> ReconcileResult<()> {
        self.store.delete_transactions(ids).await
    }
}
