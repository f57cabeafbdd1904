//! In-memory ledger store implementation for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory ledger store for testing and development
///
/// Ids are assigned sequentially starting at 1, matching the convention that
/// `id <= 0` marks an unpersisted record.
#[derive(Debug, Clone)]
pub struct MemoryLedgerStore {
    transactions: Arc<RwLock<HashMap<i64, LedgerTransaction>>>,
    next_id: Arc<RwLock<i64>>,
}

impl MemoryLedgerStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            transactions: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.transactions.write().unwrap().clear();
        *self.next_id.write().unwrap() = 1;
    }

    /// Number of stored transactions
    pub fn len(&self) -> usize {
        self.transactions.read().unwrap().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn fetch_transactions(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ReconcileResult<Vec<LedgerTransaction>> {
        let transactions = self.transactions.read().unwrap();
        let mut matching: Vec<LedgerTransaction> = transactions
            .values()
            .filter(|txn| txn.date >= from && txn.date <= to)
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary; keep fetches deterministic
        matching.sort_by_key(|txn| txn.id);
        Ok(matching)
    }

    async fn get_transaction(&self, id: i64) -> ReconcileResult<Option<LedgerTransaction>> {
        Ok(self.transactions.read().unwrap().get(&id).cloned())
    }

    async fn create_transactions(
        &mut self,
        transactions: &[LedgerTransaction],
    ) -> ReconcileResult<Vec<LedgerTransaction>> {
        let mut next_id = self.next_id.write().unwrap();
        let mut stored = self.transactions.write().unwrap();

        let mut created = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            let mut persisted = transaction.clone();
            persisted.id = *next_id;
            *next_id += 1;
            stored.insert(persisted.id, persisted.clone());
            created.push(persisted);
        }
        Ok(created)
    }

    async fn update_transaction(&mut self, transaction: &LedgerTransaction) -> ReconcileResult<()> {
        let mut transactions = self.transactions.write().unwrap();
        if transactions.contains_key(&transaction.id) {
            transactions.insert(transaction.id, transaction.clone());
            Ok(())
        } else {
            Err(ReconcileError::TransactionNotFound(transaction.id))
        }
    }

    async fn delete_transactions(&mut self, ids: &[i64]) -> ReconcileResult<()> {
        let mut transactions = self.transactions.write().unwrap();
        for id in ids {
            if transactions.remove(id).is_none() {
                return Err(ReconcileError::TransactionNotFound(*id));
            }
        }
        Ok(())
    }
}
