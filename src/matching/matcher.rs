//! Four-phase matching of statement rows to ledger transactions

use std::cmp::Ordering;
use std::fmt;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::Serialize;

use crate::matching::score::{passes_prefilter, score_pair, MatchConfig, MatchScore};
use crate::matching::similarity;
use crate::types::{BankLineItem, LedgerTransaction, ReconcileError, ReconcileResult};

/// Assignment quality of one statement row after a matching run
///
/// Variant order doubles as the presentation order: unresolved rows surface
/// first for user attention, complete matches sink to the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MatchType {
    /// No candidate survived scoring
    None,
    /// Ranked candidates exist but none was assigned
    Partial,
    /// Exactly one ledger transaction was assigned
    Complete,
}

impl MatchType {
    /// Numeric rank used for ordering checks (`None = 0 < Partial < Complete`)
    pub fn rank(&self) -> u8 {
        match self {
            MatchType::None => 0,
            MatchType::Partial => 1,
            MatchType::Complete => 2,
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchType::None => "❗️ None",
            MatchType::Partial => "❓ Partial",
            MatchType::Complete => "✔️ Complete",
        };
        write!(f, "{label}")
    }
}

/// The date/amount update a user-confirmed match pushes back to the ledger
///
/// Produced by [`TransactionMatch::accept_possible`]; persisting it is the
/// ledger store's job (see [`crate::matching::Reconciler::align`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alignment {
    /// Ledger transaction to update
    pub transaction_id: i64,
    /// New date, taken from the bank row
    pub date: NaiveDate,
    /// New unsigned amount, taken from the bank row
    pub amount: BigDecimal,
}

/// One statement row with its assignment and ranked alternatives
///
/// Fields are private so the engine's invariant holds by construction: an
/// assigned transaction and a non-empty candidate list never coexist, and a
/// ledger transaction assigned anywhere in a run appears nowhere else in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionMatch {
    line_item: BankLineItem,
    assigned: Option<LedgerTransaction>,
    possible_matches: Vec<MatchScore>,
}

impl TransactionMatch {
    fn new(line_item: BankLineItem) -> Self {
        Self {
            line_item,
            assigned: None,
            possible_matches: Vec::new(),
        }
    }

    /// The statement row this match is for
    pub fn line_item(&self) -> &BankLineItem {
        &self.line_item
    }

    /// The assigned ledger transaction, if the match is complete
    pub fn assigned(&self) -> Option<&LedgerTransaction> {
        self.assigned.as_ref()
    }

    /// Ranked alternative candidates, best first; empty once assigned
    pub fn possible_matches(&self) -> &[MatchScore] {
        &self.possible_matches
    }

    /// Assignment quality of this row
    pub fn match_type(&self) -> MatchType {
        if self.assigned.is_some() {
            MatchType::Complete
        } else if self.possible_matches.is_empty() {
            MatchType::None
        } else {
            MatchType::Partial
        }
    }

    /// Total score of the best remaining candidate, 0.0 when there is none
    pub fn best_score(&self) -> f64 {
        self.possible_matches
            .first()
            .map(MatchScore::total_score)
            .unwrap_or(0.0)
    }

    /// Promote the ranked candidate at `index` to the assignment.
    ///
    /// Returns the [`Alignment`] the presentation layer hands to the ledger
    /// store so the record's date/amount follow the bank row. Accepting a
    /// locked record or an out-of-range index is an error and leaves the
    /// match untouched.
    pub fn accept_possible(&mut self, index: usize) -> ReconcileResult<Alignment> {
        let candidate = self.possible_matches.get(index).ok_or_else(|| {
            ReconcileError::Validation(format!(
                "no candidate at index {} (have {})",
                index,
                self.possible_matches.len()
            ))
        })?;
        if candidate.transaction.locked {
            return Err(ReconcileError::TransactionLocked(candidate.transaction.id));
        }

        let transaction = candidate.transaction.clone();
        let alignment = Alignment {
            transaction_id: transaction.id,
            date: self.line_item.date,
            amount: self.line_item.amount.abs(),
        };
        self.assign(transaction);
        Ok(alignment)
    }

    fn assign(&mut self, transaction: LedgerTransaction) {
        self.assigned = Some(transaction);
        self.possible_matches.clear();
    }

    fn remove_candidate(&mut self, transaction_id: i64) {
        self.possible_matches
            .retain(|ms| ms.transaction.id != transaction_id);
    }

    /// Descending by total score; ties break on ledger id so identical runs
    /// rank identically.
    fn sort_possible_matches(&mut self) {
        self.possible_matches.sort_by(|a, b| {
            b.total_score()
                .partial_cmp(&a.total_score())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.transaction.id.cmp(&b.transaction.id))
        });
    }
}

/// The reconciliation matcher
///
/// Stateless per invocation: [`Matcher::run`] is a pure function over the
/// lists it is given and holds nothing between runs. Deterministic for
/// identical inputs, total for empty or degenerate ones.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    /// Create a matcher with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with custom thresholds
    pub fn with_config(config: MatchConfig) -> Self {
        Self { config }
    }

    /// The thresholds this matcher runs with
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Match a batch of statement rows against a candidate pool.
    ///
    /// Four phases, each completing before the next starts:
    ///
    /// 1. Cross-product scoring on amount/date only, pre-filtering weak
    ///    candidates.
    /// 2. Greedy auto-assignment, best-scoring rows first; every assignment
    ///    immediately removes the consumed ledger transaction from all other
    ///    rows' candidate lists.
    /// 3. Fuzzy description scoring for rows still undecided, then re-rank.
    /// 4. Order the result `None < Partial < Complete`.
    ///
    /// Every input row appears exactly once in the output, and no ledger
    /// transaction is assigned or listed under two rows.
    pub fn run(
        &self,
        line_items: &[BankLineItem],
        candidates: &[LedgerTransaction],
    ) -> Vec<TransactionMatch> {
        let mut matches = self.generate_candidates(line_items, candidates);
        self.resolve_exact(&mut matches);
        self.enrich_descriptions(&mut matches);
        matches.sort_by(|a, b| a.match_type().cmp(&b.match_type()));
        matches
    }

    /// Phase 1: score every row against every candidate on amount and date.
    fn generate_candidates(
        &self,
        line_items: &[BankLineItem],
        candidates: &[LedgerTransaction],
    ) -> Vec<TransactionMatch> {
        line_items
            .iter()
            .map(|item| {
                let mut m = TransactionMatch::new(item.clone());
                for txn in candidates {
                    let score = score_pair(item, txn, &self.config);
                    if passes_prefilter(&score, &self.config) {
                        m.possible_matches.push(score);
                    }
                }
                m.sort_possible_matches();
                m
            })
            .collect()
    }

    /// Phase 2: greedily assign auto-acceptable top candidates.
    ///
    /// Rows are visited in descending order of their best candidate's score.
    /// Each assignment removes the consumed transaction from every other row
    /// right away, not batched at the end: an assignment can change which
    /// candidate is on top for a row visited later in the same pass.
    fn resolve_exact(&self, matches: &mut [TransactionMatch]) {
        let mut order: Vec<usize> = (0..matches.len()).collect();
        order.sort_by(|&a, &b| {
            matches[b]
                .best_score()
                .partial_cmp(&matches[a].best_score())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.cmp(&b))
        });

        for idx in order {
            let top = match matches[idx].possible_matches.first() {
                Some(ms) if ms.is_auto_acceptable(&self.config) => ms.transaction.clone(),
                _ => continue,
            };
            let consumed_id = top.id;
            matches[idx].assign(top);
            for (j, other) in matches.iter_mut().enumerate() {
                if j != idx {
                    other.remove_candidate(consumed_id);
                }
            }
        }
    }

    /// Phase 3: pay for fuzzy description similarity only where it matters.
    ///
    /// Rows already assigned, or left with no candidates, are skipped. The
    /// surviving candidates get their description score and are re-ranked
    /// with the enriched totals.
    fn enrich_descriptions(&self, matches: &mut [TransactionMatch]) {
        for m in matches.iter_mut() {
            if m.assigned.is_some() || m.possible_matches.is_empty() {
                continue;
            }
            let TransactionMatch {
                ref line_item,
                ref mut possible_matches,
                ..
            } = *m;
            for ms in possible_matches.iter_mut() {
                ms.desc_score =
                    similarity::token_set_ratio(&line_item.description, &ms.transaction.description);
            }
            m.sort_possible_matches();
        }
    }
}
