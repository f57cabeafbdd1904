//! Pairwise compatibility scoring between statement rows and ledger records

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::types::{BankLineItem, LedgerTransaction};

/// Tunable matching thresholds
///
/// The defaults reproduce the empirically tuned legacy behavior and should
/// only be changed together with a recalibration of real statement data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Day distance at which the date score reaches zero
    pub date_ceiling_days: i64,
    /// Minimum date score for assigning a candidate without confirmation
    pub auto_accept_date_score: f64,
    /// Minimum amount score for assigning a candidate without confirmation
    pub auto_accept_amount_score: f64,
    /// Pre-filter: candidates below this amount score are discarded
    pub min_amount_score: f64,
    /// Pre-filter: candidates below this total score are discarded
    pub min_total_score: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            date_ceiling_days: 14,
            auto_accept_date_score: 0.72,
            auto_accept_amount_score: 0.99,
            min_amount_score: 0.5,
            min_total_score: 1.0,
        }
    }
}

/// Compatibility of one candidate ledger transaction with one statement row
///
/// Three independent sub-scores in `[0, 1]`; the total is their plain sum
/// (range 0..3, deliberately unnormalized) so one numeric field both filters
/// and ranks candidates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScore {
    /// How closely the amounts agree, quadratic falloff
    pub amount_score: f64,
    /// How closely the dates agree, quadratic falloff over the ceiling window
    pub date_score: f64,
    /// Fuzzy description similarity; 0.0 until Phase 3 computes it
    pub desc_score: f64,
    /// The candidate this score refers to
    pub transaction: LedgerTransaction,
}

impl MatchScore {
    /// Unweighted sum of the three sub-scores, in `[0, 3]`
    pub fn total_score(&self) -> f64 {
        self.amount_score + self.date_score + self.desc_score
    }

    /// Whether the amounts and dates agree closely enough to assign this
    /// candidate without user confirmation
    pub fn is_auto_acceptable(&self, config: &MatchConfig) -> bool {
        self.date_score >= config.auto_accept_date_score
            && self.amount_score >= config.auto_accept_amount_score
    }
}

/// Score one statement row against one candidate ledger transaction.
///
/// Pure, no I/O. The description score is left at 0.0; it is the expensive
/// sub-score and the matcher computes it lazily for candidates that survive
/// the amount/date filters.
pub fn score_pair(
    item: &BankLineItem,
    txn: &LedgerTransaction,
    config: &MatchConfig,
) -> MatchScore {
    MatchScore {
        amount_score: amount_score(item, txn),
        date_score: date_score(item, txn, config.date_ceiling_days),
        desc_score: 0.0,
        transaction: txn.clone(),
    }
}

/// Pre-filter applied before a candidate is kept on a match.
///
/// Any one prong is disqualifying: zero date score ("too far in time"),
/// amount score under the floor ("amount wildly off"), or total under the
/// cut-off ("weak overall"). In Phase 1 the total is evaluated with the
/// description score still at zero; the cut-off was tuned for that
/// two-dimensional sum.
pub fn passes_prefilter(score: &MatchScore, config: &MatchConfig) -> bool {
    score.date_score > 0.0
        && score.amount_score >= config.min_amount_score
        && score.total_score() >= config.min_total_score
}

/// Squared fraction of the ledger amount that the bank amount covers.
///
/// Ledger amounts are unsigned; the bank amount's magnitude is compared
/// against them. Squaring sharply penalizes partial mismatches, biasing the
/// ranking toward exact-amount matches. A zero-amount ledger record scores
/// 1.0 only against a zero bank amount and 0.0 otherwise, never dividing by
/// zero.
fn amount_score(item: &BankLineItem, txn: &LedgerTransaction) -> f64 {
    let zero = BigDecimal::from(0);
    let diff = (&txn.amount - item.amount.abs()).abs();

    if txn.amount == zero {
        return if diff == zero { 1.0 } else { 0.0 };
    }
    if diff >= txn.amount {
        return 0.0;
    }

    let ratio = ((&txn.amount - &diff) / &txn.amount).to_f64().unwrap_or(0.0);
    ratio * ratio
}

/// Squared linear falloff over the day distance, clamped at the ceiling.
///
/// Hits exactly 0.0 at the ceiling and beyond.
fn date_score(item: &BankLineItem, txn: &LedgerTransaction, ceiling_days: i64) -> f64 {
    let days_diff = (item.date - txn.date).num_days().abs();
    if ceiling_days <= 0 {
        return if days_diff == 0 { 1.0 } else { 0.0 };
    }
    let clamped = days_diff.min(ceiling_days);
    let fraction = (ceiling_days - clamped) as f64 / ceiling_days as f64;
    fraction * fraction
}
