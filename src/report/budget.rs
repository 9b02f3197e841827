//! Evaluates a user's transactions against the 50/30/20 budget rule.

use serde::Serialize;

use crate::models::{BudgetCategory, Transaction, TransactionType};

/// The fraction of income allotted to each budget category.
const NEEDS_FRACTION: f64 = 0.5;
const WANTS_FRACTION: f64 = 0.3;
const SAVINGS_FRACTION: f64 = 0.2;

/// Totals per budget bucket, plus total income.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStats {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The amount spent or saved against the needs bucket.
    pub needs: f64,
    /// The amount spent or saved against the wants bucket.
    pub wants: f64,
    /// The amount spent or saved against the savings bucket.
    pub savings: f64,
}

/// How much of each bucket's limit has been used, as a percentage rounded to
/// two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUsage {
    /// Percentage of the needs limit (50% of income) used.
    pub needs: f64,
    /// Percentage of the wants limit (30% of income) used.
    pub wants: f64,
    /// Percentage of the savings limit (20% of income) used.
    pub savings: f64,
}

/// The 50/30/20 budget report for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    /// Totals per bucket.
    pub stats: BudgetStats,
    /// Usage percentages per bucket.
    pub usage: BudgetUsage,
}

/// Compute the 50/30/20 budget report over a user's transactions.
///
/// Income is summed as stored. Expense and savings transactions count
/// against the bucket named by their budget category, as absolute values.
/// Classification is by budget category, never by type, so a savings-typed
/// transaction tagged `savings` is counted once.
///
/// When total income is zero every limit is zero, and usage is defined as 0
/// for every bucket rather than dividing by zero.
pub fn evaluate(transactions: &[Transaction]) -> BudgetReport {
    let mut stats = BudgetStats {
        total_income: 0.0,
        needs: 0.0,
        wants: 0.0,
        savings: 0.0,
    };

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => stats.total_income += transaction.amount,
            TransactionType::Expense | TransactionType::Savings => {
                let amount = transaction.amount.abs();
                match transaction.budget_category {
                    Some(BudgetCategory::Needs) => stats.needs += amount,
                    Some(BudgetCategory::Wants) => stats.wants += amount,
                    Some(BudgetCategory::Savings) => stats.savings += amount,
                    // Cannot happen for persisted rows; tolerated rather
                    // than counted against a bucket it was never assigned.
                    None => {}
                }
            }
        }
    }

    let usage = BudgetUsage {
        needs: usage_percent(stats.needs, stats.total_income * NEEDS_FRACTION),
        wants: usage_percent(stats.wants, stats.total_income * WANTS_FRACTION),
        savings: usage_percent(stats.savings, stats.total_income * SAVINGS_FRACTION),
    };

    BudgetReport { stats, usage }
}

/// The percentage of `limit` used by `spent`, rounded to two decimal places.
///
/// A zero limit yields 0 regardless of `spent`; the guard takes precedence
/// over the division outcome.
fn usage_percent(spent: f64, limit: f64) -> f64 {
    if limit == 0.0 {
        return 0.0;
    }

    round_to_two_decimal_places(spent / limit * 100.0)
}

fn round_to_two_decimal_places(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
