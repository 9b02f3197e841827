//! Groups transactions into time buckets and sums their amounts.
//!
//! Aggregation is a partition-and-fold: transactions are partitioned by a
//! composite key (time key plus any selected dimensions) and folded with a
//! sum. Only periods with at least one matching transaction produce a
//! bucket; empty periods are never synthesized.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::models::{BudgetCategory, Transaction, TransactionType};

/// The time-bucketing resolution for aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar day.
    Day,
    /// One bucket per calendar month.
    Month,
    /// One bucket per calendar year.
    Year,
}

impl Granularity {
    /// The time key that `date` falls into at this granularity.
    pub fn time_key(&self, date: Date) -> TimeKey {
        match self {
            Granularity::Day => TimeKey {
                year: date.year(),
                month: Some(u8::from(date.month())),
                day: Some(date.day()),
            },
            Granularity::Month => TimeKey {
                year: date.year(),
                month: Some(u8::from(date.month())),
                day: None,
            },
            Granularity::Year => TimeKey {
                year: date.year(),
                month: None,
                day: None,
            },
        }
    }
}

/// The time component of a bucket's grouping key.
///
/// The ordering is chronological: years compare first, then months, then
/// days. Fields absent at the chosen granularity stay `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimeKey {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12), present at month and day granularity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    /// The day of the month, present at day granularity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
}

/// An additional grouping key for aggregation, beyond the time key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    /// Group by the free-form category label.
    Category,
    /// Group by the transaction type.
    Type,
    /// Group by the budget category.
    ///
    /// Transactions without one (income) are excluded from the aggregation
    /// rather than treated as an error.
    BudgetCategory,
}

impl Dimension {
    /// Parse a dimension name as used in query strings.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "category" => Some(Dimension::Category),
            "type" => Some(Dimension::Type),
            "budget_category" => Some(Dimension::BudgetCategory),
            _ => None,
        }
    }
}

/// One grouped-aggregation result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    /// The time period this bucket covers.
    pub time_key: TimeKey,
    /// The category label, when grouping by category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// The transaction type, when grouping by type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// The budget category, when grouping by budget category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_category: Option<BudgetCategory>,
    /// The summed amount for this bucket.
    pub total: f64,
}

/// Group `transactions` into time buckets and sum their amounts.
///
/// Expense and savings amounts are summed as absolute values so that signed
/// amounts inherited from mock transactions can never cancel against the
/// ledger's unsigned ones; income is summed as stored.
///
/// The result is ordered by time key descending (most recent first), with
/// ties broken by the dimension values ascending so that the output is
/// reproducible.
///
/// Callers are expected to pass transactions fetched for a single user; the
/// store cannot return anything else.
pub fn aggregate(
    transactions: &[Transaction],
    granularity: Granularity,
    dimensions: &[Dimension],
) -> Vec<Bucket> {
    type GroupKey = (
        TimeKey,
        Option<String>,
        Option<TransactionType>,
        Option<BudgetCategory>,
    );

    let mut totals: HashMap<GroupKey, f64> = HashMap::new();

    for transaction in transactions {
        let budget_category = if dimensions.contains(&Dimension::BudgetCategory) {
            match transaction.budget_category {
                Some(budget_category) => Some(budget_category),
                // Income rows have no budget category; they simply do not
                // contribute to this dimension.
                None => continue,
            }
        } else {
            None
        };

        let key = (
            granularity.time_key(transaction.date),
            dimensions
                .contains(&Dimension::Category)
                .then(|| transaction.category.clone()),
            dimensions
                .contains(&Dimension::Type)
                .then_some(transaction.transaction_type),
            budget_category,
        );

        let amount = match transaction.transaction_type {
            TransactionType::Income => transaction.amount,
            TransactionType::Expense | TransactionType::Savings => transaction.amount.abs(),
        };

        *totals.entry(key).or_insert(0.0) += amount;
    }

    let mut buckets: Vec<Bucket> = totals
        .into_iter()
        .map(
            |((time_key, category, transaction_type, budget_category), total)| Bucket {
                time_key,
                category,
                transaction_type,
                budget_category,
                total,
            },
        )
        .collect();

    buckets.sort_by(|a, b| {
        b.time_key
            .cmp(&a.time_key)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.transaction_type.cmp(&b.transaction_type))
            .then_with(|| a.budget_category.cmp(&b.budget_category))
    });

    buckets
}
