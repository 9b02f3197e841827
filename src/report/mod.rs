//! On-demand reporting over a user's transactions: time-bucketed aggregation
//! and the 50/30/20 budget report.
//!
//! Everything in this module is a pure computation over transactions fetched
//! fresh from the store, so it is safe to run concurrently across requests.

mod aggregation;
mod budget;

pub use aggregation::{Bucket, Dimension, Granularity, TimeKey, aggregate};
pub use budget::{BudgetReport, BudgetStats, BudgetUsage, evaluate};
