//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).
//!
//! Every trait method is scoped to a [UserId](crate::UserId), so a store can
//! never be asked for another user's records.

mod bank;
mod category;
mod transaction;

pub mod sqlite;

pub use bank::BankStore;
pub use category::CategoryStore;
pub use transaction::{SortOrder, TransactionQuery, TransactionStore};
