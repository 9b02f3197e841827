//! SQLite-backed implementations of the store traits.

mod bank;
mod category;
mod transaction;

pub use bank::SqliteBankStore;
pub use category::SqliteCategoryStore;
pub use transaction::SqliteTransactionStore;
