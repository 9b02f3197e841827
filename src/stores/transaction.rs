//! Defines the transaction store trait.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    DatabaseId, Error, UserId,
    models::{Transaction, TransactionType, ValidatedTransaction},
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// Only [ValidatedTransaction]s are accepted, so the classification
    /// rules have always been applied before anything reaches the store.
    fn create(&mut self, transaction: ValidatedTransaction) -> Result<Transaction, Error>;

    /// Retrieve one of `user_id`'s transactions from the store.
    fn get(&self, user_id: UserId, id: DatabaseId) -> Result<Transaction, Error>;

    /// Retrieve `user_id`'s transactions in the way defined by `query`.
    fn get_query(
        &self,
        user_id: UserId,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, Error>;

    /// Delete one of `user_id`'s transactions.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a transaction
    /// owned by `user_id`.
    fn delete(&mut self, user_id: UserId, id: DatabaseId) -> Result<(), Error>;
}

/// Defines how transactions should be fetched from
/// [TransactionStore::get_query].
#[derive(Debug, Default)]
pub struct TransactionQuery {
    /// Only include transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Include transactions within `date_range` (inclusive).
    pub date_range: Option<RangeInclusive<Date>>,
    /// Orders transactions by date in the order `sort_date`. None returns
    /// transactions in the order they are stored.
    pub sort_date: Option<SortOrder>,
    /// Selects up to the first N (`limit`) transactions.
    pub limit: Option<u64>,
}

/// The order to sort transactions in a [TransactionQuery].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}
