//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, ToSql};

use crate::{
    DatabaseId, Error, UserId,
    models::{Transaction, ValidatedTransaction},
    stores::{
        TransactionStore,
        transaction::{SortOrder, TransactionQuery},
    },
};

const TRANSACTION_COLUMNS: &str =
    "id, user_id, transaction_type, category, budget_category, amount, note, date, \
     mock_transaction_id";

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SqliteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFoundOrAlreadyConfirmed] if the transaction carries a
    ///   mock transaction ID that was already confirmed,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, transaction: ValidatedTransaction) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();

        insert_transaction(&connection, &transaction)
    }

    /// Retrieve one of `user_id`'s transactions by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction owned by
    ///   `user_id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, user_id: UserId, id: DatabaseId) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"
                 WHERE id = :id AND user_id = :user_id"
            ))?
            .query_row(
                &[(":id", &id as &dyn ToSql), (":user_id", &user_id)],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    fn get_query(
        &self,
        user_id: UserId,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, Error> {
        let start_date = query.date_range.as_ref().map(|range| *range.start());
        let end_date = query.date_range.as_ref().map(|range| *range.end());
        let limit = query.limit.map(|limit| limit as i64);

        let mut sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE user_id = :user_id"
        );
        let mut params: Vec<(&str, &dyn ToSql)> = vec![(":user_id", &user_id)];

        if let Some(ref transaction_type) = query.transaction_type {
            sql.push_str(" AND transaction_type = :transaction_type");
            params.push((":transaction_type", transaction_type));
        }

        if let Some(ref start_date) = start_date {
            sql.push_str(" AND date >= :start_date");
            params.push((":start_date", start_date));
        }

        if let Some(ref end_date) = end_date {
            sql.push_str(" AND date <= :end_date");
            params.push((":end_date", end_date));
        }

        match query.sort_date {
            Some(SortOrder::Ascending) => sql.push_str(" ORDER BY date ASC, id ASC"),
            Some(SortOrder::Descending) => sql.push_str(" ORDER BY date DESC, id DESC"),
            None => {}
        }

        if let Some(ref limit) = limit {
            sql.push_str(" LIMIT :limit");
            params.push((":limit", limit));
        }

        let connection = self.connection.lock().unwrap();
        let mut statement = connection.prepare(&sql)?;
        let transactions = statement
            .query_map(params.as_slice(), map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Delete one of `user_id`'s transactions.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction owned by
    ///   `user_id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, user_id: UserId, id: DatabaseId) -> Result<(), Error> {
        let rows_deleted = self.connection.lock().unwrap().execute(
            "DELETE FROM \"transaction\" WHERE id = :id AND user_id = :user_id",
            &[(":id", &id as &dyn ToSql), (":user_id", &user_id)],
        )?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

/// Insert a validated transaction and return the stored row.
///
/// Shared with the bank store, which inserts the promoted transaction inside
/// the confirmation workflow's SQL transaction.
pub(super) fn insert_transaction(
    connection: &Connection,
    transaction: &ValidatedTransaction,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "INSERT INTO \"transaction\"
             (user_id, transaction_type, category, budget_category, amount, note, date,
              mock_transaction_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            (
                transaction.user_id,
                transaction.transaction_type,
                &transaction.category,
                transaction.budget_category,
                transaction.amount,
                &transaction.note,
                transaction.date,
                transaction.mock_transaction_id,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Map a database row to a [Transaction].
pub(super) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        transaction_type: row.get(2)?,
        category: row.get(3)?,
        budget_category: row.get(4)?,
        amount: row.get(5)?,
        note: row.get(6)?,
        date: row.get(7)?,
        mock_transaction_id: row.get(8)?,
    })
}
