//! Implements a SQLite backed bank store, including the mock-transaction
//! confirmation workflow.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, ToSql};
use time::Date;

use crate::{
    DatabaseId, Error, UserId,
    models::{
        BankAccount, ConfirmTransaction, MockTransaction, NewBankAccount, Transaction, promote,
        seed_mock_transactions,
    },
    stores::{BankStore, sqlite::transaction::insert_transaction},
};

const MOCK_TRANSACTION_COLUMNS: &str =
    "id, user_id, bank_account_id, amount, description, date, is_added";

/// Stores bank accounts and mock transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteBankStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteBankStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl BankStore for SqliteBankStore {
    /// Link a new bank account and seed its mock transactions, as one SQL
    /// transaction.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn link_account(
        &mut self,
        user_id: UserId,
        new_account: NewBankAccount,
        linked_at: Date,
    ) -> Result<BankAccount, Error> {
        let connection = self.connection.lock().unwrap();
        let sql_transaction = connection.unchecked_transaction()?;

        let account = sql_transaction
            .prepare(
                "INSERT INTO bank_account (user_id, bank_name, account_number, balance, linked_at)
                 VALUES (?1, ?2, ?3, 0, ?4)
                 RETURNING id, user_id, bank_name, account_number, balance, linked_at",
            )?
            .query_row(
                (
                    user_id,
                    &new_account.bank_name,
                    &new_account.account_number,
                    linked_at,
                ),
                map_bank_account_row,
            )?;

        let mut seed_statement = sql_transaction.prepare(
            "INSERT INTO mock_transaction (user_id, bank_account_id, amount, description, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        for (description, amount) in seed_mock_transactions() {
            seed_statement.execute((user_id, account.id, amount, description, linked_at))?;
        }

        drop(seed_statement);
        sql_transaction.commit()?;

        Ok(account)
    }

    fn get_accounts(&self, user_id: UserId) -> Result<Vec<BankAccount>, Error> {
        let connection = self.connection.lock().unwrap();
        let mut statement = connection.prepare(
            "SELECT id, user_id, bank_name, account_number, balance, linked_at
             FROM bank_account WHERE user_id = :user_id ORDER BY id ASC",
        )?;
        let accounts = statement
            .query_map(&[(":user_id", &user_id)], map_bank_account_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(accounts)
    }

    /// Delete a bank account; its mock transactions go with it via the
    /// foreign-key cascade. Confirmed ledger transactions are kept.
    fn delete_account(&mut self, user_id: UserId, account_id: DatabaseId) -> Result<(), Error> {
        let rows_deleted = self.connection.lock().unwrap().execute(
            "DELETE FROM bank_account WHERE id = :id AND user_id = :user_id",
            &[(":id", &account_id as &dyn ToSql), (":user_id", &user_id)],
        )?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn get_pending_mock_transactions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<MockTransaction>, Error> {
        let connection = self.connection.lock().unwrap();
        let mut statement = connection.prepare(&format!(
            "SELECT {MOCK_TRANSACTION_COLUMNS} FROM mock_transaction
             WHERE user_id = :user_id AND is_added = 0 ORDER BY id ASC"
        ))?;
        let mock_transactions = statement
            .query_map(&[(":user_id", &user_id)], map_mock_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(mock_transactions)
    }

    /// Confirm a mock transaction into the ledger.
    ///
    /// The precondition check, the ledger insert and the flag update run in
    /// one SQL transaction, so the two writes are never observably separate.
    /// The UNIQUE constraint on the ledger's `mock_transaction_id` column
    /// independently guarantees at most one transaction per mock, even for a
    /// store without this transactional wrapping.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFoundOrAlreadyConfirmed] if the mock transaction does
    ///   not exist, belongs to another user, or was already confirmed,
    /// - the errors of [promote] for an invalid classification,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn confirm_mock_transaction(
        &mut self,
        user_id: UserId,
        confirm: ConfirmTransaction,
    ) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();
        let sql_transaction = connection.unchecked_transaction()?;

        let mock = sql_transaction
            .prepare(&format!(
                "SELECT {MOCK_TRANSACTION_COLUMNS} FROM mock_transaction
                 WHERE id = :id AND user_id = :user_id AND is_added = 0"
            ))?
            .query_row(
                &[
                    (":id", &confirm.mock_id as &dyn ToSql),
                    (":user_id", &user_id),
                ],
                map_mock_transaction_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::NotFoundOrAlreadyConfirmed,
                error => error.into(),
            })?;

        let transaction = insert_transaction(&sql_transaction, &promote(&mock, &confirm)?)?;

        sql_transaction.execute(
            "UPDATE mock_transaction SET is_added = 1 WHERE id = ?1",
            [mock.id],
        )?;

        sql_transaction.commit()?;

        Ok(transaction)
    }
}

fn map_bank_account_row(row: &Row) -> Result<BankAccount, rusqlite::Error> {
    Ok(BankAccount {
        id: row.get(0)?,
        user_id: row.get(1)?,
        bank_name: row.get(2)?,
        account_number: row.get(3)?,
        balance: row.get(4)?,
        linked_at: row.get(5)?,
    })
}

fn map_mock_transaction_row(row: &Row) -> Result<MockTransaction, rusqlite::Error> {
    Ok(MockTransaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        bank_account_id: row.get(2)?,
        amount: row.get(3)?,
        description: row.get(4)?,
        date: row.get(5)?,
        is_added: row.get(6)?,
    })
}
