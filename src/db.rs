//! Sets up the application's database schema.

use rusqlite::Connection;

/// Create the tables for the domain models if they do not exist yet.
///
/// Foreign keys are enabled on `connection` as a side effect; SQLite tracks
/// that setting per connection, and the cascade from bank accounts to mock
/// transactions depends on it.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL
/// error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS bank_account (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            bank_name TEXT NOT NULL,
            account_number TEXT NOT NULL,
            balance REAL NOT NULL DEFAULT 0,
            linked_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS mock_transaction (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            bank_account_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            description TEXT NOT NULL,
            date TEXT NOT NULL,
            is_added INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY(bank_account_id) REFERENCES bank_account(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            transaction_type TEXT NOT NULL,
            category TEXT NOT NULL,
            budget_category TEXT,
            amount REAL NOT NULL,
            note TEXT,
            date TEXT NOT NULL,
            mock_transaction_id INTEGER UNIQUE,
            FOREIGN KEY(mock_transaction_id) REFERENCES mock_transaction(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_user_date
            ON \"transaction\"(user_id, date);

        CREATE INDEX IF NOT EXISTS idx_mock_transaction_user
            ON mock_transaction(user_id, is_added);

        CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            transaction_type TEXT NOT NULL
        );",
    )
}
