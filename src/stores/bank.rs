//! Defines the bank store trait: linked accounts, their mock transactions,
//! and the confirmation workflow.

use time::Date;

use crate::{
    DatabaseId, Error, UserId,
    models::{BankAccount, ConfirmTransaction, MockTransaction, NewBankAccount, Transaction},
};

/// Handles bank accounts and the mock transactions seeded for them.
pub trait BankStore {
    /// Link a new bank account for `user_id` and seed its batch of mock
    /// transactions, dated `linked_at`.
    fn link_account(
        &mut self,
        user_id: UserId,
        new_account: NewBankAccount,
        linked_at: Date,
    ) -> Result<BankAccount, Error>;

    /// Get all bank accounts linked by `user_id`.
    fn get_accounts(&self, user_id: UserId) -> Result<Vec<BankAccount>, Error>;

    /// Delete one of `user_id`'s bank accounts along with its mock
    /// transactions.
    ///
    /// Ledger transactions confirmed from those mocks are kept.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `account_id` does not refer to an
    /// account owned by `user_id`.
    fn delete_account(&mut self, user_id: UserId, account_id: DatabaseId) -> Result<(), Error>;

    /// Get `user_id`'s mock transactions that have not been confirmed yet.
    fn get_pending_mock_transactions(&self, user_id: UserId)
    -> Result<Vec<MockTransaction>, Error>;

    /// Confirm one of `user_id`'s mock transactions into the ledger.
    ///
    /// Creates the promoted [Transaction] and marks the mock transaction as
    /// added, atomically: a concurrent confirm of the same mock transaction
    /// can never observe one write without the other, and at most one
    /// transaction is ever created per mock.
    ///
    /// # Errors
    /// Returns [Error::NotFoundOrAlreadyConfirmed] if the mock transaction
    /// does not exist, belongs to another user, or was already confirmed.
    fn confirm_mock_transaction(
        &mut self,
        user_id: UserId,
        confirm: ConfirmTransaction,
    ) -> Result<Transaction, Error>;
}
