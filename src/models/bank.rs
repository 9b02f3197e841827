//! Defines the bank account model and the mock transactions seeded when an
//! account is linked.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    DatabaseId, Error, UserId,
    models::transaction::{
        BudgetCategory, TransactionType, ValidatedTransaction, classify_budget_category,
    },
};

/// A bank account linked by a user.
///
/// There is no real bank integration: linking an account seeds a batch of
/// [MockTransaction]s that the user can confirm into their ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    /// The ID of the bank account.
    pub id: DatabaseId,
    /// The user that linked this account.
    pub user_id: UserId,
    /// The name of the bank, e.g. "Kiwibank".
    pub bank_name: String,
    /// The account number as entered by the user.
    pub account_number: String,
    /// The current balance of the account.
    pub balance: f64,
    /// The date the account was linked.
    pub linked_at: Date,
}

/// The wire shape for linking a bank account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBankAccount {
    /// The name of the bank.
    pub bank_name: String,
    /// The account number.
    pub account_number: String,
}

/// A speculative transaction seeded when a bank account is linked.
///
/// Unlike [Transaction](crate::Transaction), the amount is signed: negative
/// for debits, positive for credits. A mock transaction becomes part of the
/// ledger exactly once, by confirmation, which flips `is_added` from false to
/// true. That flag never goes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockTransaction {
    /// The ID of the mock transaction.
    pub id: DatabaseId,
    /// The user that owns this mock transaction.
    ///
    /// Ownership is always decided by this field; `bank_account_id` exists
    /// only so that deleting an account removes its mock transactions.
    pub user_id: UserId,
    /// The bank account this mock transaction was seeded for.
    pub bank_account_id: DatabaseId,
    /// The signed amount: negative for debits, positive for credits.
    pub amount: f64,
    /// A short description, e.g. "Coffee".
    pub description: String,
    /// When the transaction supposedly took place.
    pub date: Date,
    /// Whether this mock transaction has been confirmed into the ledger.
    pub is_added: bool,
}

/// The fixed batch of synthetic transactions seeded for every newly linked
/// bank account.
pub fn seed_mock_transactions() -> [(&'static str, f64); 3] {
    [
        ("Coffee", -4.5),
        ("Freelance Payment", 200.0),
        ("Groceries", -35.6),
    ]
}

/// The wire shape for confirming a mock transaction into the ledger.
///
/// The confirming user assigns the final classification; type and category
/// are never inherited from the mock record.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmTransaction {
    /// The mock transaction to confirm.
    pub mock_id: DatabaseId,
    /// The category to record the transaction under.
    pub category: String,
    /// Whether the confirmed transaction is income, an expense or savings.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The budget bucket. Defaults to `needs` for non-income types.
    #[serde(default)]
    pub budget_category: Option<String>,
}

/// Build the ledger entry a mock transaction is promoted into.
///
/// The amount is the absolute value of the mock's signed amount, the note is
/// the mock's description, and the date is the mock's date. When the caller
/// picks a non-income type and supplies no budget category, it defaults to
/// `needs`.
///
/// # Errors
/// Returns [Error::InvalidBudgetCategory] when a budget category is supplied
/// for income, and [Error::MissingBudgetCategory] when a supplied value is
/// not one of `needs`, `wants` or `savings`.
pub fn promote(
    mock: &MockTransaction,
    confirm: &ConfirmTransaction,
) -> Result<ValidatedTransaction, Error> {
    let budget_category = match (confirm.transaction_type, confirm.budget_category.as_deref()) {
        (TransactionType::Income, value) => {
            classify_budget_category(TransactionType::Income, value)?
        }
        (_, None) | (_, Some("")) => Some(BudgetCategory::Needs),
        (transaction_type, value) => classify_budget_category(transaction_type, value)?,
    };

    Ok(ValidatedTransaction {
        user_id: mock.user_id,
        transaction_type: confirm.transaction_type,
        category: confirm.category.clone(),
        budget_category,
        amount: mock.amount.abs(),
        note: Some(mock.description.clone()),
        date: mock.date,
        mock_transaction_id: Some(mock.id),
    })
}
