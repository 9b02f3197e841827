//! The domain models: transactions, bank accounts with their mock
//! transactions, and user-defined categories.

mod bank;
mod category;
mod transaction;

pub use bank::{
    BankAccount, ConfirmTransaction, MockTransaction, NewBankAccount, promote,
    seed_mock_transactions,
};
pub use category::{Category, CategoryName, NewCategory};
pub use transaction::{
    BudgetCategory, NewTransaction, Transaction, TransactionType, ValidatedTransaction,
    classify_budget_category,
};
