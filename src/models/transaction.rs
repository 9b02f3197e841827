//! Defines the transaction model and the classification rules that every
//! transaction must pass before it is persisted.

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{DatabaseId, Error, UserId};

/// Whether a transaction brings money in, spends it, or sets it aside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. wages or a freelance payment.
    Income,
    /// Money spent.
    Expense,
    /// Money moved into savings.
    Savings,
}

impl TransactionType {
    /// The lowercase name used on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Savings => "savings",
        }
    }

    /// Parse the lowercase wire/database name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            "savings" => Some(TransactionType::Savings),
            _ => None,
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|text| Self::parse(text).ok_or(FromSqlError::InvalidType))
    }
}

/// The 50/30/20 classification bucket for non-income transactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    /// Essential spending, allotted 50% of income.
    Needs,
    /// Discretionary spending, allotted 30% of income.
    Wants,
    /// Money set aside, allotted 20% of income.
    Savings,
}

impl BudgetCategory {
    /// The lowercase name used on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategory::Needs => "needs",
            BudgetCategory::Wants => "wants",
            BudgetCategory::Savings => "savings",
        }
    }

    /// Parse the lowercase wire/database name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "needs" => Some(BudgetCategory::Needs),
            "wants" => Some(BudgetCategory::Wants),
            "savings" => Some(BudgetCategory::Savings),
            _ => None,
        }
    }
}

impl ToSql for BudgetCategory {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for BudgetCategory {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|text| Self::parse(text).ok_or(FromSqlError::InvalidType))
    }
}

/// An event where money was earned, spent or saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// The user that owns this transaction.
    pub user_id: UserId,
    /// Whether this transaction is income, an expense or savings.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free-form label, e.g. "Groceries".
    pub category: String,
    /// The budget bucket this transaction counts against.
    ///
    /// Always present for expense/savings transactions, never for income.
    pub budget_category: Option<BudgetCategory>,
    /// The magnitude of the transaction in dollars. Never negative, the
    /// direction is implied by the transaction type.
    pub amount: f64,
    /// Optional free text, e.g. the bank's description of the transaction.
    pub note: Option<String>,
    /// When the transaction happened.
    pub date: Date,
    /// The mock transaction this transaction was confirmed from, if any.
    ///
    /// Unique across the ledger so that a mock transaction can never produce
    /// two ledger entries.
    pub mock_transaction_id: Option<DatabaseId>,
}

/// The wire shape for creating a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    /// Whether this transaction is income, an expense or savings.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free-form label, e.g. "Groceries".
    pub category: String,
    /// The magnitude of the transaction in dollars.
    pub amount: f64,
    /// The budget bucket, required unless the type is income.
    #[serde(default)]
    pub budget_category: Option<String>,
    /// Optional free text.
    #[serde(default)]
    pub note: Option<String>,
    /// When the transaction happened. Defaults to today.
    #[serde(default)]
    pub date: Option<Date>,
}

/// Classify a proposed budget category against the transaction type.
///
/// This is a pure function with no side effects:
/// - Income must not carry a budget category. A non-empty value is rejected
///   with [Error::InvalidBudgetCategory] rather than silently dropped.
/// - Every other type requires exactly one of `needs`, `wants` or `savings`.
///   A missing, empty or unknown value fails with
///   [Error::MissingBudgetCategory].
pub fn classify_budget_category(
    transaction_type: TransactionType,
    budget_category: Option<&str>,
) -> Result<Option<BudgetCategory>, Error> {
    match (transaction_type, budget_category) {
        (TransactionType::Income, None) => Ok(None),
        (TransactionType::Income, Some("")) => Ok(None),
        (TransactionType::Income, Some(_)) => Err(Error::InvalidBudgetCategory),
        (_, value) => value
            .and_then(BudgetCategory::parse)
            .map(Some)
            .ok_or(Error::MissingBudgetCategory),
    }
}

/// A transaction that has passed classification and is ready to be stored.
///
/// This is the only type the transaction store accepts for inserts, so an
/// invalid type/budget-category combination can never reach the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    /// The user that will own the transaction.
    pub user_id: UserId,
    /// Whether this transaction is income, an expense or savings.
    pub transaction_type: TransactionType,
    /// A free-form label, e.g. "Groceries".
    pub category: String,
    /// The budget bucket, present iff the type is not income.
    pub budget_category: Option<BudgetCategory>,
    /// The magnitude of the transaction in dollars, non-negative and finite.
    pub amount: f64,
    /// Optional free text.
    pub note: Option<String>,
    /// When the transaction happened.
    pub date: Date,
    /// The mock transaction being confirmed, when this insert is part of the
    /// confirmation workflow.
    pub mock_transaction_id: Option<DatabaseId>,
}

impl ValidatedTransaction {
    /// Validate a proposed transaction for `user_id`.
    ///
    /// `today` is used when the caller did not supply a date.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount is negative or not
    /// finite, and the errors of [classify_budget_category] for an invalid
    /// type/budget-category combination.
    pub fn classify(
        user_id: UserId,
        new_transaction: NewTransaction,
        today: Date,
    ) -> Result<Self, Error> {
        if !new_transaction.amount.is_finite() || new_transaction.amount < 0.0 {
            return Err(Error::InvalidAmount(new_transaction.amount));
        }

        let budget_category = classify_budget_category(
            new_transaction.transaction_type,
            new_transaction.budget_category.as_deref(),
        )?;

        Ok(Self {
            user_id,
            transaction_type: new_transaction.transaction_type,
            category: new_transaction.category,
            budget_category,
            amount: new_transaction.amount,
            note: new_transaction.note,
            date: new_transaction.date.unwrap_or(today),
            mock_transaction_id: None,
        })
    }
}

#[cfg(test)]
mod classify_tests {
    use time::macros::date;

    use crate::{
        Error, UserId,
        models::transaction::{
            BudgetCategory, NewTransaction, TransactionType, ValidatedTransaction,
            classify_budget_category,
        },
    };

    fn new_transaction(transaction_type: TransactionType) -> NewTransaction {
        NewTransaction {
            transaction_type,
            category: "Groceries".to_string(),
            amount: 25.0,
            budget_category: Some("needs".to_string()),
            note: None,
            date: Some(date!(2025 - 03 - 14)),
        }
    }

    #[test]
    fn expense_without_budget_category_is_rejected() {
        for budget_category in [None, Some(""), Some("luxuries")] {
            let result =
                classify_budget_category(TransactionType::Expense, budget_category);

            assert_eq!(result, Err(Error::MissingBudgetCategory));
        }
    }

    #[test]
    fn income_with_budget_category_is_rejected() {
        let result = classify_budget_category(TransactionType::Income, Some("needs"));

        assert_eq!(result, Err(Error::InvalidBudgetCategory));
    }

    #[test]
    fn income_without_budget_category_classifies_as_none() {
        assert_eq!(classify_budget_category(TransactionType::Income, None), Ok(None));
        assert_eq!(
            classify_budget_category(TransactionType::Income, Some("")),
            Ok(None)
        );
    }

    #[test]
    fn savings_classifies_by_budget_category() {
        let result = classify_budget_category(TransactionType::Savings, Some("savings"));

        assert_eq!(result, Ok(Some(BudgetCategory::Savings)));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let mut transaction = new_transaction(TransactionType::Expense);
        transaction.amount = -4.5;

        let result =
            ValidatedTransaction::classify(UserId::new(1), transaction, date!(2025 - 03 - 14));

        assert_eq!(result, Err(Error::InvalidAmount(-4.5)));
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut transaction = new_transaction(TransactionType::Expense);
            transaction.amount = amount;

            let result =
                ValidatedTransaction::classify(UserId::new(1), transaction, date!(2025 - 03 - 14));

            assert!(matches!(result, Err(Error::InvalidAmount(_))));
        }
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let mut transaction = new_transaction(TransactionType::Expense);
        transaction.date = None;
        let today = date!(2025 - 06 - 01);

        let validated = ValidatedTransaction::classify(UserId::new(1), transaction, today)
            .expect("classification should succeed");

        assert_eq!(validated.date, today);
    }

    #[test]
    fn validation_happens_before_any_field_is_kept() {
        let mut transaction = new_transaction(TransactionType::Expense);
        transaction.budget_category = None;

        let result =
            ValidatedTransaction::classify(UserId::new(1), transaction, date!(2025 - 03 - 14));

        assert_eq!(result, Err(Error::MissingBudgetCategory));
    }
}
