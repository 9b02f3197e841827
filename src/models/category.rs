//! Defines the user-defined category model.
//!
//! Categories are labels a user sets up for their transactions, e.g.
//! "Groceries" or "Eating Out". They are distinct from budget categories,
//! which are the fixed needs/wants/savings buckets of the 50/30/20 rule.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{DatabaseId, Error, TransactionType, UserId};

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    /// Returns [Error::EmptyCategoryName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A label a user created for their transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: DatabaseId,
    /// The user that created the category.
    pub user_id: UserId,
    /// The name of the category.
    pub name: CategoryName,
    /// The transaction type this category is meant for.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// The wire shape for creating or updating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    /// The name of the category.
    pub name: String,
    /// The transaction type this category is meant for.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}
