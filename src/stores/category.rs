//! Defines the category store trait.

use crate::{
    DatabaseId, Error, UserId,
    models::{Category, NewCategory},
};

/// Creates and retrieves the categories a user has set up for their
/// transactions.
pub trait CategoryStore {
    /// Create a new category for `user_id`.
    ///
    /// # Errors
    /// Returns [Error::EmptyCategoryName] if the name is an empty string.
    fn create(&mut self, user_id: UserId, new_category: NewCategory) -> Result<Category, Error>;

    /// Get all categories created by `user_id`.
    fn get_for_user(&self, user_id: UserId) -> Result<Vec<Category>, Error>;

    /// Update one of `user_id`'s categories.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `category_id` does not refer to a
    /// category owned by `user_id`, and [Error::EmptyCategoryName] if the
    /// new name is an empty string.
    fn update(
        &mut self,
        user_id: UserId,
        category_id: DatabaseId,
        new_category: NewCategory,
    ) -> Result<Category, Error>;

    /// Delete one of `user_id`'s categories.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `category_id` does not refer to a
    /// category owned by `user_id`.
    fn delete(&mut self, user_id: UserId, category_id: DatabaseId) -> Result<(), Error>;
}
