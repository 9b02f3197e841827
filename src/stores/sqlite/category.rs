//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, ToSql};

use crate::{
    DatabaseId, Error, UserId,
    models::{Category, CategoryName, NewCategory},
    stores::CategoryStore,
};

/// Stores user-defined categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteCategoryStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SqliteCategoryStore {
    fn create(&mut self, user_id: UserId, new_category: NewCategory) -> Result<Category, Error> {
        let name = CategoryName::new(&new_category.name)?;

        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO category (user_id, name, transaction_type)
                 VALUES (?1, ?2, ?3)
                 RETURNING id, user_id, name, transaction_type",
            )?
            .query_row(
                (user_id, name.as_ref(), new_category.transaction_type),
                map_category_row,
            )?;

        Ok(category)
    }

    fn get_for_user(&self, user_id: UserId) -> Result<Vec<Category>, Error> {
        let connection = self.connection.lock().unwrap();
        let mut statement = connection.prepare(
            "SELECT id, user_id, name, transaction_type FROM category
             WHERE user_id = :user_id ORDER BY name ASC",
        )?;
        let categories = statement
            .query_map(&[(":user_id", &user_id)], map_category_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    fn update(
        &mut self,
        user_id: UserId,
        category_id: DatabaseId,
        new_category: NewCategory,
    ) -> Result<Category, Error> {
        let name = CategoryName::new(&new_category.name)?;

        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "UPDATE category SET name = :name, transaction_type = :transaction_type
                 WHERE id = :id AND user_id = :user_id
                 RETURNING id, user_id, name, transaction_type",
            )?
            .query_row(
                &[
                    (":name", &name.as_ref() as &dyn ToSql),
                    (":transaction_type", &new_category.transaction_type),
                    (":id", &category_id),
                    (":user_id", &user_id),
                ],
                map_category_row,
            )?;

        Ok(category)
    }

    fn delete(&mut self, user_id: UserId, category_id: DatabaseId) -> Result<(), Error> {
        let rows_deleted = self.connection.lock().unwrap().execute(
            "DELETE FROM category WHERE id = :id AND user_id = :user_id",
            &[(":id", &category_id as &dyn ToSql), (":user_id", &user_id)],
        )?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: CategoryName::new_unchecked(&row.get::<_, String>(2)?),
        transaction_type: row.get(3)?,
    })
}
