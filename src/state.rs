//! Implements a struct that holds the state of the REST server.

use std::{
    marker::{Send, Sync},
    sync::{Arc, Mutex},
};

use axum::extract::FromRef;
use jsonwebtoken::{DecodingKey, EncodingKey};
use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    stores::{
        BankStore, CategoryStore, TransactionStore,
        sqlite::{SqliteBankStore, SqliteCategoryStore, SqliteTransactionStore},
    },
};

#[derive(Clone)]
struct JwtKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState<B, C, T>
where
    B: BankStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    jwt_keys: JwtKeys,
    /// The store for bank accounts and their mock transactions.
    pub bank_store: B,
    /// The store for user-defined categories.
    pub category_store: C,
    /// The store for ledger transactions.
    pub transaction_store: T,
}

impl<B, C, T> AppState<B, C, T>
where
    B: BankStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    /// Create a new [AppState].
    ///
    /// `jwt_secret` must match the secret the identity service signs tokens
    /// with.
    pub fn new(jwt_secret: &str, bank_store: B, category_store: C, transaction_store: T) -> Self {
        Self {
            jwt_keys: JwtKeys::new(jwt_secret),
            bank_store,
            category_store,
            transaction_store,
        }
    }

    /// The encoding key for JWTs, for tooling and tests that mint their own
    /// tokens.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.jwt_keys.encoding_key
    }
}

/// The state needed to authenticate a request.
#[derive(Clone)]
pub struct AuthState {
    /// The decoding key for JWTs.
    pub decoding_key: DecodingKey,
}

impl<B, C, T> FromRef<AppState<B, C, T>> for AuthState
where
    B: BankStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<B, C, T>) -> Self {
        Self {
            decoding_key: state.jwt_keys.decoding_key.clone(),
        }
    }
}

/// The state needed to get or create transactions.
#[derive(Clone)]
pub struct TransactionState<T>
where
    T: TransactionStore + Clone + Send + Sync,
{
    /// The store for ledger transactions.
    pub transaction_store: T,
}

impl<B, C, T> FromRef<AppState<B, C, T>> for TransactionState<T>
where
    B: BankStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<B, C, T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The state needed for bank accounts and the confirmation workflow.
#[derive(Clone)]
pub struct BankState<B>
where
    B: BankStore + Clone + Send + Sync,
{
    /// The store for bank accounts and their mock transactions.
    pub bank_store: B,
}

impl<B, C, T> FromRef<AppState<B, C, T>> for BankState<B>
where
    B: BankStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<B, C, T>) -> Self {
        Self {
            bank_store: state.bank_store.clone(),
        }
    }
}

/// The state needed to manage categories.
#[derive(Clone)]
pub struct CategoryState<C>
where
    C: CategoryStore + Clone + Send + Sync,
{
    /// The store for user-defined categories.
    pub category_store: C,
}

impl<B, C, T> FromRef<AppState<B, C, T>> for CategoryState<C>
where
    B: BankStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<B, C, T>) -> Self {
        Self {
            category_store: state.category_store.clone(),
        }
    }
}

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SqliteAppState = AppState<SqliteBankStore, SqliteCategoryStore, SqliteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the
/// domain models.
pub fn create_app_state(
    db_connection: Connection,
    jwt_secret: &str,
) -> Result<SqliteAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let bank_store = SqliteBankStore::new(connection.clone());
    let category_store = SqliteCategoryStore::new(connection.clone());
    let transaction_store = SqliteTransactionStore::new(connection);

    Ok(AppState::new(
        jwt_secret,
        bank_store,
        category_store,
        transaction_store,
    ))
}
