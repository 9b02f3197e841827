//! Defines the HTTP routes of the application and their handlers.
//!
//! Every route requires a bearer token; the [AuthenticatedUser] extractor
//! rejects the request with 401 before the handler body runs. Handlers are
//! generic over the store traits so the API can be tested against any
//! backend.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    DatabaseId, Error,
    auth::AuthenticatedUser,
    models::{
        BankAccount, Category, ConfirmTransaction, MockTransaction, NewBankAccount, NewCategory,
        NewTransaction, Transaction, TransactionType, ValidatedTransaction,
    },
    report::{Bucket, BudgetReport, Dimension, Granularity, aggregate, evaluate},
    state::{AppState, BankState, CategoryState, TransactionState},
    stores::{BankStore, CategoryStore, SortOrder, TransactionQuery, TransactionStore},
};

/// The paths for the REST API.
pub mod endpoints {
    /// Create (POST) or list (GET) the user's transactions.
    pub const TRANSACTIONS: &str = "/api/transactions";
    /// Delete (DELETE) one of the user's transactions.
    pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
    /// Get (GET) the user's 50/30/20 budget report.
    pub const BUDGET_REPORT: &str = "/api/transactions/budget";
    /// Get (GET) the user's grouped expense report at a time granularity.
    pub const EXPENSE_REPORT: &str = "/api/reports/expenses/{granularity}";
    /// Link (POST) a bank account.
    pub const LINK_BANK_ACCOUNT: &str = "/api/bank/link";
    /// List (GET) the user's linked bank accounts.
    pub const BANK_ACCOUNTS: &str = "/api/bank/accounts";
    /// Delete (DELETE) one of the user's bank accounts.
    pub const BANK_ACCOUNT: &str = "/api/bank/accounts/{account_id}";
    /// List (GET) the user's unconfirmed mock transactions.
    pub const MOCK_TRANSACTIONS: &str = "/api/bank/mock-transactions";
    /// Confirm (POST) a mock transaction into the ledger.
    pub const CONFIRM_TRANSACTION: &str = "/api/bank/confirm";
    /// Create (POST) or list (GET) the user's categories.
    pub const CATEGORIES: &str = "/api/categories";
    /// Update (PUT) or delete (DELETE) one of the user's categories.
    pub const CATEGORY: &str = "/api/categories/{category_id}";
}

/// Create the router for the REST API.
pub fn build_router<B, C, T>(state: AppState<B, C, T>) -> Router
where
    B: BankStore + Clone + Send + Sync + 'static,
    C: CategoryStore + Clone + Send + Sync + 'static,
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction::<T>).get(get_transactions::<T>),
        )
        .route(endpoints::BUDGET_REPORT, get(get_budget_report::<T>))
        .route(endpoints::TRANSACTION, delete(delete_transaction::<T>))
        .route(endpoints::EXPENSE_REPORT, get(get_expense_report::<T>))
        .route(endpoints::LINK_BANK_ACCOUNT, post(link_bank_account::<B>))
        .route(endpoints::BANK_ACCOUNTS, get(get_bank_accounts::<B>))
        .route(endpoints::BANK_ACCOUNT, delete(delete_bank_account::<B>))
        .route(
            endpoints::MOCK_TRANSACTIONS,
            get(get_mock_transactions::<B>),
        )
        .route(
            endpoints::CONFIRM_TRANSACTION,
            post(confirm_transaction::<B>),
        )
        .route(
            endpoints::CATEGORIES,
            post(create_category::<C>).get(get_categories::<C>),
        )
        .route(
            endpoints::CATEGORY,
            put(update_category::<C>).delete(delete_category::<C>),
        )
        .with_state(state)
}

/// Classify and store a new transaction for the authenticated user.
async fn create_transaction<T>(
    State(mut state): State<TransactionState<T>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let today = OffsetDateTime::now_utc().date();
    let validated = ValidatedTransaction::classify(user_id, new_transaction, today)?;
    let transaction = state.transaction_store.create(validated)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// The optional filters for listing transactions.
#[derive(Debug, Default, Deserialize)]
struct ListTransactionsQuery {
    /// Only include transactions of this type.
    #[serde(rename = "type")]
    transaction_type: Option<TransactionType>,
    /// Include at most this many transactions.
    limit: Option<u64>,
}

/// List the authenticated user's transactions, most recent first.
async fn get_transactions<T>(
    State(state): State<TransactionState<T>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let transactions = state.transaction_store.get_query(
        user_id,
        TransactionQuery {
            transaction_type: query.transaction_type,
            sort_date: Some(SortOrder::Descending),
            limit: query.limit,
            ..TransactionQuery::default()
        },
    )?;

    Ok(Json(transactions))
}

/// Delete one of the authenticated user's transactions.
async fn delete_transaction<T>(
    State(mut state): State<TransactionState<T>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(transaction_id): Path<DatabaseId>,
) -> Result<StatusCode, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    state.transaction_store.delete(user_id, transaction_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the 50/30/20 budget report over all of the user's transactions.
async fn get_budget_report<T>(
    State(state): State<TransactionState<T>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<BudgetReport>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let transactions = state
        .transaction_store
        .get_query(user_id, TransactionQuery::default())?;

    Ok(Json(evaluate(&transactions)))
}

/// The query string for the expense report.
#[derive(Debug, Default, Deserialize)]
struct ExpenseReportQuery {
    /// A comma separated list of dimensions to group by.
    by: Option<String>,
}

/// Get the user's expenses grouped into time buckets.
async fn get_expense_report<T>(
    State(state): State<TransactionState<T>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(granularity): Path<Granularity>,
    Query(query): Query<ExpenseReportQuery>,
) -> Result<Json<Vec<Bucket>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let dimensions = parse_dimensions(query.by.as_deref())?;
    let transactions = state.transaction_store.get_query(
        user_id,
        TransactionQuery {
            transaction_type: Some(TransactionType::Expense),
            ..TransactionQuery::default()
        },
    )?;

    Ok(Json(aggregate(&transactions, granularity, &dimensions)))
}

/// Parse the comma separated `by` query parameter into dimensions.
///
/// # Errors
/// Returns [Error::UnknownDimension] naming the first value that is not a
/// valid dimension.
fn parse_dimensions(by: Option<&str>) -> Result<Vec<Dimension>, Error> {
    let Some(by) = by else {
        return Ok(Vec::new());
    };

    by.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| Dimension::parse(value).ok_or_else(|| Error::UnknownDimension(value.to_string())))
        .collect()
}

/// Link a bank account and seed its mock transactions.
async fn link_bank_account<B>(
    State(mut state): State<BankState<B>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(new_account): Json<NewBankAccount>,
) -> Result<(StatusCode, Json<BankAccount>), Error>
where
    B: BankStore + Clone + Send + Sync,
{
    let today = OffsetDateTime::now_utc().date();
    let account = state.bank_store.link_account(user_id, new_account, today)?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// List the authenticated user's linked bank accounts.
async fn get_bank_accounts<B>(
    State(state): State<BankState<B>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<BankAccount>>, Error>
where
    B: BankStore + Clone + Send + Sync,
{
    let accounts = state.bank_store.get_accounts(user_id)?;

    Ok(Json(accounts))
}

/// Delete one of the user's bank accounts and its mock transactions.
async fn delete_bank_account<B>(
    State(mut state): State<BankState<B>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(account_id): Path<DatabaseId>,
) -> Result<StatusCode, Error>
where
    B: BankStore + Clone + Send + Sync,
{
    state.bank_store.delete_account(user_id, account_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the user's mock transactions that have not been confirmed yet.
async fn get_mock_transactions<B>(
    State(state): State<BankState<B>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<MockTransaction>>, Error>
where
    B: BankStore + Clone + Send + Sync,
{
    let mock_transactions = state.bank_store.get_pending_mock_transactions(user_id)?;

    Ok(Json(mock_transactions))
}

/// Confirm one of the user's mock transactions into the ledger.
async fn confirm_transaction<B>(
    State(mut state): State<BankState<B>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(confirm): Json<ConfirmTransaction>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    B: BankStore + Clone + Send + Sync,
{
    let transaction = state.bank_store.confirm_mock_transaction(user_id, confirm)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Create a category for the authenticated user.
async fn create_category<C>(
    State(mut state): State<CategoryState<C>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(new_category): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), Error>
where
    C: CategoryStore + Clone + Send + Sync,
{
    let category = state.category_store.create(user_id, new_category)?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// List the authenticated user's categories.
async fn get_categories<C>(
    State(state): State<CategoryState<C>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<Category>>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
{
    let categories = state.category_store.get_for_user(user_id)?;

    Ok(Json(categories))
}

/// Update one of the user's categories.
async fn update_category<C>(
    State(mut state): State<CategoryState<C>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(category_id): Path<DatabaseId>,
    Json(new_category): Json<NewCategory>,
) -> Result<Json<Category>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
{
    let category = state
        .category_store
        .update(user_id, category_id, new_category)?;

    Ok(Json(category))
}

/// Delete one of the user's categories.
async fn delete_category<C>(
    State(mut state): State<CategoryState<C>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(category_id): Path<DatabaseId>,
) -> Result<StatusCode, Error>
where
    C: CategoryStore + Clone + Send + Sync,
{
    state.category_store.delete(user_id, category_id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod api_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        Transaction, UserId,
        auth::encode_token,
        models::{BankAccount, Category, MockTransaction},
        routes::{build_router, endpoints},
        state::create_app_state,
    };

    /// A test server plus bearer tokens for two users.
    fn test_server() -> (TestServer, String, String) {
        let connection = Connection::open_in_memory().expect("could not open database");
        let state =
            create_app_state(connection, "test-secret").expect("could not create app state");

        let token = encode_token(UserId::new(1), state.encoding_key());
        let other_token = encode_token(UserId::new(2), state.encoding_key());
        let server = TestServer::new(build_router(state));

        (server, token, other_token)
    }

    #[tokio::test]
    async fn requests_without_a_token_are_rejected() {
        let (server, _, _) = test_server();

        let response = server.get(endpoints::TRANSACTIONS).await;

        assert_eq!(response.status_code(), 401);
    }

    #[tokio::test]
    async fn requests_with_an_invalid_token_are_rejected() {
        let (server, _, _) = test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer("not.a.token")
            .await;

        assert_eq!(response.status_code(), 401);
    }

    #[tokio::test]
    async fn create_transaction_returns_the_stored_transaction() {
        let (server, token, _) = test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .json(&json!({
                "type": "expense",
                "category": "Groceries",
                "amount": 35.6,
                "budget_category": "needs",
                "date": "2025-03-14",
            }))
            .await;

        assert_eq!(response.status_code(), 201);
        let transaction = response.json::<Transaction>();
        assert_eq!(transaction.user_id, UserId::new(1));
        assert_eq!(transaction.category, "Groceries");
        assert_eq!(transaction.amount, 35.6);
    }

    #[tokio::test]
    async fn create_expense_without_budget_category_is_rejected() {
        let (server, token, _) = test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .json(&json!({
                "type": "expense",
                "category": "Groceries",
                "amount": 35.6,
            }))
            .await;

        assert_eq!(response.status_code(), 422);
        let body = response.json::<Value>();
        assert_eq!(
            body["error"],
            "a budget category (needs, wants or savings) is required"
        );
    }

    #[tokio::test]
    async fn create_income_with_budget_category_is_rejected() {
        let (server, token, _) = test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .json(&json!({
                "type": "income",
                "category": "Wages",
                "amount": 1000.0,
                "budget_category": "needs",
            }))
            .await;

        assert_eq!(response.status_code(), 422);
    }

    #[tokio::test]
    async fn transactions_are_listed_most_recent_first() {
        let (server, token, _) = test_server();
        for (date, category) in [("2025-01-02", "Older"), ("2025-04-05", "Newer")] {
            server
                .post(endpoints::TRANSACTIONS)
                .authorization_bearer(&token)
                .json(&json!({
                    "type": "expense",
                    "category": category,
                    "amount": 10.0,
                    "budget_category": "wants",
                    "date": date,
                }))
                .await;
        }

        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .await
            .json::<Vec<Transaction>>();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].category, "Newer");
        assert_eq!(transactions[1].category, "Older");
    }

    #[tokio::test]
    async fn transactions_are_scoped_to_the_authenticated_user() {
        let (server, token, other_token) = test_server();
        server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .json(&json!({
                "type": "savings",
                "category": "Emergency Fund",
                "amount": 100.0,
                "budget_category": "savings",
            }))
            .await;

        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&other_token)
            .await
            .json::<Vec<Transaction>>();

        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn delete_transaction_removes_it() {
        let (server, token, _) = test_server();
        let transaction = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .json(&json!({
                "type": "expense",
                "category": "Coffee",
                "amount": 4.5,
                "budget_category": "wants",
            }))
            .await
            .json::<Transaction>();

        let response = server
            .delete(&format!("/api/transactions/{}", transaction.id))
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), 204);

        let retry = server
            .delete(&format!("/api/transactions/{}", transaction.id))
            .authorization_bearer(&token)
            .await;
        assert_eq!(retry.status_code(), 404);
    }

    #[tokio::test]
    async fn budget_report_matches_the_fifty_thirty_twenty_split() {
        let (server, token, _) = test_server();
        let transactions = [
            json!({"type": "income", "category": "Wages", "amount": 1000.0}),
            json!({"type": "expense", "category": "Rent", "amount": 600.0, "budget_category": "needs"}),
            json!({"type": "expense", "category": "Eating Out", "amount": 200.0, "budget_category": "wants"}),
            json!({"type": "savings", "category": "Emergency Fund", "amount": 100.0, "budget_category": "savings"}),
        ];
        for transaction in transactions {
            server
                .post(endpoints::TRANSACTIONS)
                .authorization_bearer(&token)
                .json(&transaction)
                .await;
        }

        let report = server
            .get(endpoints::BUDGET_REPORT)
            .authorization_bearer(&token)
            .await
            .json::<Value>();

        assert_eq!(report["stats"]["total_income"], 1000.0);
        assert_eq!(report["usage"]["needs"], 120.0);
        assert_eq!(report["usage"]["wants"], 66.67);
        assert_eq!(report["usage"]["savings"], 50.0);
    }

    #[tokio::test]
    async fn expense_report_groups_by_month() {
        let (server, token, _) = test_server();
        let transactions = [
            json!({"type": "expense", "category": "Groceries", "amount": 30.0, "budget_category": "needs", "date": "2025-05-01"}),
            json!({"type": "expense", "category": "Groceries", "amount": 20.0, "budget_category": "needs", "date": "2025-05-17"}),
            json!({"type": "expense", "category": "Rent", "amount": 500.0, "budget_category": "needs", "date": "2025-06-01"}),
            // Income never shows up in an expense report.
            json!({"type": "income", "category": "Wages", "amount": 1000.0, "date": "2025-05-02"}),
        ];
        for transaction in transactions {
            server
                .post(endpoints::TRANSACTIONS)
                .authorization_bearer(&token)
                .json(&transaction)
                .await;
        }

        let buckets = server
            .get("/api/reports/expenses/month")
            .authorization_bearer(&token)
            .await
            .json::<Value>();

        assert_eq!(
            buckets,
            json!([
                {"time_key": {"year": 2025, "month": 6}, "total": 500.0},
                {"time_key": {"year": 2025, "month": 5}, "total": 50.0},
            ])
        );
    }

    #[tokio::test]
    async fn expense_report_groups_by_category() {
        let (server, token, _) = test_server();
        let transactions = [
            json!({"type": "expense", "category": "Groceries", "amount": 30.0, "budget_category": "needs", "date": "2025-05-01"}),
            json!({"type": "expense", "category": "Coffee", "amount": 4.5, "budget_category": "wants", "date": "2025-05-03"}),
        ];
        for transaction in transactions {
            server
                .post(endpoints::TRANSACTIONS)
                .authorization_bearer(&token)
                .json(&transaction)
                .await;
        }

        let buckets = server
            .get("/api/reports/expenses/month")
            .add_query_param("by", "category")
            .authorization_bearer(&token)
            .await
            .json::<Value>();

        assert_eq!(
            buckets,
            json!([
                {"time_key": {"year": 2025, "month": 5}, "category": "Coffee", "total": 4.5},
                {"time_key": {"year": 2025, "month": 5}, "category": "Groceries", "total": 30.0},
            ])
        );
    }

    #[tokio::test]
    async fn expense_report_rejects_an_unknown_dimension() {
        let (server, token, _) = test_server();

        let response = server
            .get("/api/reports/expenses/month")
            .add_query_param("by", "mood")
            .authorization_bearer(&token)
            .await;

        assert_eq!(response.status_code(), 422);
        let body = response.json::<Value>();
        assert_eq!(body["error"], "\"mood\" is not a valid grouping dimension");
    }

    #[tokio::test]
    async fn linking_a_bank_account_seeds_mock_transactions() {
        let (server, token, _) = test_server();

        let response = server
            .post(endpoints::LINK_BANK_ACCOUNT)
            .authorization_bearer(&token)
            .json(&json!({"bank_name": "Kiwibank", "account_number": "12-3456-7890123-00"}))
            .await;
        assert_eq!(response.status_code(), 201);
        let account = response.json::<BankAccount>();
        assert_eq!(account.bank_name, "Kiwibank");

        let mock_transactions = server
            .get(endpoints::MOCK_TRANSACTIONS)
            .authorization_bearer(&token)
            .await
            .json::<Vec<MockTransaction>>();

        assert_eq!(mock_transactions.len(), 3);
        assert!(mock_transactions.iter().all(|mock| !mock.is_added));
    }

    #[tokio::test]
    async fn confirming_a_mock_transaction_is_exactly_once() {
        let (server, token, _) = test_server();
        server
            .post(endpoints::LINK_BANK_ACCOUNT)
            .authorization_bearer(&token)
            .json(&json!({"bank_name": "Kiwibank", "account_number": "12-3456-7890123-00"}))
            .await;
        let coffee = server
            .get(endpoints::MOCK_TRANSACTIONS)
            .authorization_bearer(&token)
            .await
            .json::<Vec<MockTransaction>>()
            .into_iter()
            .find(|mock| mock.description == "Coffee")
            .expect("the seeded coffee transaction should be pending");

        let confirm = json!({"mock_id": coffee.id, "category": "Food", "type": "expense"});
        let response = server
            .post(endpoints::CONFIRM_TRANSACTION)
            .authorization_bearer(&token)
            .json(&confirm)
            .await;
        assert_eq!(response.status_code(), 201);
        let transaction = response.json::<Transaction>();
        assert_eq!(transaction.amount, 4.5);
        assert_eq!(transaction.note.as_deref(), Some("Coffee"));
        assert_eq!(transaction.mock_transaction_id, Some(coffee.id));

        // Retrying must not create a second ledger entry.
        let retry = server
            .post(endpoints::CONFIRM_TRANSACTION)
            .authorization_bearer(&token)
            .json(&confirm)
            .await;
        assert_eq!(retry.status_code(), 404);

        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .await
            .json::<Vec<Transaction>>();
        assert_eq!(transactions.len(), 1);

        let pending = server
            .get(endpoints::MOCK_TRANSACTIONS)
            .authorization_bearer(&token)
            .await
            .json::<Vec<MockTransaction>>();
        assert_eq!(pending.len(), 2);
    }

    #[tokio::test]
    async fn deleting_a_bank_account_keeps_confirmed_transactions() {
        let (server, token, _) = test_server();
        let account = server
            .post(endpoints::LINK_BANK_ACCOUNT)
            .authorization_bearer(&token)
            .json(&json!({"bank_name": "Kiwibank", "account_number": "12-3456-7890123-00"}))
            .await
            .json::<BankAccount>();
        let mock = server
            .get(endpoints::MOCK_TRANSACTIONS)
            .authorization_bearer(&token)
            .await
            .json::<Vec<MockTransaction>>()
            .remove(0);
        server
            .post(endpoints::CONFIRM_TRANSACTION)
            .authorization_bearer(&token)
            .json(&json!({"mock_id": mock.id, "category": "Misc", "type": "expense"}))
            .await;

        let response = server
            .delete(&format!("/api/bank/accounts/{}", account.id))
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), 204);

        let pending = server
            .get(endpoints::MOCK_TRANSACTIONS)
            .authorization_bearer(&token)
            .await
            .json::<Vec<MockTransaction>>();
        assert!(pending.is_empty());

        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .await
            .json::<Vec<Transaction>>();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].mock_transaction_id, None);
    }

    #[tokio::test]
    async fn category_crud_round_trip() {
        let (server, token, _) = test_server();

        let response = server
            .post(endpoints::CATEGORIES)
            .authorization_bearer(&token)
            .json(&json!({"name": "Groceries", "type": "expense"}))
            .await;
        assert_eq!(response.status_code(), 201);
        let category = response.json::<Category>();

        let updated = server
            .put(&format!("/api/categories/{}", category.id))
            .authorization_bearer(&token)
            .json(&json!({"name": "Food", "type": "expense"}))
            .await
            .json::<Category>();
        assert_eq!(updated.name.as_ref(), "Food");

        let response = server
            .delete(&format!("/api/categories/{}", category.id))
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), 204);

        let categories = server
            .get(endpoints::CATEGORIES)
            .authorization_bearer(&token)
            .await
            .json::<Vec<Category>>();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn creating_an_empty_category_is_rejected() {
        let (server, token, _) = test_server();

        let response = server
            .post(endpoints::CATEGORIES)
            .authorization_bearer(&token)
            .json(&json!({"name": "", "type": "expense"}))
            .await;

        assert_eq!(response.status_code(), 422);
    }
}
