//! Query-parameter HTTP endpoints over the bank operations.

use {
    crate::{
        bank::{Bank, error::BankError, interface::BankInterface, parse_amount},
        config::HttpConfig,
        metrics::handler::render,
        models::{Customer, Money},
        statement::StatementView,
    },
    axum::{
        Json, Router,
        extract::{Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::{get, post},
    },
    serde::{Deserialize, Serialize},
    std::sync::Arc,
    tokio::task::JoinError,
    tracing::{error, info},
};

#[derive(Clone)]
pub struct AppState {
    bank: Arc<Bank>,
}

#[derive(Debug, Deserialize)]
pub struct AccountQuery {
    number: Option<String>,
    amount: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferQuery {
    from: Option<String>,
    to: Option<String>,
    amount: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

pub enum ApiError {
    Bank(BankError),
    Worker(JoinError),
}

impl From<BankError> for ApiError {
    fn from(e: BankError) -> Self {
        ApiError::Bank(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Bank(e) => {
                let status = match &e {
                    BankError::InvalidInput(_)
                    | BankError::InvalidAmount(_)
                    | BankError::SameAccount => StatusCode::BAD_REQUEST,
                    BankError::AccountNotFound(_) => StatusCode::NOT_FOUND,
                    BankError::InsufficientFunds { .. } => StatusCode::CONFLICT,
                    BankError::BalanceOverflow => StatusCode::UNPROCESSABLE_ENTITY,
                    BankError::Persistence(_)
                    | BankError::PartialTransferFailure { .. }
                    | BankError::AccountNumberExhausted(_)
                    | BankError::FailedToAcquireAccountLock(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, e.code().to_string(), e.to_string())
            }
            ApiError::Worker(e) => {
                error!("Request worker failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error".to_string(),
                    "request could not be completed".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}

fn required(value: Option<String>, what: &str) -> Result<String, BankError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BankError::InvalidInput(format!("{} is missing", what)))
}

fn required_amount(value: Option<String>) -> Result<Money, BankError> {
    parse_amount(&required(value, "amount")?)
}

/// Gateway calls block on SQLite, so they run off the async workers.
async fn run_blocking<F>(state: AppState, operation: F) -> Result<Json<StatementView>, ApiError>
where
    F: FnOnce(&Bank) -> Result<StatementView, BankError> + Send + 'static,
{
    let view = tokio::task::spawn_blocking(move || operation(&state.bank))
        .await
        .map_err(ApiError::Worker)??;

    Ok(Json(view))
}

async fn health() -> &'static str {
    "OK"
}

async fn metrics() -> Result<String, (StatusCode, String)> {
    render().map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

async fn statement(
    State(state): State<AppState>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<StatementView>, ApiError> {
    let number = required(query.number, "account number")?;

    run_blocking(state, move |bank| bank.get_statement(&number)).await
}

async fn deposit(
    State(state): State<AppState>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<StatementView>, ApiError> {
    let number = required(query.number, "account number")?;
    let amount = required_amount(query.amount)?;

    run_blocking(state, move |bank| bank.deposit(&number, amount)).await
}

async fn withdraw(
    State(state): State<AppState>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<StatementView>, ApiError> {
    let number = required(query.number, "account number")?;
    let amount = required_amount(query.amount)?;

    run_blocking(state, move |bank| bank.withdraw(&number, amount)).await
}

async fn transfer(
    State(state): State<AppState>,
    Query(query): Query<TransferQuery>,
) -> Result<Json<StatementView>, ApiError> {
    let (Some(from), Some(to)) = (query.from, query.to) else {
        return Err(BankError::InvalidInput(
            "two account numbers are needed to complete a transfer".to_string(),
        )
        .into());
    };
    let from = required(Some(from), "debiting account number")?;
    let to = required(Some(to), "receiving account number")?;
    let amount = required_amount(query.amount)?;

    run_blocking(state, move |bank| bank.transfer(&from, &to, amount)).await
}

async fn open_account(
    State(state): State<AppState>,
    Query(customer): Query<Customer>,
) -> Result<(StatusCode, Json<StatementView>), ApiError> {
    let view = run_blocking(state, move |bank| bank.open_account(customer)).await?;

    Ok((StatusCode::CREATED, view))
}

pub fn router(bank: Arc<Bank>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/statement", get(statement))
        .route("/deposit", get(deposit).post(deposit))
        .route("/withdraw", get(withdraw).post(withdraw))
        .route("/transfer", get(transfer).post(transfer))
        .route("/accounts", post(open_account))
        .with_state(AppState { bank })
}

/// Serves until the shutdown signal arrives. Binding or serving failures are
/// returned to the caller.
pub async fn start_http_service(
    config: HttpConfig,
    bank: Arc<Bank>,
    mut shutdown_receiver: tokio::sync::broadcast::Receiver<()>,
) -> std::io::Result<()> {
    let address = format!("{}:{}", config.address, config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .inspect_err(|e| error!("Failed to bind HTTP server to {}: {}", address, e))?;

    let shutdown = async move {
        shutdown_receiver.recv().await.ok();
        info!("HTTP server is shutting down...");
    };

    info!("Initializing HTTP server at {}", address);

    axum::serve(listener, router(bank))
        .with_graceful_shutdown(shutdown)
        .await
        .inspect_err(|e| error!("Error in HTTP server: {}", e))
}
