//! HTTP surface over the transfer engine.
//!
//! - `GET /accounts` lists every account
//! - `GET /accounts/{name}` returns one account
//! - `POST /transfer` executes a transfer
//! - `GET /health` reports liveness
//! - `GET /metrics` exposes Prometheus counters
//!
//! Balances are emitted as JSON numbers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::metrics::TransferMetrics;
use crate::{Account, TransferEngine, TransferRequest, TransferResponse};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TransferEngine>,
    pub metrics: Arc<TransferMetrics>,
}

#[derive(Serialize)]
struct AccountBody {
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    balance: Decimal,
}

impl From<Account> for AccountBody {
    fn from(account: Account) -> Self {
        Self {
            name: account.name,
            balance: account.balance,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/{name}", get(get_account))
        .route("/transfer", post(transfer))
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the router until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped gracefully");
    Ok(())
}

async fn list_accounts(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, AccountBody>> {
    let accounts = state
        .engine
        .get_all_accounts()
        .into_iter()
        .map(|(name, account)| (name, AccountBody::from(account)))
        .collect();
    Json(accounts)
}

async fn get_account(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.engine.get_account(&name) {
        Some(account) => Json(AccountBody::from(account)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, format!("account not found: {name}")),
    }
}

async fn transfer(
    State(state): State<AppState>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            state.metrics.record_invalid_request("/transfer");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("invalid request body: {}", rejection.body_text()),
            );
        }
    };

    match state.engine.execute_transfer(&request) {
        Ok(response) => {
            state.metrics.record_transfer(Ok(()));
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            state.metrics.record_transfer(Err(&err));
            let body = TransferResponse::rejected(&err);
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
    }
}

async fn render_metrics(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(err) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to render metrics: {err}"),
        ),
    }
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn error_response(status: StatusCode, message: String) -> Response {
    warn!(status = status.as_u16(), error = %message, "request failed");
    (status, Json(json!({ "error": message }))).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("received shutdown signal, stopping server");
}
