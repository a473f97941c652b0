//! Airtable ingress: receives the "quote requested" automation webhook and
//! notifies the customer with the `quote_preparing` WhatsApp template.
//!
//! ```text
//! POST /api/airtable-webhook {"phone": "..."}
//!   -> POST {WA_API_BASE}/{WHATSAPP_NUMBER_ID}/messages
//! ```

mod config;
mod handler;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router, middleware,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use qn_core::{EnvCredentials, WhatsAppClient};
use qn_ingress_common::with_request_id;
use qn_telemetry::install as init_telemetry;
use tokio::signal;

use crate::config::AppConfig;
use crate::handler::{AppState, WEBHOOK_ROUTE, method_not_allowed, receive};

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry("quote-notify")?;
    let config = AppConfig::from_env()?;

    let sender = WhatsAppClient::new(reqwest::Client::new(), Some(config.api_base.clone()));
    let state = AppState {
        sender: Arc::new(sender),
        credentials: Arc::new(EnvCredentials),
    };

    let app = build_router(state);

    tracing::info!(
        addr = %config.bind,
        api_base = %config.api_base,
        "ingress-airtable listening"
    );
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route(WEBHOOK_ROUTE, post(receive).fallback(method_not_allowed))
        .route("/healthz", get(healthz))
        .layer(middleware::from_fn(with_request_id))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
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
    tracing::info!("shutdown signal received");
}
