//! HTTP ingress: Gatus webhook and liveness endpoints

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{any, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::alert::AlertPayload;
use crate::dispatcher::Dispatcher;

/// Handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

/// Build the ingress router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/webhook",
            post(webhook_handler).fallback(method_not_allowed),
        )
        .route("/health", any(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Decodes the raw body so the outcome does not depend on `Content-Type`
async fn webhook_handler(State(app): State<AppState>, body: Bytes) -> impl IntoResponse {
    let payload = match AlertPayload::from_body(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Error decoding webhook: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid payload");
        }
    };

    tracing::info!(
        "Received alert: {} (Status: {})",
        payload.name,
        payload.status
    );

    if payload.requests_check() {
        app.dispatcher.dispatch(payload);
    } else {
        tracing::info!(
            "Skipping alert - status is not 'check' (got: {})",
            payload.status
        );
    }

    (StatusCode::OK, "OK")
}

async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
