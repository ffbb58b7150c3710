//! checkhost-relay - Gatus alert relay
//!
//! Receives Gatus alert webhooks, starts a check-host.net HTTP check for the
//! alerting host, and posts the result link to a Telegram chat.

pub mod alert;
pub mod checkhost;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod io;
pub mod notifier;
pub mod telegram;
pub mod webhook;

pub use config::Config;
pub use error::{RelayError, Result};

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::checkhost::CheckHostClient;
use crate::dispatcher::Dispatcher;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::telegram::TelegramNotifier;
use crate::webhook::AppState;

/// Run the relay service with the given configuration until Ctrl-C or SIGTERM
pub async fn run(config: Config) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Starting server on http://{}", addr);

    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::default());
    serve(listener, Arc::new(config), http, cancel).await
}

/// Serve the relay on `listener` until `cancel` fires, then wait for
/// in-flight dispatches to finish.
pub async fn serve(
    listener: TcpListener,
    config: Arc<Config>,
    http: Arc<dyn HttpClient>,
    cancel: CancellationToken,
) -> Result<()> {
    let notifier: Arc<dyn Notifier> =
        Arc::new(TelegramNotifier::new(&config, Arc::clone(&http)));
    tracing::debug!("Notifier: {}", notifier.type_name());

    let dispatcher = Dispatcher::new(
        Arc::clone(&config),
        CheckHostClient::new(http),
        notifier,
    );
    let router = webhook::build_router(AppState::new(dispatcher.clone()));

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await?;

    let pending = dispatcher.in_flight();
    if pending > 0 {
        tracing::info!("Waiting for {} in-flight dispatch(es)", pending);
    }
    dispatcher.wait_for_in_flight().await;
    tracing::info!("Relay stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to register SIGTERM handler: {}", e);
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
}
