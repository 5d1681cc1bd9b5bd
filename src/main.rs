// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;

use boardclub_rust_server::api::router;
use boardclub_rust_server::config::{LOG_FORMAT_ENV, NOTIFY_WEBHOOK_URL_ENV, WEBHOOK_SECRET_ENV};
use boardclub_rust_server::gate::IngressGate;
use boardclub_rust_server::notify::Notifier;
use boardclub_rust_server::state::AppState;
use boardclub_rust_server::store::ClubStore;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    if env::var(LOG_FORMAT_ENV).as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    init_tracing();

    let gate = IngressGate::new(env::var(WEBHOOK_SECRET_ENV).ok());
    let notifier = Notifier::new(env::var(NOTIFY_WEBHOOK_URL_ENV).ok());

    if env::var(WEBHOOK_SECRET_ENV).is_err() {
        tracing::warn!("WEBHOOK_SECRET not set; all webhook requests will be rejected");
    }

    let state = AppState::new(ClubStore::new(), gate, notifier);
    let app = router(state);

    // Parse bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!("Board Club server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}
