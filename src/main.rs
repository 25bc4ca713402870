// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal To-do Server
//!
//! Serves the sign-in pages and each user's private to-do list.

use personal_todo::{
    config::{Config, StoreKind},
    db::FirestoreDb,
    services::{AuthGateway, IdentityClient, SessionStore},
    views::Views,
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting personal to-do server");

    // Initialize the to-do store
    let db = match config.store {
        StoreKind::Firestore => FirestoreDb::new(&config.gcp_project_id).await?,
        StoreKind::Memory => {
            tracing::warn!("Using in-memory to-do store; data is lost on restart");
            FirestoreDb::new_in_memory()
        }
    };

    // Identity provider client and session store
    let identity = IdentityClient::new(&config)?;
    tracing::info!(base_url = %config.identity_base_url, "Identity provider client initialized");
    let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));
    let auth = AuthGateway::new(identity, sessions);

    // Page templates
    let views = Views::new()?;

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        auth,
        views,
    });

    // Build router
    let app = personal_todo::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), tracing_subscriber::filter::ParseError> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("personal_todo=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
