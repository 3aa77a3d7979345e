//! Documentation of the single-record profile service.
//!
//! One user, one row. The store keeps a username, email and phone number in a local SQLite
//! table and hands it to the profile form over a small JSON API.
//!
//!
//!
//! # General Infrastructure
//! - Form (CLI or any other front-end built on the `form` crate) talks to this server over HTTP
//! - Server owns the SQLite file, nothing else opens it
//! - Caller identity is decided upstream, a gateway sets `x-user-*` headers and the server echoes them back
//! - No sessions, no auth, no multi-user data
//!
//!
//!
//! # Routes
//!
//! | Method | Path           | Success                                 | Failure                      |
//! |--------|----------------|-----------------------------------------|------------------------------|
//! | GET    | `/api/profile` | 200, `{ id, username, email, phone }`   | 400, storage error message   |
//! | POST   | `/api/profile` | 200, `Profile Created`/`Profile Updated`| 400, storage error/malformed |
//! | GET    | `/api/user`    | 200, identity object or `{}`            |                              |
//!
//!
//!
//! # Notes
//!
//! ## Upsert
//! The row is always id 1. First write inserts it, every later write updates it. Both happen
//! in one immediate transaction so two first writes cannot both try to insert.
//!
//! ## Startup
//! The table is created if absent. If that fails we log and keep serving, the read/write
//! routes will then report the storage error to the caller.
//!
//!
//!
//! # Setup
//!
//! Environment.
//! ```sh
//! RUST_PORT=3030 PROFILE_DB_PATH=database.db RUST_LOG=info cargo run -p profile
//! ```
//!
//! Poke it.
//! ```sh
//! curl localhost:3030/api/profile
//! curl -X POST localhost:3030/api/profile \
//!     -H 'content-type: application/json' \
//!     -d '{"username":"alice","email":"a@b.com","phone":"1234567890"}'
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    middleware::from_fn_with_state,
    routing::get,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod identity;
pub mod routes;
pub mod state;
pub mod utils;

use identity::attach_identity;
use routes::{get_profile_handler, post_profile_handler, user_handler};
use shared::{PROFILE_ROUTE, USER_ROUTE};
use state::AppState;

pub async fn start_server() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new()?;

    info!("Starting server...");

    let app = app(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            PROFILE_ROUTE,
            get(get_profile_handler).post(post_profile_handler),
        )
        .route(
            USER_ROUTE,
            get(user_handler).layer(from_fn_with_state(state.clone(), attach_identity)),
        )
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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
