//! Poky Backend
//!
//! A REST backend serving the Poky mobile app from an in-memory poke ledger.
//! Nothing is persisted: the process starts from the seed dataset and all
//! state is gone on exit.

mod api;
mod auth;
mod config;
mod errors;
mod ledger;
mod models;
mod notify;
mod timefmt;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use ledger::{seed, PokeLedger};
use models::User;
use notify::Notifier;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<RwLock<PokeLedger>>,
    pub notifier: Arc<Notifier>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Poky Backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (POKY_API_PSK). Authentication is disabled!");
    }

    // Build the in-memory ledger
    let ledger = if config.seed_demo {
        seed::demo_ledger()
    } else {
        PokeLedger::new(User::new("robin", "Robin Augereau"))
    };
    tracing::info!(
        users = ledger.users().len(),
        relations = ledger.relations().len(),
        "Ledger initialized"
    );

    // Notification pipeline
    let notifier = Arc::new(Notifier::new(config.push_buffer));
    let dispatcher = Arc::clone(&notifier);
    tokio::spawn(async move { dispatcher.run_dispatcher().await });

    // Create application state
    let state = AppState {
        ledger: Arc::new(RwLock::new(ledger)),
        notifier,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Snapshot
        .route("/snapshot", get(api::get_snapshot))
        .route("/snapshot/revision", get(api::get_revision))
        // Users
        .route("/users", get(api::list_users))
        .route("/users/{id}", get(api::get_user))
        // Pokes
        .route("/pokes", post(api::send_poke))
        .route("/pokes/recent", get(api::recent_pokes))
        .route("/pokes/{id}/read", post(api::mark_poke_read))
        // Relations
        .route("/relations", get(api::list_relations))
        .route("/relations/{id}", delete(api::delete_relation))
        .route("/relations/{id}/anonymize", post(api::anonymize_relation))
        // Leaderboard
        .route("/leaderboard", get(api::get_leaderboard))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Open routes: health check and the client's fire-and-forget device
    // registration (no auth required)
    let open_routes = Router::new()
        .route("/health", get(health_check))
        .route("/register", get(api::register_device));

    Router::new()
        .nest("/api", api_routes)
        .merge(open_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
