//! Pet Adoption Server
//!
//! A REST backend for the pet adoption web client: pets, adoption requests and
//! fundraising campaigns, persisted in SQLite.

mod api;
mod config;
mod db;
mod errors;
mod models;

use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Server exited with error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run(config: Config) -> Result<(), BoxError> {
    tracing::info!("Starting pet server");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await.map_err(|e| {
        tracing::error!("Failed to connect to the store: {}", e);
        e
    })?;
    let repo = Arc::new(Repository::new(pool));

    if config.seed_on_startup {
        let report = db::seed::seed_collections(&repo).await?;
        tracing::info!(
            pets = report.pets_inserted,
            campaigns = report.campaigns_inserted,
            "Seed step finished"
        );
    }

    let shutdown_timeout = config.shutdown_timeout;
    let bind_addr = config.bind_addr;

    // Create application state
    let state = AppState {
        repo: Arc::clone(&repo),
        config: Arc::new(config),
    };

    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    serve_until_shutdown(listener, app, &repo, shutdown_signal(), shutdown_timeout).await
}

/// Serve until `shutdown` resolves, let in-flight requests finish, then close the store.
///
/// Fails when the store does not close within `close_timeout`.
pub async fn serve_until_shutdown<F>(
    listener: tokio::net::TcpListener,
    app: Router,
    repo: &Repository,
    shutdown: F,
    close_timeout: Duration,
) -> Result<(), BoxError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Requests drained, closing store");
    tokio::time::timeout(close_timeout, repo.close())
        .await
        .map_err(|_| format!("Store did not close within {:?}", close_timeout))?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    // Credentials rule out wildcards, so methods and headers are listed
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/pet", get(api::list_pets))
        .route("/pet/{id}", get(api::get_pet))
        .route("/adoption", post(api::create_adoption))
        .route(
            "/campaigns",
            get(api::list_campaigns).post(api::create_campaign),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Root endpoint.
async fn root() -> &'static str {
    "Ok? server"
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down gracefully"),
    }
}
