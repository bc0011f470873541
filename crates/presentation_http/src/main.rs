//! Hawaii Climate API server
//!
//! Main entry point for the HTTP API server.

use std::{io, sync::Arc, time::Duration};

use anyhow::Context;
use application::{ClimateService, ClimateStorePort, DatabaseHealthPort};
use axum::http::{HeaderValue, Method};
use clap::Parser;
use infrastructure::{
    AppConfig, ServerConfig, SqliteClimateStore, SqliteDatabaseHealth, create_pool,
    init_telemetry,
};
use presentation_http::{RequestIdLayer, routes, set_expose_internal_errors, state::AppState};
use tokio::{net::TcpListener, signal, sync::Notify};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

/// Hawaii Climate API server
#[derive(Debug, Parser)]
#[command(name = "climate-server")]
#[command(version, about = "Serve the Hawaii climate dataset as a JSON API", long_about = None)]
struct Cli {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(long)]
    port: Option<u16>,

    /// Verbose logging and error details in responses
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = AppConfig::load();
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    config.apply_overrides(cli.host, cli.port, cli.debug);

    init_telemetry(&config.telemetry)?;

    info!("Hawaii Climate API v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Err(e) = &loaded {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = config.server.port,
        database = %config.database.path,
        debug = config.debug,
        "Configuration loaded"
    );

    set_expose_internal_errors(config.expose_internal_errors());

    let pool = match create_pool(&config.database) {
        Ok(pool) => Arc::new(pool),
        Err(e) => {
            error!(error = %e, path = %config.database.path, "Cannot open dataset");
            return Err(e).context("failed to open the climate dataset");
        },
    };

    let store: Arc<dyn ClimateStorePort> = Arc::new(SqliteClimateStore::new(Arc::clone(&pool)));
    let database_health: Arc<dyn DatabaseHealthPort> =
        Arc::new(SqliteDatabaseHealth::new(Arc::clone(&pool)));

    let climate_service = ClimateService::initialize(store, &config.dataset)
        .await
        .context("failed to compute the startup context")?;

    let state = AppState {
        climate_service: Arc::new(climate_service),
        database_health,
    };

    // Add middleware (order matters: last added = outermost)
    let mut app = routes::create_router(state).layer(TraceLayer::new_for_http());
    if config.server.cors_enabled {
        app = app.layer(cors_layer(&config.server));
    }
    let app = app.layer(RequestIdLayer::new());

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);
    info!("API docs: http://{}/api-docs/openapi.json", addr);

    let shutdown_timeout = config.server.shutdown_timeout_secs.map(Duration::from_secs);
    let shutdown = Arc::new(Notify::new());

    let server = axum::serve(listener, app).with_graceful_shutdown({
        let shutdown = Arc::clone(&shutdown);
        async move {
            shutdown_signal().await;
            shutdown.notify_one();
        }
    });

    serve_until_drained(server.into_future(), &shutdown, shutdown_timeout).await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Any origin when none are configured, otherwise only the listed ones
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

/// Run `server` until it finishes draining, or until `timeout` has passed
/// since `shutdown` fired
///
/// A `None` timeout waits for every connection to close.
async fn serve_until_drained<F>(
    server: F,
    shutdown: &Notify,
    timeout: Option<Duration>,
) -> io::Result<()>
where
    F: Future<Output = io::Result<()>>,
{
    let deadline = async {
        shutdown.notified().await;
        match timeout {
            Some(timeout) => {
                info!("Waiting up to {:?} for connections to close...", timeout);
                tokio::time::sleep(timeout).await;
            },
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = server => result,
        () = deadline => {
            warn!("Shutdown timeout elapsed, closing remaining connections");
            Ok(())
        },
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        () = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
