//! Smartboard Booking Service
//!
//! REST API for booking classroom smartboards.
//! Reads configuration from TOML (~/.config/smartboard-booking/config.toml or $BOOKING_CONFIG).

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use smartboard_booking::application::{AuthService, BookingService, CatalogueService};
use smartboard_booking::config::{config_path, AppConfig, LoggingSection};
use smartboard_booking::domain::RepositoryProvider;
use smartboard_booking::infrastructure::crypto::jwt::TokenService;
use smartboard_booking::infrastructure::database::run_migrations;
use smartboard_booking::shared::ShutdownCoordinator;
use smartboard_booking::{create_api_router, init_database, AppState, SeaOrmRepositoryProvider};

fn init_tracing(logging: &LoggingSection) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    match logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Configuration ──────────────────────────────────────────
    let path = config_path();
    let app_cfg = match AppConfig::load(&path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging);
            info!("Configuration loaded from {}", path.display());
            cfg
        }
        Err(e) => {
            init_tracing(&LoggingSection::default());
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Starting Smartboard Booking Service...");
    for field in app_cfg.insecure_defaults() {
        warn!("{} is still the shipped default; set it before exposing this service", field);
    }

    // Must be installed before any metrics call
    let prometheus_handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
            None
        }
    };

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&app_cfg.database_config()).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = run_migrations(&db).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }

    // ── Services ───────────────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let storage_timeout = app_cfg.storage_timeout();
    let tokens = TokenService::new(app_cfg.jwt_config());

    let auth = Arc::new(
        AuthService::new(repos.clone(), tokens)
            .with_bcrypt_cost(app_cfg.security.bcrypt_cost)
            .with_storage_timeout(storage_timeout),
    );
    let bookings = Arc::new(BookingService::new(repos.clone()).with_storage_timeout(storage_timeout));
    let catalogue = Arc::new(CatalogueService::new(repos).with_storage_timeout(storage_timeout));

    if let Err(e) = auth.seed_default_admin(&app_cfg.default_admin()).await {
        error!("Failed to seed default admin: {}", e);
    }

    let mut state = AppState::new(auth, bookings, catalogue);
    if let Some(handle) = prometheus_handle {
        state = state.with_metrics(handle);
    }
    let router = create_api_router(state);

    // ── Serve ──────────────────────────────────────────────────
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    let addr = app_cfg.listen_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API listening on http://{}", addr);
    info!("OpenAPI document at http://{}/api-docs/openapi.json", addr);

    let api_shutdown = shutdown_signal.clone();
    let server = tokio::spawn(async move {
        let result = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API received shutdown signal");
            })
            .await;
        // A server that exits on its own still releases the coordinator
        shutdown_signal.trigger();
        result
    });

    let drained = shutdown
        .shutdown_with_cleanup(|| async move {
            match server.await {
                Ok(Ok(())) => info!("REST API stopped"),
                Ok(Err(e)) => error!("REST API error: {}", e),
                Err(e) => error!("REST API task panicked: {}", e),
            }
        })
        .await;
    if !drained {
        warn!("In-flight requests abandoned");
    }

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Smartboard Booking Service shutdown complete");
    Ok(())
}
