//! Staybook reservation service
//!
//! HTTP server for availability, carts, bookings and payment
//! reconciliation. Reads configuration from a TOML file
//! (~/.config/staybook/config.toml).

use std::sync::Arc;
use std::time::{Duration, Instant};

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use staybook::application::{
    AvailabilityService, BookingService, CartService, HoldExpiryConfig, HoldExpirySweeper,
    PaymentReconciliationService,
};
use staybook::config::AppConfig;
use staybook::domain::RepositoryProvider;
use staybook::infrastructure::database::migrator::Migrator;
use staybook::shared::ShutdownCoordinator;
use staybook::{
    create_api_router, default_config_path, init_database, ApiState, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("STAYBOOK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Staybook reservation service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // ── Services ───────────────────────────────────────────────
    let availability = Arc::new(AvailabilityService::new(repos.clone()));
    let bookings = Arc::new(BookingService::new(repos.clone()));
    let cart = Arc::new(
        CartService::new(repos.clone(), bookings.clone())
            .with_store_timeout(Duration::from_secs(app_cfg.server.store_timeout_secs)),
    );
    let reconciliation = Arc::new(PaymentReconciliationService::new(
        repos.clone(),
        bookings.clone(),
        app_cfg.payment.server_key.clone(),
    ));

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    // ── Hold expiry sweep ──────────────────────────────────────
    let sweeper = HoldExpirySweeper::new(repos.clone(), bookings.clone()).with_config(
        HoldExpiryConfig {
            check_interval_secs: app_cfg.holds.check_interval_secs,
            pending_ttl_minutes: app_cfg.holds.pending_ttl_minutes,
        },
    );
    sweeper.start(shutdown_signal.clone());

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(ApiState {
        repos,
        availability,
        bookings,
        cart,
        reconciliation,
        db: db.clone(),
        started_at: Arc::new(Instant::now()),
    });

    let api_addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("REST API server received shutdown signal");
    });

    // Drain open connections, but not past the configured deadline.
    tokio::select! {
        result = server => result?,
        _ = shutdown.drain_deadline() => {
            warn!(
                "Shutdown deadline ({}s) elapsed; dropping remaining connections",
                app_cfg.server.shutdown_timeout
            );
        }
    }

    // ── Final cleanup ──────────────────────────────────────────
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Staybook shutdown complete");
    Ok(())
}
