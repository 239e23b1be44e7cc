//! Intake Server — School Appointment Capacity Scheduling
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use intake_core::config::AppConfig;
use intake_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("INTAKE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Intake v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = intake_database::connection::create_pool(&config.database).await?;
    intake_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Initialize repositories ──────────────────────────
    let appointment_repo = Arc::new(
        intake_database::repositories::AppointmentRepository::new(db_pool.clone()),
    );
    let event_repo = Arc::new(intake_database::repositories::CalendarEventRepository::new(
        db_pool.clone(),
    ));

    // ── Step 3: Initialize scheduling services ───────────────────
    let ledger = intake_service::scheduling::CapacityLedger::new(
        Arc::clone(&appointment_repo),
        Arc::clone(&event_repo),
        config.scheduling.clone(),
    );
    let validator = intake_service::scheduling::StartDateValidator::new(Arc::clone(&event_repo));
    let booking_service = Arc::new(intake_service::scheduling::BookingService::new(
        db_pool.clone(),
        Arc::clone(&appointment_repo),
        ledger.clone(),
        validator,
        config.scheduling.clone(),
    ));
    let availability_service = Arc::new(intake_service::scheduling::AvailabilityService::new(
        ledger,
        config.scheduling.clone(),
    ));
    tracing::info!(
        daily_file_limit = config.scheduling.daily_file_limit,
        max_planning_days = config.scheduling.max_planning_days,
        "Scheduling services initialized"
    );

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app_state = intake_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        appointment_repo,
        event_repo,
        booking_service,
        availability_service,
    };

    let app = intake_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Intake server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Intake server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
