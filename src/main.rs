//! role-warden server.
//!
//! Wires configuration, adapters, and application handlers together, then
//! runs the HTTP surface alongside two background loops: the scheduler
//! pulse (expiry sweep and window rollover) and periodic checkpointing.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use role_warden::adapters::audit::JsonlAuditLog;
use role_warden::adapters::discord::{DiscordConfig, RestDirectory, RestNotifier};
use role_warden::adapters::http::{app_router, AppState};
use role_warden::adapters::midtrans::{SnapAdapter, SnapConfig};
use role_warden::adapters::storage::FileSnapshotStore;
use role_warden::application::handlers::{
    restore_or_empty, CheckpointHandler, ConfirmPaymentHandler, QueryStatusHandler,
    RunTickHandler, StartPurchaseHandler,
};
use role_warden::application::state::CoreState;
use role_warden::config::AppConfig;
use role_warden::domain::foundation::Timestamp;
use role_warden::ports::{AuditLog, Directory, Notifier, PaymentGateway, SnapshotStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate()?;
    info!(
        environment = ?config.server.environment,
        sandbox = config.payment.is_sandbox(),
        "Configuration loaded"
    );

    // Durable state
    let store: Arc<dyn SnapshotStore> =
        Arc::new(FileSnapshotStore::new(&config.persistence.snapshot_path));
    let duration_policy = config.enrollment.duration_policy();
    let rollover_policy = config.enrollment.rollover_policy;
    let state = match restore_or_empty(store.as_ref()).await {
        Some(snapshot) => Arc::new(CoreState::from_snapshot(
            snapshot,
            duration_policy,
            rollover_policy,
        )),
        None => Arc::new(CoreState::new(
            config.enrollment.window()?,
            duration_policy,
            rollover_policy,
        )),
    };

    // Outbound adapters
    let gateway: Arc<dyn PaymentGateway> =
        Arc::new(SnapAdapter::new(SnapConfig::from_config(&config.payment)));
    let discord_config = DiscordConfig::from_config(&config.directory);
    let directory: Arc<dyn Directory> = Arc::new(RestDirectory::new(discord_config.clone()));
    let notifier: Arc<dyn Notifier> = Arc::new(RestNotifier::new(discord_config));
    let audit: Arc<dyn AuditLog> = Arc::new(JsonlAuditLog::new(&config.persistence.audit_path));

    // Application handlers
    let app_state = AppState {
        start_purchase: Arc::new(StartPurchaseHandler::new(
            state.clone(),
            gateway,
            config.payment.price,
        )),
        confirm_payment: Arc::new(ConfirmPaymentHandler::new(
            state.clone(),
            directory.clone(),
            audit,
            notifier.clone(),
        )),
        query_status: Arc::new(QueryStatusHandler::new(state.clone())),
    };

    // Scheduler pulse: expiry sweep and window rollover
    let tick_handler = Arc::new(RunTickHandler::new(
        state.clone(),
        directory,
        notifier,
    ));
    let tick_interval = Duration::from_secs(config.enrollment.tick_interval_hours * 3600);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_interval);
        loop {
            interval.tick().await;
            tick_handler.handle(Timestamp::now()).await;
        }
    });

    // Periodic checkpointing
    let checkpoint_handler = Arc::new(CheckpointHandler::new(state.clone(), store.clone()));
    let checkpoint_interval =
        Duration::from_secs(config.persistence.checkpoint_interval_mins * 60);
    let periodic_checkpoint = checkpoint_handler.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(checkpoint_interval);
        // The first tick fires immediately; skip it, startup just restored
        interval.tick().await;
        loop {
            interval.tick().await;
            periodic_checkpoint.handle().await;
        }
    });

    // HTTP surface
    let app = app_router()
        .with_state(app_state)
        .layer(tower_http::trace::TraceLayer::new_for_http());
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!(error = %err, "Shutdown signal listener failed");
            }
        })
        .await?;

    // Final checkpoint so a clean shutdown loses nothing
    info!("Shutting down, writing final checkpoint");
    checkpoint_handler.handle().await;

    Ok(())
}
