//! Long-running monitor: scan on the configured interval until interrupted.

use std::sync::Arc;

use trendwatch_core::AppConfig;
use trendwatch_engine::{ports::NoopNotifier, HotTrendNotifier, Monitor};
use trendwatch_notify::WebhookNotifier;

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let adapters = super::build_adapters(config)?;
    let catalog = Arc::new(trendwatch_core::load_categories(&config.categories_path)?);

    let pool_config = trendwatch_db::PoolConfig::from_app_config(config);
    let pool = trendwatch_db::connect_pool(&config.database_url, pool_config).await?;
    trendwatch_db::run_migrations(&pool).await?;
    let store = Arc::new(trendwatch_db::PgTrendStore::new(pool));

    let notifier: Arc<dyn HotTrendNotifier> = match &config.webhook_url {
        Some(url) => Arc::new(WebhookNotifier::new(url, config.request_timeout_secs)?),
        None => {
            tracing::info!("no webhook configured; hot trends will only be logged");
            Arc::new(NoopNotifier)
        }
    };

    let monitor = Monitor::new(
        adapters,
        store,
        notifier,
        catalog,
        super::scan_config(config),
    );

    monitor.start();
    shutdown_signal().await;

    tracing::info!("received shutdown signal, stopping monitor");
    monitor.stop().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
