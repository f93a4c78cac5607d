//! One-shot scan: run a single cycle and print the results. Nothing is
//! persisted or notified — this is a dry run against live adapters.

use std::sync::Arc;

use trendwatch_core::AppConfig;
use trendwatch_engine::{
    ports::{NoopNotifier, NoopStore},
    Monitor,
};

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let adapters = super::build_adapters(config)?;
    let catalog = Arc::new(trendwatch_core::load_categories(&config.categories_path)?);

    let monitor = Monitor::new(
        adapters,
        Arc::new(NoopStore),
        Arc::new(NoopNotifier),
        catalog,
        super::scan_config(config),
    );

    let outcome = monitor.run_cycle().await;

    println!(
        "scan complete: {} trends, {} niches, {} hot",
        outcome.trends.len(),
        outcome.niches.len(),
        outcome.hot_count
    );
    for trend in &outcome.trends {
        println!(
            "  {:>5.1}  {:<10} {:<30} vol={} platforms={}",
            trend.trend_score,
            trend.lifecycle_stage,
            trend.topic,
            trend.search_volume,
            trend.platforms.join(",")
        );
    }
    for niche in &outcome.niches {
        println!(
            "  niche: {:<30} category={} profitability={:.1}",
            niche.niche_name, niche.category, niche.profitability_score
        );
    }

    Ok(())
}
