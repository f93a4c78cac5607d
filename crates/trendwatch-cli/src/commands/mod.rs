pub mod analyze;
pub mod monitor;
pub mod report;
pub mod scan;

use std::sync::Arc;
use std::time::Duration;

use trendwatch_core::AppConfig;
use trendwatch_engine::{HttpSourceAdapter, ScanConfig, SourceAdapter};

/// Build one HTTP adapter per configured platform.
pub fn build_adapters(config: &AppConfig) -> anyhow::Result<Vec<Arc<dyn SourceAdapter>>> {
    config
        .platforms
        .iter()
        .map(|platform| {
            let adapter = HttpSourceAdapter::new(
                platform,
                &config.metrics_api_url,
                config.request_timeout_secs,
                &config.user_agent,
            )?;
            Ok(Arc::new(adapter) as Arc<dyn SourceAdapter>)
        })
        .collect()
}

pub fn scan_config(config: &AppConfig) -> ScanConfig {
    ScanConfig {
        interval: Duration::from_secs(config.scan_interval_secs),
        adapter_timeout: Duration::from_secs(config.adapter_timeout_secs),
        hot_trend_threshold: config.hot_trend_threshold,
        niche_score_threshold: config.niche_score_threshold,
    }
}
