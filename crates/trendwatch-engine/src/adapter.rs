//! Source adapter capability and concurrent collection.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use trendwatch_core::{RawTrend, SocialSignal, VolumeSample};

use crate::error::EngineError;

/// One platform's trend and volume feed.
///
/// Each call is independent and side-effect-free on engine state. Adapters
/// may fail independently; a failing adapter never aborts a scan cycle —
/// its contribution is logged and treated as empty for that cycle.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Platform name this adapter serves, e.g. `"youtube"`.
    fn platform(&self) -> &str;

    /// Fetch the platform's current trend candidates.
    async fn fetch_trends(&self) -> Result<Vec<RawTrend>, EngineError>;

    /// Fetch one search-volume sample for a keyword.
    async fn fetch_volume(&self, keyword: &str) -> Result<VolumeSample, EngineError>;

    /// Fetch social signals for the social sub-score. Platforms without a
    /// social surface keep the default empty contribution.
    async fn fetch_social_signals(&self) -> Result<Vec<SocialSignal>, EngineError> {
        Ok(Vec::new())
    }
}

/// Everything one cycle collected across all adapters.
#[derive(Debug, Default)]
pub struct CollectedSignals {
    pub raw_trends: Vec<RawTrend>,
    pub social_signals: Vec<SocialSignal>,
}

/// Collect raw trends and social signals from all adapters concurrently.
///
/// One task per adapter, each bounded by `timeout`. A slow or failing
/// adapter contributes empty data for the cycle; the others are unaffected.
/// Merging downstream must only start once every adapter has settled, which
/// the join here guarantees.
pub async fn collect_from_adapters(
    adapters: &[Arc<dyn SourceAdapter>],
    timeout: Duration,
) -> CollectedSignals {
    let fetches = adapters.iter().map(|adapter| {
        let adapter = Arc::clone(adapter);
        async move {
            let platform = adapter.platform().to_string();
            let result = tokio::time::timeout(timeout, fetch_platform(adapter.as_ref())).await;
            (platform, result)
        }
    });

    let mut collected = CollectedSignals::default();

    for (platform, result) in futures::future::join_all(fetches).await {
        match result {
            Ok(Ok((trends, signals))) => {
                tracing::debug!(
                    platform = %platform,
                    trends = trends.len(),
                    social_signals = signals.len(),
                    "collected platform signals"
                );
                collected.raw_trends.extend(trends);
                collected.social_signals.extend(signals);
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    platform = %platform,
                    error = %e,
                    "adapter fetch failed; contributing empty data this cycle"
                );
            }
            Err(_) => {
                let e = EngineError::AdapterTimeout {
                    platform: platform.clone(),
                };
                tracing::warn!(
                    platform = %platform,
                    error = %e,
                    "adapter timed out; contributing empty data this cycle"
                );
            }
        }
    }

    collected
}

/// Fetch trends and social signals from one adapter.
///
/// A social fetch failure degrades that sub-signal to empty rather than
/// discarding the platform's trends.
async fn fetch_platform(
    adapter: &dyn SourceAdapter,
) -> Result<(Vec<RawTrend>, Vec<SocialSignal>), EngineError> {
    let trends = adapter.fetch_trends().await?;
    let signals = match adapter.fetch_social_signals().await {
        Ok(signals) => signals,
        Err(e) => {
            tracing::warn!(
                platform = adapter.platform(),
                error = %e,
                "social signal fetch failed; scoring without social contribution"
            );
            Vec::new()
        }
    };
    Ok((trends, signals))
}
