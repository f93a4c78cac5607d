//! Recurring scan supervision.
//!
//! The [`Monitor`] owns the adapter set, the outbound ports, and the scan
//! schedule. `start()`/`stop()` are idempotent; cycles never overlap — a
//! cycle that outruns the interval defers the next tick rather than
//! stacking. Only the running/stopped state crosses task boundaries, behind
//! a mutex.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use trendwatch_core::{CategoryCatalog, LifecycleStage, Niche, Trend, VolumeSample};

use crate::adapter::{collect_from_adapters, SourceAdapter};
use crate::history::VolumeHistory;
use crate::lifecycle::classify_lifecycle;
use crate::merge::merge_raw_trends;
use crate::ports::{HotTrendNotifier, TrendStore};
use crate::score::score_trend;

/// Thresholds and timing for the scan loop.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub interval: Duration,
    pub adapter_timeout: Duration,
    /// Trends scoring strictly above this are notified.
    pub hot_trend_threshold: f64,
    /// Emerging trends scoring strictly above this become niche candidates.
    pub niche_score_threshold: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(900),
            adapter_timeout: Duration::from_secs(30),
            hot_trend_threshold: 75.0,
            niche_score_threshold: 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Stopped,
    Running,
}

/// Everything one completed cycle produced.
#[derive(Debug)]
pub struct ScanOutcome {
    /// All merged, scored trends, sorted by score descending.
    pub trends: Vec<Trend>,
    /// Promoted niche candidates.
    pub niches: Vec<Niche>,
    /// How many trends crossed the hot threshold.
    pub hot_count: usize,
}

/// Immutable collaborators shared between the loop task and one-shot scans.
struct CycleContext {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    store: Arc<dyn TrendStore>,
    notifier: Arc<dyn HotTrendNotifier>,
    catalog: Arc<CategoryCatalog>,
    config: ScanConfig,
}

struct LoopControl {
    state: MonitorState,
    stop_tx: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

pub struct Monitor {
    ctx: Arc<CycleContext>,
    /// Volume history survives stop/start so growth context is not lost.
    /// Cycles are serial, so the async mutex is uncontended in practice.
    history: Arc<tokio::sync::Mutex<VolumeHistory>>,
    control: Mutex<LoopControl>,
}

impl Monitor {
    #[must_use]
    pub fn new(
        adapters: Vec<Arc<dyn SourceAdapter>>,
        store: Arc<dyn TrendStore>,
        notifier: Arc<dyn HotTrendNotifier>,
        catalog: Arc<CategoryCatalog>,
        config: ScanConfig,
    ) -> Self {
        Self {
            ctx: Arc::new(CycleContext {
                adapters,
                store,
                notifier,
                catalog,
                config,
            }),
            history: Arc::new(tokio::sync::Mutex::new(VolumeHistory::new())),
            control: Mutex::new(LoopControl {
                state: MonitorState::Stopped,
                stop_tx: None,
                handle: None,
            }),
        }
    }

    #[must_use]
    pub fn status(&self) -> MonitorState {
        self.control.lock().expect("monitor control lock poisoned").state
    }

    /// Begin scanning on the configured interval. The first cycle fires
    /// immediately. Calling `start` while already running is a no-op.
    pub fn start(&self) {
        let mut control = self.control.lock().expect("monitor control lock poisoned");
        if control.state == MonitorState::Running {
            tracing::debug!("monitor already running; start() is a no-op");
            return;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let ctx = Arc::clone(&self.ctx);
        let history = Arc::clone(&self.history);

        control.state = MonitorState::Running;
        control.stop_tx = Some(stop_tx);
        control.handle = Some(tokio::spawn(scan_loop(ctx, history, stop_rx)));

        tracing::info!(
            interval_secs = self.ctx.config.interval.as_secs(),
            platforms = self.ctx.adapters.len(),
            "monitor started"
        );
    }

    /// Stop scanning and wait for any in-flight cycle to finish.
    ///
    /// Takes effect before the next cycle starts; the current cycle is
    /// allowed to complete so persistence is never cut off mid-write.
    /// Calling `stop` while already stopped is a no-op.
    pub async fn stop(&self) {
        let handle = {
            let mut control = self.control.lock().expect("monitor control lock poisoned");
            if control.state == MonitorState::Stopped {
                tracing::debug!("monitor already stopped; stop() is a no-op");
                return;
            }

            if let Some(stop_tx) = control.stop_tx.take() {
                // Receiver may already be gone if the task panicked.
                let _ = stop_tx.send(true);
            }
            control.state = MonitorState::Stopped;
            control.handle.take()
        };

        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "monitor loop task ended abnormally");
            }
        }

        tracing::info!("monitor stopped");
    }

    /// Run exactly one scan cycle, outside the schedule. Used by one-shot
    /// scans; safe to call while the monitor is stopped.
    pub async fn run_cycle(&self) -> ScanOutcome {
        let mut history = self.history.lock().await;
        run_scan_cycle(&self.ctx, &mut history).await
    }
}

/// The long-lived supervisory loop: tick, scan, repeat until stopped.
async fn scan_loop(
    ctx: Arc<CycleContext>,
    history: Arc<tokio::sync::Mutex<VolumeHistory>>,
    mut stop_rx: watch::Receiver<bool>,
) {
    // tokio's interval panics on a zero period. Config parsing rejects a
    // zero interval, but the loop must survive a caller constructing
    // ScanConfig directly.
    let period = ctx.config.interval.max(Duration::from_millis(1));
    let mut interval = tokio::time::interval(period);
    // A slow cycle defers the next tick instead of bursting to catch up:
    // cycles are strictly serial.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = stop_rx.changed() => {}
        }
        if *stop_rx.borrow() {
            break;
        }

        let started = std::time::Instant::now();
        let outcome = {
            let mut history = history.lock().await;
            run_scan_cycle(&ctx, &mut history).await
        };
        tracing::info!(
            trends = outcome.trends.len(),
            niches = outcome.niches.len(),
            hot = outcome.hot_count,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "scan cycle complete"
        );
    }
}

/// One full adapter → merge → classify → score → promote → notify → persist
/// pass. Persistence and notification failures are logged and contained;
/// a degraded cycle never takes the monitor down.
async fn run_scan_cycle(ctx: &CycleContext, history: &mut VolumeHistory) -> ScanOutcome {
    let collected = collect_from_adapters(&ctx.adapters, ctx.config.adapter_timeout).await;
    let mut trends = merge_raw_trends(collected.raw_trends);

    for trend in &mut trends {
        history.record(
            &trend.topic,
            VolumeSample {
                volume: trend.search_volume,
                observed_at: trend.discovered_at,
            },
        );
        let samples = history.samples(&trend.topic);

        // The sample recorded above guarantees a non-empty history here.
        match classify_lifecycle(&trend.topic, &samples, Utc::now()) {
            Ok(prediction) => trend.lifecycle_stage = prediction.current_stage,
            Err(e) => {
                tracing::warn!(topic = %trend.topic, error = %e, "lifecycle classification failed");
            }
        }

        trend.trend_score = score_trend(trend, &collected.social_signals, &samples);
    }

    trends.sort_by(|a, b| b.trend_score.total_cmp(&a.trend_score));

    let niches = promote_niches(&trends, ctx.config.niche_score_threshold, &ctx.catalog);
    let hot = hot_trends(&trends, ctx.config.hot_trend_threshold);
    let hot_count = hot.len();

    if hot.is_empty() {
        tracing::debug!("no hot trends this cycle");
    } else if let Err(e) = ctx.notifier.notify_hot_trends(&hot).await {
        tracing::warn!(error = %e, hot = hot.len(), "hot-trend notification failed");
    }

    if !trends.is_empty() {
        if let Err(e) = ctx.store.persist_trends(&trends).await {
            tracing::error!(error = %e, count = trends.len(), "trend persistence failed");
        }
    }
    if !niches.is_empty() {
        if let Err(e) = ctx.store.persist_niches(&niches).await {
            tracing::error!(error = %e, count = niches.len(), "niche persistence failed");
        }
    }

    ScanOutcome {
        trends,
        niches,
        hot_count,
    }
}

/// Trends scoring strictly above the hot threshold, one batch per cycle.
fn hot_trends(trends: &[Trend], threshold: f64) -> Vec<Trend> {
    trends
        .iter()
        .filter(|t| t.trend_score > threshold)
        .cloned()
        .collect()
}

/// Emerging trends scoring strictly above the opportunity threshold become
/// niche candidates.
fn promote_niches(trends: &[Trend], threshold: f64, catalog: &CategoryCatalog) -> Vec<Niche> {
    trends
        .iter()
        .filter(|t| t.lifecycle_stage == LifecycleStage::Emerging && t.trend_score > threshold)
        .map(|t| {
            let category = catalog.categorize(&t.topic, &t.related_keywords);
            Niche::from_trend(t, category)
        })
        .collect()
}
