//! Trend discovery and lifecycle-scoring engine.
//!
//! One scan cycle runs adapters → merger → classifier → scorer, promotes
//! niche candidates, notifies on hot trends, and persists everything. The
//! [`monitor::Monitor`] drives cycles on a fixed interval with idempotent
//! start/stop control.

pub mod adapter;
pub mod error;
pub mod history;
pub mod http_adapter;
pub mod lifecycle;
pub mod merge;
pub mod monitor;
pub mod ports;
pub mod score;

pub use adapter::{collect_from_adapters, CollectedSignals, SourceAdapter};
pub use error::EngineError;
pub use history::VolumeHistory;
pub use http_adapter::HttpSourceAdapter;
pub use lifecycle::{classify_lifecycle, growth_rate};
pub use merge::merge_raw_trends;
pub use monitor::{Monitor, MonitorState, ScanConfig, ScanOutcome};
pub use ports::{HotTrendNotifier, TrendStore};
pub use score::{keyword_difficulty, score_trend};
