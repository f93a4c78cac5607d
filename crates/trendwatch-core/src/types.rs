use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Assessed competition level for a topic on one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

impl CompetitionLevel {
    /// Competition index in `[0, 100]` used by the scorer and niche
    /// derivation. Higher means more crowded.
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            CompetitionLevel::Low => 20,
            CompetitionLevel::Medium => 50,
            CompetitionLevel::High => 80,
        }
    }
}

impl std::fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompetitionLevel::Low => write!(f, "low"),
            CompetitionLevel::Medium => write!(f, "medium"),
            CompetitionLevel::High => write!(f, "high"),
        }
    }
}

/// Where a topic sits in its emergence → growth → peak → decline arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStage {
    Emerging,
    Growing,
    Peak,
    Declining,
}

impl std::fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleStage::Emerging => write!(f, "emerging"),
            LifecycleStage::Growing => write!(f, "growing"),
            LifecycleStage::Peak => write!(f, "peak"),
            LifecycleStage::Declining => write!(f, "declining"),
        }
    }
}

/// A single platform's coarse stage hint for a raw observation.
///
/// Informational only: merging defers the authoritative stage to the
/// lifecycle classifier, which works from volume history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageHint {
    Emerging,
    Peak,
    Declining,
}

/// Direction label carried on promoted niches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Stable,
    Falling,
}

impl TrendDirection {
    /// Map a lifecycle stage to the direction label used on niche records.
    #[must_use]
    pub fn from_stage(stage: LifecycleStage) -> Self {
        match stage {
            LifecycleStage::Emerging | LifecycleStage::Growing => TrendDirection::Rising,
            LifecycleStage::Peak => TrendDirection::Stable,
            LifecycleStage::Declining => TrendDirection::Falling,
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Rising => write!(f, "rising"),
            TrendDirection::Stable => write!(f, "stable"),
            TrendDirection::Falling => write!(f, "falling"),
        }
    }
}

/// One platform's uncombined trend observation for a single scan cycle.
///
/// Ephemeral: produced by a source adapter, consumed by the merger,
/// discarded after the merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTrend {
    pub topic: String,
    pub platform: String,
    pub search_volume: u64,
    pub competition_level: CompetitionLevel,
    pub stage_hint: StageHint,
    pub related_keywords: Vec<String>,
    pub observed_at: DateTime<Utc>,
}

/// The canonical, merged record for one topic within one scan cycle.
///
/// Exactly one `Trend` exists per normalized topic key per cycle. A topic
/// reappearing next cycle produces a fresh value with a fresh id; records
/// are never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trend {
    pub id: Uuid,
    pub topic: String,
    /// Contributing platforms in first-appearance order. Never empty.
    pub platforms: Vec<String>,
    /// Composite score in `[0, 100]`.
    pub trend_score: f64,
    /// Sum of per-platform search volumes.
    pub search_volume: u64,
    pub competition_level: CompetitionLevel,
    pub lifecycle_stage: LifecycleStage,
    /// Deduplicated union, original relative order preserved.
    pub related_keywords: Vec<String>,
    pub discovered_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A single observation of search interest for a topic at a point in time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolumeSample {
    pub volume: u64,
    pub observed_at: DateTime<Utc>,
}

/// A piece of social content whose strength feeds the social sub-score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialSignal {
    pub text: String,
    /// Signal strength in `[0, 100]`.
    pub strength: f64,
    pub platform: String,
}

/// Stage classification and peak forecast for one topic.
///
/// Derived and read-only: recomputed on every call, never persisted as
/// mutable state.
#[derive(Debug, Clone, Serialize)]
pub struct LifecyclePrediction {
    pub topic: String,
    pub current_stage: LifecycleStage,
    pub predicted_peak_date: DateTime<Utc>,
    /// Always within `[60, 90]`.
    pub expected_duration_days: i64,
    /// Step function of history length: 40, 65, or 85.
    pub confidence: u8,
}

/// A trend promoted to a business-opportunity candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Niche {
    pub id: Uuid,
    pub niche_name: String,
    pub category: String,
    pub market_size_estimate: f64,
    /// Competition index in `[0, 100]` mapped from the trend's level.
    pub competition_score: u8,
    /// Equal to the trend's composite score.
    pub profitability_score: f64,
    pub trend_direction: TrendDirection,
    pub discovered_at: DateTime<Utc>,
}

/// Multiplier applied to search volume for the market size estimate.
const MARKET_SIZE_MULTIPLIER: f64 = 2.5;

impl Niche {
    /// Derive a niche candidate from a scored trend.
    ///
    /// One-way derivation: niches are built from trends, never the reverse.
    #[must_use]
    pub fn from_trend(trend: &Trend, category: String) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let market_size_estimate = trend.search_volume as f64 * MARKET_SIZE_MULTIPLIER;
        Niche {
            id: Uuid::new_v4(),
            niche_name: trend.topic.clone(),
            category,
            market_size_estimate,
            competition_score: trend.competition_level.index(),
            profitability_score: trend.trend_score,
            trend_direction: TrendDirection::from_stage(trend.lifecycle_stage),
            discovered_at: trend.discovered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_trend() -> Trend {
        Trend {
            id: Uuid::new_v4(),
            topic: "AI Tools".to_string(),
            platforms: vec!["youtube".to_string()],
            trend_score: 82.0,
            search_volume: 70_000,
            competition_level: CompetitionLevel::Medium,
            lifecycle_stage: LifecycleStage::Emerging,
            related_keywords: vec!["ai".to_string()],
            discovered_at: Utc::now(),
            expires_at: None,
        }
    }

    #[test]
    fn competition_index_is_ordered() {
        assert!(CompetitionLevel::Low.index() < CompetitionLevel::Medium.index());
        assert!(CompetitionLevel::Medium.index() < CompetitionLevel::High.index());
    }

    #[test]
    fn competition_level_serde_lowercase() {
        let json = serde_json::to_string(&CompetitionLevel::High).unwrap();
        assert_eq!(json, "\"high\"");
        let parsed: CompetitionLevel = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, CompetitionLevel::Low);
    }

    #[test]
    fn direction_from_stage() {
        assert_eq!(
            TrendDirection::from_stage(LifecycleStage::Emerging),
            TrendDirection::Rising
        );
        assert_eq!(
            TrendDirection::from_stage(LifecycleStage::Growing),
            TrendDirection::Rising
        );
        assert_eq!(
            TrendDirection::from_stage(LifecycleStage::Peak),
            TrendDirection::Stable
        );
        assert_eq!(
            TrendDirection::from_stage(LifecycleStage::Declining),
            TrendDirection::Falling
        );
    }

    #[test]
    fn niche_derivation_copies_trend_fields() {
        let trend = sample_trend();
        let niche = Niche::from_trend(&trend, "technology".to_string());

        assert_eq!(niche.niche_name, "AI Tools");
        assert_eq!(niche.category, "technology");
        assert!((niche.market_size_estimate - 175_000.0).abs() < f64::EPSILON);
        assert_eq!(niche.competition_score, 50);
        assert!((niche.profitability_score - 82.0).abs() < f64::EPSILON);
        assert_eq!(niche.trend_direction, TrendDirection::Rising);
        assert_eq!(niche.discovered_at, trend.discovered_at);
    }

    #[test]
    fn stage_display_matches_serde() {
        assert_eq!(LifecycleStage::Emerging.to_string(), "emerging");
        assert_eq!(LifecycleStage::Declining.to_string(), "declining");
        assert_eq!(
            serde_json::to_string(&LifecycleStage::Peak).unwrap(),
            "\"peak\""
        );
    }
}
