//! Lifecycle stage classification and peak forecasting.

use chrono::{DateTime, Duration, Utc};

use trendwatch_core::{LifecyclePrediction, LifecycleStage, VolumeSample};

use crate::error::EngineError;

/// Percentage change between the last two samples of a history.
///
/// Fewer than two samples, or a previous volume of zero, yield `0.0` —
/// growth is undefined in both cases and must not poison downstream math.
#[must_use]
pub fn growth_rate(history: &[VolumeSample]) -> f64 {
    let len = history.len();
    if len < 2 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let previous = history[len - 2].volume as f64;
    #[allow(clippy::cast_precision_loss)]
    let current = history[len - 1].volume as f64;

    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// Classify a topic's lifecycle stage and forecast its peak.
///
/// `history` must be ordered oldest → newest. Stage thresholds are exclusive
/// boundaries evaluated in fixed order, so every real growth rate maps to
/// exactly one stage. The duration estimate is a deterministic function of
/// history length, always within `[60, 90]` days. Confidence is a step
/// function of sample count alone: 85 at ≥7 samples, 65 at ≥3, else 40.
///
/// # Errors
///
/// Returns [`EngineError::InsufficientData`] when `history` is empty —
/// callers must supply at least one sample.
pub fn classify_lifecycle(
    topic: &str,
    history: &[VolumeSample],
    now: DateTime<Utc>,
) -> Result<LifecyclePrediction, EngineError> {
    if history.is_empty() {
        return Err(EngineError::InsufficientData);
    }

    let rate = growth_rate(history);
    let current_stage = stage_for_growth(rate);

    let days_to_peak = match current_stage {
        LifecycleStage::Emerging => 14,
        LifecycleStage::Growing => 7,
        LifecycleStage::Peak | LifecycleStage::Declining => 0,
    };

    Ok(LifecyclePrediction {
        topic: topic.to_string(),
        current_stage,
        predicted_peak_date: now + Duration::days(days_to_peak),
        expected_duration_days: expected_duration_days(history.len()),
        confidence: confidence_for_samples(history.len()),
    })
}

/// First-match-wins threshold classification; total over all real rates.
fn stage_for_growth(rate: f64) -> LifecycleStage {
    if rate > 50.0 {
        LifecycleStage::Emerging
    } else if rate > 0.0 {
        LifecycleStage::Growing
    } else if rate > -20.0 {
        LifecycleStage::Peak
    } else {
        LifecycleStage::Declining
    }
}

/// Deterministic duration estimate within the contractual `[60, 90]` band.
///
/// Longer histories nudge the estimate upward: more observed staying power
/// suggests a longer-lived topic.
fn expected_duration_days(samples: usize) -> i64 {
    let extra = i64::try_from(samples.saturating_sub(1)).unwrap_or(i64::MAX);
    60 + (extra * 4).min(30)
}

fn confidence_for_samples(samples: usize) -> u8 {
    if samples >= 7 {
        85
    } else if samples >= 3 {
        65
    } else {
        40
    }
}
