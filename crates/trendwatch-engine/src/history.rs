//! In-memory volume history, keyed by normalized topic key.
//!
//! Persistence is fire-and-forget (no read-back), so the cross-cycle growth
//! context the classifier needs lives with the monitor that records it.

use std::collections::HashMap;
use std::collections::VecDeque;

use trendwatch_core::{normalize_topic_key, VolumeSample};

/// Samples retained per topic; the classifier only needs recent context.
const MAX_SAMPLES_PER_TOPIC: usize = 30;

/// Topics tracked at once. Topics that stop trending stop getting samples,
/// so the stalest series is the safest to shed.
const MAX_TOPICS: usize = 1_000;

#[derive(Debug, Default)]
pub struct VolumeHistory {
    samples: HashMap<String, VecDeque<VolumeSample>>,
}

impl VolumeHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample to a topic's history, evicting the oldest entry once
    /// the per-topic cap is reached. The topic is normalized to its merge
    /// key, so case/whitespace variants accumulate into one series.
    ///
    /// The topic map itself is bounded too: a new topic arriving at the cap
    /// evicts the topic whose newest sample is oldest.
    pub fn record(&mut self, topic: &str, sample: VolumeSample) {
        let key = normalize_topic_key(topic);
        if !self.samples.contains_key(&key) && self.samples.len() >= MAX_TOPICS {
            self.evict_stalest_topic();
        }

        let series = self.samples.entry(key).or_default();
        if series.len() == MAX_SAMPLES_PER_TOPIC {
            series.pop_front();
        }
        series.push_back(sample);
    }

    fn evict_stalest_topic(&mut self) {
        let stalest = self
            .samples
            .iter()
            .min_by_key(|(_, series)| series.back().map(|s| s.observed_at))
            .map(|(key, _)| key.clone());
        if let Some(key) = stalest {
            self.samples.remove(&key);
        }
    }

    /// Chronological (oldest → newest) samples for a topic. Empty when the
    /// topic has never been recorded.
    #[must_use]
    pub fn samples(&self, topic: &str) -> Vec<VolumeSample> {
        self.samples
            .get(&normalize_topic_key(topic))
            .map(|series| series.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of topics currently tracked.
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn sample(volume: u64, hour: i64) -> VolumeSample {
        VolumeSample {
            volume,
            observed_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap()
                + Duration::hours(hour),
        }
    }

    #[test]
    fn records_in_chronological_order() {
        let mut history = VolumeHistory::new();
        history.record("ai tools", sample(10, 0));
        history.record("ai tools", sample(20, 1));

        let samples = history.samples("ai tools");
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].volume, 10);
        assert_eq!(samples[1].volume, 20);
    }

    #[test]
    fn topic_variants_share_a_series() {
        let mut history = VolumeHistory::new();
        history.record("AI Tools", sample(10, 0));
        history.record("  ai tools ", sample(20, 1));

        assert_eq!(history.topic_count(), 1);
        assert_eq!(history.samples("ai TOOLS").len(), 2);
    }

    #[test]
    fn unknown_topic_has_empty_history() {
        assert!(VolumeHistory::new().samples("nothing").is_empty());
    }

    #[test]
    fn topic_cap_evicts_stalest_topic() {
        let mut history = VolumeHistory::new();
        for i in 0..MAX_TOPICS {
            history.record(&format!("topic {i}"), sample(1, i64::try_from(i).unwrap()));
        }
        assert_eq!(history.topic_count(), MAX_TOPICS);

        // "topic 0" has the oldest newest-sample and is shed for the newcomer.
        history.record("brand new", sample(1, i64::try_from(MAX_TOPICS).unwrap()));
        assert_eq!(history.topic_count(), MAX_TOPICS);
        assert!(history.samples("topic 0").is_empty());
        assert_eq!(history.samples("brand new").len(), 1);
        assert_eq!(history.samples("topic 1").len(), 1);
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut history = VolumeHistory::new();
        for i in 0..40 {
            history.record("x", sample(i, i64::try_from(i).unwrap()));
        }

        let samples = history.samples("x");
        assert_eq!(samples.len(), MAX_SAMPLES_PER_TOPIC);
        assert_eq!(samples[0].volume, 10);
        assert_eq!(samples.last().unwrap().volume, 39);
    }
}
