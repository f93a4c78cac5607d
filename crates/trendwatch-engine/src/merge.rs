//! Merges per-platform raw observations into canonical trend records.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use trendwatch_core::{normalize_topic_key, CompetitionLevel, LifecycleStage, RawTrend, Trend};

/// Combine all raw trends from one scan cycle into one canonical [`Trend`]
/// per distinct topic.
///
/// Raw topics are grouped by [`normalize_topic_key`], so observations
/// differing only by case or surrounding whitespace merge into one record.
/// Within a group: platforms are the first-appearance-ordered union, search
/// volume is summed, competition is the simple-majority value (ties broken
/// toward the first-seen value), and related keywords are deduplicated with
/// original relative order preserved. The displayed topic keeps the
/// first-seen spelling.
///
/// The lifecycle stage is provisional (`Peak`): staging is decided by the
/// classifier from volume history, not by the merge. Output order follows
/// first appearance; callers re-sort by score downstream.
#[must_use]
pub fn merge_raw_trends(raw_trends: Vec<RawTrend>) -> Vec<Trend> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<RawTrend>> = HashMap::new();

    for raw in raw_trends {
        let key = normalize_topic_key(&raw.topic);
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(raw);
    }

    order
        .into_iter()
        .map(|key| {
            let group = groups.remove(&key).unwrap_or_default();
            merge_group(group)
        })
        .collect()
}

fn merge_group(group: Vec<RawTrend>) -> Trend {
    debug_assert!(!group.is_empty(), "merge groups are built non-empty");

    let mut platforms: Vec<String> = Vec::new();
    let mut related_keywords: Vec<String> = Vec::new();
    let mut search_volume: u64 = 0;

    for raw in &group {
        if !platforms.contains(&raw.platform) {
            platforms.push(raw.platform.clone());
        }
        search_volume += raw.search_volume;
        for keyword in &raw.related_keywords {
            if !related_keywords.contains(keyword) {
                related_keywords.push(keyword.clone());
            }
        }
    }

    Trend {
        id: Uuid::new_v4(),
        topic: group[0].topic.trim().to_string(),
        platforms,
        trend_score: 0.0,
        search_volume,
        competition_level: dominant_competition(&group),
        lifecycle_stage: LifecycleStage::Peak,
        related_keywords,
        discovered_at: Utc::now(),
        expires_at: None,
    }
}

/// The group's majority competition level; ties break toward the value seen
/// first in the group.
fn dominant_competition(group: &[RawTrend]) -> CompetitionLevel {
    let mut seen: Vec<(CompetitionLevel, usize)> = Vec::new();

    for raw in group {
        match seen.iter_mut().find(|(level, _)| *level == raw.competition_level) {
            Some((_, count)) => *count += 1,
            None => seen.push((raw.competition_level, 1)),
        }
    }

    // max_by_key returns the last maximal element; iterating `seen` (which
    // is in first-appearance order) reversed makes that the first-seen value.
    seen.iter()
        .rev()
        .max_by_key(|(_, count)| *count)
        .map_or(CompetitionLevel::Medium, |(level, _)| *level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trendwatch_core::StageHint;

    fn raw(topic: &str, platform: &str, volume: u64) -> RawTrend {
        RawTrend {
            topic: topic.to_string(),
            platform: platform.to_string(),
            search_volume: volume,
            competition_level: CompetitionLevel::Medium,
            stage_hint: StageHint::Emerging,
            related_keywords: vec![],
            observed_at: Utc::now(),
        }
    }

    fn raw_with(
        topic: &str,
        platform: &str,
        volume: u64,
        competition: CompetitionLevel,
        keywords: &[&str],
    ) -> RawTrend {
        RawTrend {
            competition_level: competition,
            related_keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            ..raw(topic, platform, volume)
        }
    }

    #[test]
    fn case_variants_merge_into_one_trend() {
        let merged = merge_raw_trends(vec![
            raw("AI Tools", "youtube", 50_000),
            raw("ai tools", "tiktok", 20_000),
        ]);

        assert_eq!(merged.len(), 1);
        let trend = &merged[0];
        assert_eq!(trend.topic, "AI Tools");
        assert_eq!(trend.platforms, vec!["youtube", "tiktok"]);
        assert_eq!(trend.search_volume, 70_000);
    }

    #[test]
    fn whitespace_variants_merge() {
        let merged = merge_raw_trends(vec![
            raw("  sea moss ", "reddit", 5_000),
            raw("Sea Moss", "tiktok", 3_000),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].topic, "sea moss");
        assert_eq!(merged[0].search_volume, 8_000);
    }

    #[test]
    fn distinct_topics_stay_separate() {
        let merged = merge_raw_trends(vec![
            raw("AI Tools", "youtube", 1),
            raw("Sea Moss", "reddit", 2),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn single_platform_topic_yields_valid_trend() {
        let merged = merge_raw_trends(vec![raw("solo topic", "youtube", 42)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].platforms, vec!["youtube"]);
        assert_eq!(merged[0].search_volume, 42);
    }

    #[test]
    fn duplicate_platform_is_not_repeated() {
        let merged = merge_raw_trends(vec![
            raw("ai tools", "youtube", 10),
            raw("AI Tools", "youtube", 5),
        ]);
        assert_eq!(merged[0].platforms, vec!["youtube"]);
        assert_eq!(merged[0].search_volume, 15);
    }

    #[test]
    fn competition_majority_wins() {
        let merged = merge_raw_trends(vec![
            raw_with("x", "a", 1, CompetitionLevel::Low, &[]),
            raw_with("x", "b", 1, CompetitionLevel::High, &[]),
            raw_with("x", "c", 1, CompetitionLevel::High, &[]),
        ]);
        assert_eq!(merged[0].competition_level, CompetitionLevel::High);
    }

    #[test]
    fn competition_tie_breaks_toward_first_seen() {
        let merged = merge_raw_trends(vec![
            raw_with("x", "a", 1, CompetitionLevel::High, &[]),
            raw_with("x", "b", 1, CompetitionLevel::Low, &[]),
        ]);
        assert_eq!(merged[0].competition_level, CompetitionLevel::High);
    }

    #[test]
    fn related_keywords_dedup_preserves_order() {
        let merged = merge_raw_trends(vec![
            raw_with("x", "a", 1, CompetitionLevel::Low, &["ai", "tools"]),
            raw_with("x", "b", 1, CompetitionLevel::Low, &["tools", "automation"]),
        ]);
        assert_eq!(merged[0].related_keywords, vec!["ai", "tools", "automation"]);
    }

    #[test]
    fn empty_input_yields_no_trends() {
        assert!(merge_raw_trends(vec![]).is_empty());
    }

    #[test]
    fn every_merged_trend_has_nonempty_platforms() {
        let merged = merge_raw_trends(vec![
            raw("a", "youtube", 1),
            raw("b", "tiktok", 2),
            raw("A", "reddit", 3),
        ]);
        assert!(merged.iter().all(|t| !t.platforms.is_empty()));
    }
}
