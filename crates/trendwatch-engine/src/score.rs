//! Composite trend scoring and keyword difficulty.

use trendwatch_core::{CompetitionLevel, SocialSignal, Trend, VolumeSample};

use crate::lifecycle::growth_rate;

const VOLUME_WEIGHT: f64 = 0.4;
const SOCIAL_WEIGHT: f64 = 0.3;
const GROWTH_WEIGHT: f64 = 0.2;
const COMPETITION_WEIGHT: f64 = 0.1;

/// Search volume at which the volume sub-score saturates at 100.
const VOLUME_CEILING: f64 = 1_000_000.0;

/// Compute the composite trend score for a merged trend.
///
/// Four sub-signals, each nominally in `[0, 100]`, are blended by weight:
/// volume 0.4, social 0.3, growth 0.2, inverse competition 0.1. The growth
/// sub-score is the raw percentage change between the last two history
/// samples and is deliberately not clamped on its own — clamping happens
/// once, on the composite. The result is clamped to `[0, 100]` and rounded
/// to the nearest integer.
///
/// Missing inputs degrade their sub-signal to zero rather than failing the
/// score: no matching social signals ⇒ social 0, fewer than two history
/// samples (or a zero previous volume) ⇒ growth 0.
#[must_use]
pub fn score_trend(trend: &Trend, social_signals: &[SocialSignal], history: &[VolumeSample]) -> f64 {
    let volume = volume_score(trend.search_volume);
    let social = social_score(&trend.topic, social_signals);
    let growth = growth_rate(history);
    let competition = competition_score(trend.competition_level);

    let composite = volume * VOLUME_WEIGHT
        + social * SOCIAL_WEIGHT
        + growth * GROWTH_WEIGHT
        + competition * COMPETITION_WEIGHT;

    composite.clamp(0.0, 100.0).round()
}

fn volume_score(search_volume: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let volume = search_volume as f64;
    (volume / VOLUME_CEILING * 100.0).min(100.0)
}

/// Mean strength of all social signals mentioning the topic, matched by
/// case-insensitive substring. Zero when nothing matches.
fn social_score(topic: &str, signals: &[SocialSignal]) -> f64 {
    let topic_lower = topic.to_lowercase();
    let matching: Vec<f64> = signals
        .iter()
        .filter(|s| s.text.to_lowercase().contains(&topic_lower))
        .map(|s| s.strength)
        .collect();

    if matching.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = matching.len() as f64;
    matching.iter().sum::<f64>() / denom
}

/// Inverted competition: lower competition contributes more.
fn competition_score(level: CompetitionLevel) -> f64 {
    100.0 - f64::from(level.index())
}

/// Keyword-level difficulty signal in `[0, 100]`.
///
/// Starts from the assessed competition index and nudges upward for
/// high-volume keywords, which attract more contention than their
/// competition level alone suggests.
#[must_use]
pub fn keyword_difficulty(sample: &VolumeSample, competition: CompetitionLevel) -> u8 {
    #[allow(clippy::cast_precision_loss)]
    let volume = sample.volume as f64;
    let volume_pressure = (volume / VOLUME_CEILING * 20.0).min(20.0);
    let difficulty = f64::from(competition.index()) + volume_pressure;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = difficulty.clamp(0.0, 100.0).round() as u8;
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use trendwatch_core::LifecycleStage;
    use uuid::Uuid;

    fn trend(topic: &str, volume: u64, competition: CompetitionLevel) -> Trend {
        Trend {
            id: Uuid::new_v4(),
            topic: topic.to_string(),
            platforms: vec!["youtube".to_string()],
            trend_score: 0.0,
            search_volume: volume,
            competition_level: competition,
            lifecycle_stage: LifecycleStage::Peak,
            related_keywords: vec![],
            discovered_at: Utc::now(),
            expires_at: None,
        }
    }

    fn signal(text: &str, strength: f64) -> SocialSignal {
        SocialSignal {
            text: text.to_string(),
            strength,
            platform: "tiktok".to_string(),
        }
    }

    fn history(volumes: &[u64]) -> Vec<VolumeSample> {
        let start = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        volumes
            .iter()
            .enumerate()
            .map(|(i, &volume)| VolumeSample {
                volume,
                observed_at: start + Duration::hours(i64::try_from(i).unwrap()),
            })
            .collect()
    }

    #[test]
    fn volume_score_saturates_at_one_million() {
        assert!((volume_score(1_000_000) - 100.0).abs() < f64::EPSILON);
        assert!((volume_score(5_000_000) - 100.0).abs() < f64::EPSILON);
        assert!((volume_score(500_000) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn social_score_matches_substring_case_insensitively() {
        let signals = vec![
            signal("everyone is using AI TOOLS now", 80.0),
            signal("best ai tools of the year", 60.0),
            signal("unrelated gardening post", 99.0),
        ];
        let score = social_score("ai tools", &signals);
        assert!((score - 70.0).abs() < f64::EPSILON, "score = {score}");
    }

    #[test]
    fn social_score_without_matches_is_zero() {
        let signals = vec![signal("gardening", 90.0)];
        assert!((social_score("ai tools", &signals) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn competition_is_inverted() {
        assert!((competition_score(CompetitionLevel::Low) - 80.0).abs() < f64::EPSILON);
        assert!((competition_score(CompetitionLevel::High) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn score_is_weighted_sum_rounded() {
        // volume 50_000 → 5.0; social → 70.0; growth 60%; competition low → 80.
        let t = trend("ai tools", 50_000, CompetitionLevel::Low);
        let signals = vec![signal("AI tools everywhere", 70.0)];
        let score = score_trend(&t, &signals, &history(&[10_000, 16_000]));

        // 5*0.4 + 70*0.3 + 60*0.2 + 80*0.1 = 2 + 21 + 12 + 8 = 43
        assert!((score - 43.0).abs() < f64::EPSILON, "score = {score}");
    }

    #[test]
    fn score_clamps_when_growth_explodes() {
        // 1 → 10_000 is +999_900% growth; composite must still land in [0, 100].
        let t = trend("viral", 2_000_000, CompetitionLevel::Low);
        let signals = vec![signal("viral everywhere", 100.0)];
        let score = score_trend(&t, &signals, &history(&[1, 10_000]));
        assert!((score - 100.0).abs() < f64::EPSILON, "score = {score}");
    }

    #[test]
    fn score_clamps_negative_growth_at_zero_floor() {
        // Heavy decline with no other contribution stays at the floor.
        let t = trend("fading", 0, CompetitionLevel::High);
        let score = score_trend(&t, &[], &history(&[100_000, 100]));
        assert!(
            (0.0..=100.0).contains(&score),
            "score out of range: {score}"
        );
    }

    #[test]
    fn zero_previous_volume_contributes_no_growth() {
        let t = trend("new", 100_000, CompetitionLevel::Medium);
        let score = score_trend(&t, &[], &history(&[0, 50_000]));
        // volume 10*0.4 + competition 50*0.1 = 9
        assert!((score - 9.0).abs() < f64::EPSILON, "score = {score}");
    }

    #[test]
    fn empty_history_contributes_no_growth() {
        let t = trend("fresh", 100_000, CompetitionLevel::Medium);
        let score = score_trend(&t, &[], &[]);
        assert!((score - 9.0).abs() < f64::EPSILON, "score = {score}");
    }

    #[test]
    fn score_always_within_bounds() {
        let volumes = [0_u64, 1, 999_999, 1_000_000, 10_000_000];
        let histories = [
            history(&[]),
            history(&[0, 1_000_000]),
            history(&[1, 1_000_000]),
            history(&[1_000_000, 1]),
        ];
        for &v in &volumes {
            for h in &histories {
                for level in [
                    CompetitionLevel::Low,
                    CompetitionLevel::Medium,
                    CompetitionLevel::High,
                ] {
                    let score = score_trend(&trend("t", v, level), &[], h);
                    assert!(
                        (0.0..=100.0).contains(&score),
                        "v={v} level={level} score={score}"
                    );
                }
            }
        }
    }

    #[test]
    fn keyword_difficulty_tracks_competition_and_volume() {
        let low_volume = VolumeSample {
            volume: 1_000,
            observed_at: Utc::now(),
        };
        let high_volume = VolumeSample {
            volume: 5_000_000,
            observed_at: Utc::now(),
        };

        assert_eq!(keyword_difficulty(&low_volume, CompetitionLevel::Low), 20);
        assert_eq!(keyword_difficulty(&high_volume, CompetitionLevel::Low), 40);
        assert_eq!(keyword_difficulty(&high_volume, CompetitionLevel::High), 100);
    }
}
