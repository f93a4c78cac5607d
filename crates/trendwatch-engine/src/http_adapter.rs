//! HTTP-backed source adapter for a platform metrics API.
//!
//! Wraps `reqwest` with typed response deserialization and adapter-scoped
//! error handling. Payload oddities degrade softly: unknown competition or
//! stage strings fall back to defaults, and entries without a topic are
//! skipped — a single malformed record never discards a platform's feed.

use std::time::Duration;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::Deserialize;

use async_trait::async_trait;

use trendwatch_core::{CompetitionLevel, RawTrend, SocialSignal, StageHint, VolumeSample};

use crate::adapter::SourceAdapter;
use crate::error::EngineError;

const MAX_TRENDS_PER_FETCH: usize = 50;

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    trends: Vec<TrendingEntry>,
}

#[derive(Debug, Deserialize)]
struct TrendingEntry {
    topic: Option<String>,
    #[serde(default)]
    search_volume: u64,
    competition: Option<String>,
    stage: Option<String>,
    #[serde(default)]
    related_keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VolumeResponse {
    volume: u64,
    observed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct SocialResponse {
    #[serde(default)]
    signals: Vec<SocialEntry>,
}

#[derive(Debug, Deserialize)]
struct SocialEntry {
    text: Option<String>,
    #[serde(default)]
    strength: f64,
}

/// Source adapter over one platform's slice of the metrics API.
///
/// Use [`HttpSourceAdapter::new`] for production or
/// [`HttpSourceAdapter::with_base_url`] to point at a mock server in tests.
pub struct HttpSourceAdapter {
    client: Client,
    platform: String,
    base_url: Url,
}

impl HttpSourceAdapter {
    /// Creates an adapter for `platform` against the metrics API at
    /// `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`EngineError::Adapter`] if `base_url` is
    /// not a valid URL.
    pub fn new(
        platform: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Self::with_client(platform, base_url, client)
    }

    /// Creates an adapter with default client settings — intended for
    /// wiremock tests.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`HttpSourceAdapter::new`].
    pub fn with_base_url(platform: &str, base_url: &str) -> Result<Self, EngineError> {
        Self::new(platform, base_url, 30, "trendwatch/0.1 (trend-discovery)")
    }

    fn with_client(platform: &str, base_url: &str, client: Client) -> Result<Self, EngineError> {
        // Normalise: exactly one trailing slash so joined paths append to the
        // root rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| EngineError::Adapter {
            platform: platform.to_string(),
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            platform: platform.to_string(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, EngineError> {
        self.base_url
            .join(path)
            .map_err(|e| EngineError::Adapter {
                platform: self.platform.clone(),
                message: format!("invalid endpoint path '{path}': {e}"),
            })
    }
}

#[async_trait]
impl SourceAdapter for HttpSourceAdapter {
    fn platform(&self) -> &str {
        &self.platform
    }

    async fn fetch_trends(&self) -> Result<Vec<RawTrend>, EngineError> {
        let url = self.endpoint(&format!("v1/{}/trending", self.platform))?;
        let response: TrendingResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let observed_at = Utc::now();
        let trends = response
            .trends
            .into_iter()
            .filter_map(|entry| {
                let topic = entry.topic?;
                if topic.trim().is_empty() {
                    return None;
                }
                Some(RawTrend {
                    topic,
                    platform: self.platform.clone(),
                    search_volume: entry.search_volume,
                    competition_level: parse_competition(entry.competition.as_deref()),
                    stage_hint: parse_stage_hint(entry.stage.as_deref()),
                    related_keywords: entry.related_keywords,
                    observed_at,
                })
            })
            .take(MAX_TRENDS_PER_FETCH)
            .collect();

        Ok(trends)
    }

    async fn fetch_volume(&self, keyword: &str) -> Result<VolumeSample, EngineError> {
        let encoded = utf8_percent_encode(keyword, NON_ALPHANUMERIC).to_string();
        let url = self.endpoint(&format!("v1/{}/volume?keyword={encoded}", self.platform))?;
        let response: VolumeResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(VolumeSample {
            volume: response.volume,
            observed_at: response.observed_at.unwrap_or_else(Utc::now),
        })
    }

    async fn fetch_social_signals(&self) -> Result<Vec<SocialSignal>, EngineError> {
        let url = self.endpoint(&format!("v1/{}/social", self.platform))?;
        let response: SocialResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let signals = response
            .signals
            .into_iter()
            .filter_map(|entry| {
                let text = entry.text?;
                Some(SocialSignal {
                    text,
                    strength: entry.strength.clamp(0.0, 100.0),
                    platform: self.platform.clone(),
                })
            })
            .collect();

        Ok(signals)
    }
}

fn parse_competition(raw: Option<&str>) -> CompetitionLevel {
    match raw {
        Some("low") => CompetitionLevel::Low,
        Some("high") => CompetitionLevel::High,
        // Unknown or missing assessments read as the midpoint.
        _ => CompetitionLevel::Medium,
    }
}

fn parse_stage_hint(raw: Option<&str>) -> StageHint {
    match raw {
        Some("peak") => StageHint::Peak,
        Some("declining") => StageHint::Declining,
        _ => StageHint::Emerging,
    }
}
