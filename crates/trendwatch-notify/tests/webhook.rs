//! Integration tests for `WebhookNotifier` using wiremock HTTP mocks.

use chrono::Utc;
use uuid::Uuid;

use trendwatch_core::{CompetitionLevel, LifecycleStage, Trend};
use trendwatch_notify::{NotifyError, WebhookNotifier};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hot_trend(topic: &str, score: f64) -> Trend {
    Trend {
        id: Uuid::new_v4(),
        topic: topic.to_string(),
        platforms: vec!["youtube".to_string(), "tiktok".to_string()],
        trend_score: score,
        search_volume: 70_000,
        competition_level: CompetitionLevel::Medium,
        lifecycle_stage: LifecycleStage::Emerging,
        related_keywords: vec![],
        discovered_at: Utc::now(),
        expires_at: None,
    }
}

#[tokio::test]
async fn delivers_batch_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "count": 2,
            "trends": [
                {
                    "topic": "AI Tools",
                    "trend_score": 82.0,
                    "lifecycle_stage": "emerging",
                    "search_volume": 70000
                },
                { "topic": "Sea Moss" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = WebhookNotifier::with_base_url(&server.uri()).expect("valid url");
    let batch = vec![hot_trend("AI Tools", 82.0), hot_trend("Sea Moss", 79.0)];

    notifier.send(&batch).await.expect("delivery should succeed");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let notifier = WebhookNotifier::with_base_url(&server.uri()).expect("valid url");
    let result = notifier.send(&[hot_trend("AI Tools", 82.0)]).await;

    assert!(matches!(result, Err(NotifyError::Status(503))));
}

#[tokio::test]
async fn empty_batch_still_posts_zero_count() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({ "count": 0 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = WebhookNotifier::with_base_url(&server.uri()).expect("valid url");
    notifier.send(&[]).await.expect("delivery should succeed");
}
