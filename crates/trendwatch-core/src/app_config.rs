use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Hot-trend webhook target. Unset disables notification delivery.
    pub webhook_url: Option<String>,
    pub log_level: String,
    pub categories_path: PathBuf,
    /// Platform names to poll each cycle.
    pub platforms: Vec<String>,
    /// Base URL of the platform metrics API.
    pub metrics_api_url: String,
    pub scan_interval_secs: u64,
    pub hot_trend_threshold: f64,
    pub niche_score_threshold: f64,
    pub adapter_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field(
                "webhook_url",
                &self.webhook_url.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("categories_path", &self.categories_path)
            .field("platforms", &self.platforms)
            .field("metrics_api_url", &self.metrics_api_url)
            .field("scan_interval_secs", &self.scan_interval_secs)
            .field("hot_trend_threshold", &self.hot_trend_threshold)
            .field("niche_score_threshold", &self.niche_score_threshold)
            .field("adapter_timeout_secs", &self.adapter_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
