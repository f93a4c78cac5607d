//! Keyword analysis: sample per-platform volume and print the difficulty
//! signal for each.

use futures::future::join_all;

use trendwatch_core::{AppConfig, CompetitionLevel};
use trendwatch_engine::{keyword_difficulty, SourceAdapter};

pub async fn run(config: &AppConfig, keyword: &str) -> anyhow::Result<()> {
    let adapters = super::build_adapters(config)?;

    let fetches = adapters.iter().map(|adapter| async move {
        let sample = adapter.fetch_volume(keyword).await;
        (adapter.platform().to_string(), sample)
    });

    println!("keyword: {keyword}");
    for (platform, result) in join_all(fetches).await {
        match result {
            Ok(sample) => {
                // Per-keyword competition assessment is not part of the
                // volume contract; difficulty is reported against the
                // midpoint level.
                let difficulty = keyword_difficulty(&sample, CompetitionLevel::Medium);
                println!("  {platform:<10} volume={:<10} difficulty={difficulty}", sample.volume);
            }
            Err(e) => {
                tracing::warn!(platform = %platform, error = %e, "volume fetch failed");
                println!("  {platform:<10} unavailable");
            }
        }
    }

    Ok(())
}
