//! Report: list recently persisted trends and niches.

use trendwatch_core::AppConfig;

pub async fn run(config: &AppConfig, limit: i64) -> anyhow::Result<()> {
    let pool_config = trendwatch_db::PoolConfig::from_app_config(config);
    let pool = trendwatch_db::connect_pool(&config.database_url, pool_config).await?;

    let trends = trendwatch_db::list_recent_trends(&pool, limit).await?;
    println!("recent trends ({}):", trends.len());
    for row in &trends {
        println!(
            "  {:>5.1}  {:<10} {:<30} {}  platforms={}",
            row.trend_score,
            row.lifecycle_stage,
            row.topic,
            row.discovered_at.format("%Y-%m-%d %H:%M"),
            row.platforms.join(",")
        );
    }

    let niches = trendwatch_db::list_recent_niches(&pool, limit).await?;
    println!("recent niches ({}):", niches.len());
    for row in &niches {
        println!(
            "  {:<30} category={:<12} profitability={:>5.1} direction={}",
            row.niche_name, row.category, row.profitability_score, row.trend_direction
        );
    }

    Ok(())
}
