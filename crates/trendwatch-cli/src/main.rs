mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "trendwatch")]
#[command(about = "Trend discovery and lifecycle-scoring engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a single scan cycle and print the scored trends.
    Scan,
    /// Run the monitor on the configured interval until interrupted.
    Monitor,
    /// Fetch per-platform volume for a keyword and print its difficulty.
    Analyze { keyword: String },
    /// List recently persisted trends and niches.
    Report {
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = trendwatch_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan => commands::scan::run(&config).await,
        Commands::Monitor => commands::monitor::run(&config).await,
        Commands::Analyze { keyword } => commands::analyze::run(&config, &keyword).await,
        Commands::Report { limit } => commands::report::run(&config, limit).await,
    }
}
