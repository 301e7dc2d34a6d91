//! Command line runner for the revq batch tasks.
//!
//! Both tasks are also exposed as HTTP triggers and scheduler jobs; the CLI
//! exists for manual and ad-hoc runs against the same database.

use clap::{Parser, Subcommand};

use revq_chains::topics::{DEFAULT_SAMPLE_SIZE, DEFAULT_TOPIC_COUNT};
use revq_chains::{summary, topics};
use revq_llm::GeminiClient;

#[derive(Debug, Parser)]
#[command(name = "revq-cli")]
#[command(about = "revq batch task runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract topics from a sample of stored reviews
    Topics {
        /// Number of topics to request from the model
        #[arg(long, default_value_t = DEFAULT_TOPIC_COUNT)]
        k: u32,
        /// Number of reviews sampled as context
        #[arg(long = "sample-size", default_value_t = DEFAULT_SAMPLE_SIZE)]
        sample_size: i64,
    },
    /// Generate and store the weekly review summary
    Summary,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = revq_core::load_app_config()?;

    let pool_config = revq_db::PoolConfig::from_app_config(&config);
    let pool = revq_db::connect_pool(&config.database_url, pool_config).await?;

    let llm = GeminiClient::new(
        &config.gemini_api_key,
        &config.generation_model,
        &config.embedding_model,
        config.llm_timeout_secs,
    )?;

    match cli.command {
        Commands::Topics { k, sample_size } => {
            let stored = topics::extract_and_store_topics(&llm, &pool, k, sample_size).await?;
            println!("topic extraction complete: {stored} topics stored");
        }
        Commands::Summary => match summary::generate_and_store_weekly_summary(&llm, &pool).await? {
            Some(text) => {
                println!("weekly summary stored:\n\n{text}");
            }
            None => {
                println!("weekly summary complete (no text generated or stored)");
            }
        },
    }

    Ok(())
}
