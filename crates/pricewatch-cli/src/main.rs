use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pricewatch_core::load_app_config;
use pricewatch_feed::FeedClient;
use pricewatch_storage::{ObjectStore, R2Config};
use pricewatch_supabase::SupabaseClient;

mod sync;

use sync::{run_sync, SyncOptions};

#[derive(Debug, Parser)]
#[command(name = "pricewatch")]
#[command(about = "Market-price feed sync for the inventory database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Pull the price feed, upsert market data, patch inventory prices, and
    /// mirror product images.
    Sync {
        /// Process at most N feed records.
        #[arg(long)]
        limit: Option<usize>,
        /// Skip the image mirror stage entirely.
        #[arg(long)]
        skip_images: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    match cli.command {
        Commands::Sync { limit, skip_images } => {
            let feed = FeedClient::new(
                &config.feed_url,
                config.request_timeout_secs,
                &config.feed_user_agent,
            )?;
            let db = SupabaseClient::new(
                &config.supabase_url,
                &config.supabase_key,
                config.request_timeout_secs,
            )?;

            let store = if skip_images {
                None
            } else {
                Some(ObjectStore::connect(&R2Config::from_app_config(&config)).await)
            };

            let options = SyncOptions { limit };
            let totals = run_sync(&feed, &db, store.as_ref(), &options).await?;

            println!("sync complete: {totals}");
        }
    }

    Ok(())
}
