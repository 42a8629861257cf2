mod export;
mod report;
mod schedule;
mod scrape;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricewatch")]
#[command(about = "Track product prices across e-commerce storefronts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every configured URL once and export the results
    Scrape {
        /// Products file mapping platform names to URL lists
        #[arg(long)]
        products: Option<PathBuf>,

        /// Show the browser window instead of running headless
        #[arg(long)]
        headed: bool,

        /// Skip writing JSON exports and history
        #[arg(long)]
        no_export: bool,
    },
    /// Summarise an exported record file per platform
    Report {
        /// Exported JSON file (defaults to the latest export)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Scrape now, then again on a cron schedule until interrupted
    Schedule {
        /// Six-field cron expression, e.g. "0 0 9 * * *"
        #[arg(long)]
        cron: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = pricewatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Scrape {
            products,
            headed,
            no_export,
        }) => {
            if let Some(path) = products {
                config.products_path = path;
            }
            if headed {
                config.headless = false;
            }
            scrape::run_scrape(&config, !no_export).await?;
        }
        Some(Commands::Report { input }) => report::run_report(&config, input.as_deref())?,
        Some(Commands::Schedule { cron }) => {
            if let Some(expr) = cron {
                config.schedule_cron = expr;
            }
            schedule::run_schedule(config).await?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
