// Main function for the market scanner.
mod marketdata {
    // Client for fetching market data.
    pub mod api_caller;
    // Response structures for market data.
    pub mod response;
}
// HTTP client module.
mod http {
    // HTTP client implementation.
    pub mod client;
}
// Domain types and error taxonomy.
mod model;
// Runtime configuration.
mod config;
// Pure indicator math.
mod indicators;
// Signal rules.
mod strategy;
// Symbol universe filtering and ranking.
mod universe;
// Scan orchestrator loop.
mod scanner;
// Report rendering.
mod report;
// Telegram delivery.
mod telegram;
// module storing defaults
mod constants;

use clap::{Parser, Subcommand};
use dotenv::dotenv;

use crate::marketdata::api_caller::BinanceClient;
use crate::scanner::Scanner;
use crate::telegram::TelegramNotifier;

// Command-line argument parser.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

// Subcommands for the application.
#[derive(Subcommand, Debug)]
enum Commands {
    // Run the repeating scan loop.
    Scan,
    // Run a single scan cycle, then exit.
    ScanOnce,
}

#[tokio::main]
// Main function entry point.
async fn main() {
    dotenv().ok();

    env_logger::init();

    let args = Args::parse();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid configuration, refusing to start: {}", err);
            return;
        }
    };

    let notifier = match TelegramNotifier::new(
        config.telegram_bot_token.clone(),
        config.telegram_chat_id,
    )
    .await
    {
        Ok(notifier) => notifier,
        Err(err) => {
            log::error!("failed to connect to telegram: {}", err);
            return;
        }
    };

    let market = BinanceClient::new();
    let scanner = Scanner::new(config, market, notifier);

    match args.command {
        Commands::Scan => scanner.run().await,
        Commands::ScanOnce => match scanner.scan_cycle().await {
            Ok(report) => log::info!("scan cycle finished: {} signal(s)", report.signals.len()),
            Err(err) => log::error!("scan cycle failed: {}", err),
        },
    }
}
