use anyhow::{Context, Result};
use bid_feeds::{CachingPriceFeed, FileSnapshotStore, HttpPriceSource};
use bid_pricing::{price_request, BidDecision, PriceQuote};
use bid_types::BidRequest;
use clap::Parser;
use prometheus::{Encoder, TextEncoder};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod gate;

use config::BidConfig;
use gate::{Admission, SPECIAL_ACCOUNT_RATE};

/// Computes a provider's bid price for a deployment order read as JSON.
///
/// Prints the price per block on stdout. Exits 2 when the order's price
/// ceiling is below what the provider requires and 1 on any error.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Optional TOML configuration file. Environment variables override it.
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Read the order from this file instead of stdin.
    #[clap(short, long, value_parser)]
    input: Option<PathBuf>,

    /// Log pricing details and dump metrics to stderr.
    #[clap(short, long)]
    verbose: bool,
}

/// What bidctl prints when it does not fail.
#[derive(Debug, PartialEq)]
enum Outcome {
    Price(String),
    TooLow(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match BidConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::from(1);
        }
    };
    config.verbose |= cli.verbose;
    init_tracing(&config);

    let code = match run(&cli, &config).await {
        Ok(Outcome::Price(price)) => {
            println!("{price}");
            ExitCode::SUCCESS
        }
        Ok(Outcome::TooLow(message)) => {
            eprintln!("{message}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::from(1)
        }
    };

    if config.verbose {
        dump_metrics();
    }
    code
}

fn init_tracing(config: &BidConfig) {
    let fallback = match (config.log_level.as_deref(), config.verbose) {
        (Some(level), _) => level,
        (None, true) => "debug",
        (None, false) => "warn",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli, config: &BidConfig) -> Result<Outcome> {
    let raw = match &cli.input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read order file: {:?}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read order from stdin")?;
            buf
        }
    };
    let request = BidRequest::from_json(&raw)?;
    let targets = config.price_targets().context("invalid price targets")?;

    if gate::admit(config).await? == Admission::Special {
        return Ok(Outcome::Price(SPECIAL_ACCOUNT_RATE.to_string()));
    }

    // Reject unusable ceilings before touching the network.
    PriceQuote::from_request(&request)?;

    let feed = price_feed(config)?;
    let usd_per_unit = feed.get_rate().await?;
    info!(usd_per_unit, "using exchange rate");

    let quote = price_request(&request, &targets, usd_per_unit)?;
    debug!(monthly_usd = quote.monthly_usd, gpu_usd = quote.gpu_cost_usd, "priced request");

    Ok(match quote.decision {
        BidDecision::Priced { price } => Outcome::Price(price),
        too_low @ BidDecision::TooLow { .. } => Outcome::TooLow(too_low.to_string()),
    })
}

fn price_feed(config: &BidConfig) -> Result<CachingPriceFeed> {
    let feed = &config.price_feed;
    let timeout = config.http_timeout();
    let primary = HttpPriceSource::new("primary", &feed.primary_url, timeout)?.with_asset_id(&feed.asset_id);
    let fallback = HttpPriceSource::new("fallback", &feed.fallback_url, timeout)?.with_asset_id(&feed.asset_id);
    let store = FileSnapshotStore::new(&config.cache.rate_path);

    Ok(CachingPriceFeed::new(Box::new(primary), Box::new(fallback), Box::new(store)))
}

fn dump_metrics() {
    let mut buffer = Vec::new();
    if TextEncoder::new().encode(&prometheus::gather(), &mut buffer).is_ok() {
        eprint!("{}", String::from_utf8_lossy(&buffer));
    }
}
