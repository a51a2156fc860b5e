//! Entry point. Wires config -> store/fixtures -> engines -> JSON on stdout.

mod candidates;
mod cli;
mod config;
mod earnings;
mod error;
mod fixtures;
mod parser;
mod positions;
mod simulator;
mod state;
mod types;
mod utils;

use std::path::PathBuf;

use chrono::Local;
use dotenvy::dotenv;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use crate::cli::Cmd;
use crate::fixtures::FixtureSource;
use crate::state::JsonFileStore;
use crate::utils::sanitize_symbol;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let args = cli::Args::parse()?;

    // Load config
    let cfg_path = args
        .config
        .or_else(|| std::env::var("DESK_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("config.yaml"));
    let cfg = config::AppConfig::load_or_default(&cfg_path)?;
    let source = FixtureSource::new(&cfg.data.dir);

    match args.cmd {
        Cmd::Positions { method } => {
            let method = method.unwrap_or(cfg.portfolio.cost_method);
            let store = JsonFileStore::new(cfg.state_path());
            let txns = load_transactions(&store, &source).await?;

            let mut symbols: Vec<String> = txns.iter().map(|t| sanitize_symbol(&t.symbol)).collect();
            symbols.sort();
            symbols.dedup();
            let prices = source.latest_prices(&symbols).await;

            let summary = positions::compute_positions(&txns, &prices, method);
            info!("{} transactions -> {} positions ({:?})", txns.len(), summary.len(), method);
            print_json(&summary)?;
        }

        Cmd::Add { text } => {
            let Some(txn) = parser::parse_transaction(&text) else {
                anyhow::bail!("Unrecognized transaction: {}", text);
            };
            let store = JsonFileStore::new(cfg.state_path());
            // make sure the sample portfolio is in place before the first manual entry
            let current = load_transactions(&store, &source).await?;
            let all = state::append(&store, current, txn.clone())?;
            info!("Recorded {:?} {} (store now has {})", txn.kind, txn.symbol, all.len());
            print_json(&txn)?;
        }

        Cmd::Options { symbol } => {
            let symbol = sanitize_symbol(&symbol);
            let chain = source.options_chain(&symbol).await?;
            let mut rng = match cfg.simulation.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let report = candidates::options_report(&mut rng, &symbol, &chain, &cfg.simulation.params);
            print_json(&report)?;
        }

        Cmd::Earnings { symbol } => {
            let records = source.earnings().await?;
            match symbol {
                Some(sym) => print_json(&json!({ "sampleData": true, "details": earnings::find(&records, &sym)? }))?,
                None => {
                    let today = Local::now().date_naive();
                    let upcoming = earnings::upcoming(&records, today, cfg.earnings.window_days);
                    print_json(&json!({ "sampleData": true, "upcoming": upcoming }))?;
                }
            }
        }

        Cmd::Prices { symbol } => {
            let series = source.price_series(&symbol).await?;
            print_json(&json!({ "sampleData": true, "series": series }))?;
        }
    }

    Ok(())
}

/// Stored transactions, seeded from the sample portfolio on first use.
async fn load_transactions(
    store: &JsonFileStore,
    source: &FixtureSource,
) -> anyhow::Result<Vec<types::Transaction>> {
    info!("Using transaction store {}", store.path().display());
    state::load_or_seed(store, move || async move {
        source.portfolio_seed().await.unwrap_or_else(|e| {
            info!("No sample portfolio ({}); starting empty", e);
            Vec::new()
        })
    })
    .await
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
