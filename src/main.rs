use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ledger_explorer::clock::SystemClock;
use ledger_explorer::config::default_config_path;
use ledger_explorer::io::Dataset;
use ledger_explorer::series::{TimeResolution, TimeSpan};
use ledger_explorer::summary::DatasetSummary;
use ledger_explorer::{
    aggregate_series, aggregate_sunburst, cumulative_series, ExplorerConfig, SeriesRequest,
    SunburstRequest,
};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ledger-explorer")]
#[command(about = "Explore ledger exports as sunburst trees and period series")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Transactions file (JSON array or .jsonl)
    #[arg(short, long, global = true)]
    transactions: Option<PathBuf>,

    /// Era table (JSON array or .jsonl)
    #[arg(short, long, global = true)]
    eras: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print sunburst slices for a date window
    Sunburst {
        /// Window start (defaults to the first transaction)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Window end (defaults to today)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// annualized or monthly (defaults to config)
        #[arg(long)]
        span: Option<TimeSpan>,

        /// Group small slices under "Other" nodes
        #[arg(long)]
        collapse_other: bool,

        /// Only include these accounts and their descendants (repeatable)
        #[arg(long = "account")]
        accounts: Vec<String>,
    },
    /// Print a normalized series for one account
    Series {
        account: String,

        /// era, year, quarter or month (defaults to config)
        #[arg(long)]
        resolution: Option<TimeResolution>,

        /// annualized or monthly (defaults to config)
        #[arg(long)]
        span: Option<TimeSpan>,

        /// Include descendant accounts
        #[arg(long)]
        deep: bool,
    },
    /// Print a running balance for one account
    Cumulative {
        account: String,

        /// year, quarter or month
        #[arg(long, default_value = "month")]
        resolution: TimeResolution,
    },
    /// Summarize the loaded dataset
    Summary,
    /// Show current configuration
    Config,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

fn load_dataset(cli: &Cli, config: &ExplorerConfig) -> Result<Dataset> {
    let path = cli
        .transactions
        .as_deref()
        .context("--transactions is required for this command")?;
    Dataset::load(path, cli.eras.as_deref(), config)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ExplorerConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config.display()))?;

    match &cli.command {
        Command::Sunburst {
            start,
            end,
            span,
            collapse_other,
            accounts,
        } => {
            if *collapse_other {
                config.sunburst.collapse_other = true;
            }
            let dataset = load_dataset(&cli, &config)?;
            let request = SunburstRequest {
                date_start: *start,
                date_end: *end,
                time_span: span.unwrap_or(config.series.time_span),
            };
            let transactions = dataset.restrict_to_accounts(accounts, &config);
            let sunburst = aggregate_sunburst(&transactions, &request, &config, &SystemClock)?;
            print_json(&sunburst.slices())?;
        }
        Command::Series {
            account,
            resolution,
            span,
            deep,
        } => {
            let dataset = load_dataset(&cli, &config)?;
            let request = SeriesRequest {
                account_id: account.clone(),
                resolution: resolution.unwrap_or(config.series.resolution),
                time_span: span.unwrap_or(config.series.time_span),
                deep: *deep,
            };
            let points = aggregate_series(
                &dataset.transactions,
                &dataset.tree,
                &request,
                &dataset.eras,
                &config,
            );
            print_json(&points)?;
        }
        Command::Cumulative {
            account,
            resolution,
        } => {
            let dataset = load_dataset(&cli, &config)?;
            let selected = ledger_explorer::tree::select_for_account(
                &dataset.transactions,
                &dataset.tree,
                account,
                true,
                config.tree.node_identity,
                &config.sunburst.leaf_suffix,
            );
            print_json(&cumulative_series(&selected, *resolution)?)?;
        }
        Command::Summary => {
            let dataset = load_dataset(&cli, &config)?;
            print_json(&DatasetSummary::new(
                &dataset.transactions,
                &dataset.eras,
                &dataset.tree,
            ))?;
        }
        Command::Config => {
            println!("Config file: {}", cli.config.display());
            println!(
                "{}",
                toml::to_string_pretty(&config).context("Failed to serialize config")?
            );
        }
    }

    Ok(())
}
