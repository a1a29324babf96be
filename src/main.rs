mod config;
mod data;
mod error;
mod indicators;
mod insight;
mod render;
mod shell;
mod strategy;
mod types;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::AppConfig;
use data::{fetch_series, MarketDataClient};
use insight::InsightClient;
use shell::ShellCommand;
use types::EnrichedSeries;

#[derive(Parser)]
#[command(name = "market-analyzer")]
#[command(version = "0.1.0")]
#[command(about = "Technical market analysis in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "market-analyzer.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a ticker symbol
    Analyze {
        /// Ticker symbol (e.g. AAPL, BTC-USD)
        ticker: String,

        /// Data range (e.g. 6mo, 1y, max)
        #[arg(short, long)]
        period: Option<String>,

        /// Bar interval (e.g. 1d, 1wk)
        #[arg(short, long)]
        interval: Option<String>,
    },
    /// Display a terminal price chart for a ticker
    Chart {
        /// Ticker symbol (e.g. AAPL, BTC-USD)
        ticker: String,

        /// Data range (e.g. 6mo, 1y, max)
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Show a list of popular tickers
    Popular,
    /// Start an interactive session
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = AppConfig::load(&cli.config)?;
    if let Err(errors) = config.validate() {
        return Err(anyhow!("invalid configuration:\n  {}", errors.join("\n  ")));
    }

    match cli.command {
        Commands::Analyze {
            ticker,
            period,
            interval,
        } => {
            let range = period.unwrap_or_else(|| config.defaults.range.clone());
            let interval = interval.unwrap_or_else(|| config.defaults.interval.clone());
            run_analyze(&config, &ticker, &range, &interval).await?;
        }
        Commands::Chart { ticker, period } => {
            let range = period.unwrap_or_else(|| config.defaults.range.clone());
            run_chart(&config, &ticker, &range).await?;
        }
        Commands::Popular => {
            println!("{}", render::popular_table());
        }
        Commands::Interactive => {
            run_interactive(&config).await?;
        }
    }

    Ok(())
}

/// Fetches history and runs the full indicator pass for one ticker.
async fn load_enriched(
    config: &AppConfig,
    ticker: &str,
    range: &str,
    interval: &str,
) -> Result<EnrichedSeries> {
    let client = MarketDataClient::new(&config.data);
    let series = fetch_series(&client, ticker, range, interval).await?;
    info!(rows = series.len(), ticker, "fetched history");
    Ok(indicators::compute(&series)?)
}

async fn run_analyze(config: &AppConfig, ticker: &str, range: &str, interval: &str) -> Result<()> {
    println!("{}", format!("Fetching data for {}...", ticker).blue().bold());
    let enriched = load_enriched(config, ticker, range, interval).await?;
    let result = strategy::analyze_market(&enriched, ticker)?;

    render::print_analysis(&result);

    let insight = InsightClient::from_env(&config.insight);
    let summary = insight.summarize(&result).await;
    render::print_insight(&summary);

    if let Some(latest) = enriched.latest() {
        println!("\n{}", render::indicator_table(&latest.indicators));
    }

    Ok(())
}

async fn run_chart(config: &AppConfig, ticker: &str, range: &str) -> Result<()> {
    println!("{}", format!("Fetching data for {}...", ticker).blue().bold());
    let enriched = load_enriched(config, ticker, range, &config.defaults.interval).await?;
    println!("\n{}", render::render_chart(&enriched, ticker));
    Ok(())
}

async fn run_interactive(config: &AppConfig) -> Result<()> {
    println!("{}", " Interactive Session ".bold().reversed());
    println!("{}\n", shell::HELP_TEXT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(shell::PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!("\n{}", "Goodbye!".yellow());
            break;
        };

        match shell::parse_command(&line) {
            ShellCommand::Analyze { ticker } => {
                let range = config.defaults.range.clone();
                let interval = config.defaults.interval.clone();
                if let Err(e) = run_analyze(config, &ticker, &range, &interval).await {
                    println!("{} {}", "Error:".red().bold(), e);
                }
            }
            ShellCommand::Chart { ticker } => {
                let range = config.defaults.range.clone();
                if let Err(e) = run_chart(config, &ticker, &range).await {
                    println!("{} {}", "Error:".red().bold(), e);
                }
            }
            ShellCommand::Popular => println!("{}", render::popular_table()),
            ShellCommand::Help => println!("{}", shell::HELP_TEXT),
            ShellCommand::Quit => {
                println!("{}", "Goodbye!".yellow());
                break;
            }
            ShellCommand::Empty => {}
            ShellCommand::MissingTicker { command } => {
                println!(
                    "{} usage: {} <ticker> (e.g. AAPL, TSLA)",
                    "Error:".red().bold(),
                    command
                );
            }
            ShellCommand::Unknown { input } => {
                println!("{} unknown command: {}", "Error:".red().bold(), input);
                println!("Type {} to see available commands.", "help".cyan());
            }
        }
    }

    Ok(())
}
