//! Terminal presentation of analysis results.

pub mod chart;

pub use chart::render_chart;

use colored::Colorize;
use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use crate::types::{AnalysisResult, IndicatorSnapshot, Signal};

#[derive(Tabled)]
struct IndicatorRow {
    #[tabled(rename = "Indicator")]
    indicator: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct PopularRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Ticker")]
    ticker: &'static str,
    #[tabled(rename = "Type")]
    kind: &'static str,
}

/// The ticker shortlist offered by the `popular` command and shell.
pub const POPULAR_TICKERS: [(&str, &str, &str); 7] = [
    ("Apple", "AAPL", "Stock"),
    ("NVIDIA", "NVDA", "Stock"),
    ("Tesla", "TSLA", "Stock"),
    ("S&P 500 ETF", "SPY", "ETF"),
    ("Bitcoin", "BTC-USD", "Crypto"),
    ("Ethereum", "ETH-USD", "Crypto"),
    ("Gold", "GC=F", "Commodity"),
];

fn signal_label(signal: Signal) -> colored::ColoredString {
    match signal {
        Signal::Buy => signal.as_str().green().bold(),
        Signal::Sell => signal.as_str().red().bold(),
        Signal::Caution => signal.as_str().yellow().bold(),
        Signal::Hold => signal.as_str().normal().bold(),
    }
}

/// Prints the headline analysis panel.
pub fn print_analysis(result: &AnalysisResult) {
    let title = format!(" Analysis: {} ", result.ticker.to_uppercase());
    println!("\n{}", title.bold().reversed());
    println!("  {} ${:.2}", "Price:".bold(), result.current_price);
    println!("  {} {}", "Regime:".bold(), result.regime);
    println!("  {} {}", "Signal:".bold(), signal_label(result.signal));
    println!(
        "  {} {:.0}%",
        "Confidence:".bold(),
        result.confidence * Decimal::from(100)
    );
}

/// Prints the AI narrative block.
pub fn print_insight(summary: &str) {
    println!("\n{}", " AI Insight ".bold().reversed());
    for line in summary.lines() {
        println!("  {}", line);
    }
}

fn cell(value: Option<Decimal>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".to_string(),
    }
}

/// Renders the full indicator table for the latest bar.
pub fn indicator_table(snapshot: &IndicatorSnapshot) -> String {
    let rows = vec![
        IndicatorRow {
            indicator: "RSI (14)".to_string(),
            value: cell(snapshot.rsi_14, 2),
        },
        IndicatorRow {
            indicator: "MACD".to_string(),
            value: cell(snapshot.macd, 4),
        },
        IndicatorRow {
            indicator: "MACD Signal".to_string(),
            value: cell(snapshot.macd_signal, 4),
        },
        IndicatorRow {
            indicator: "EMA (50)".to_string(),
            value: cell(snapshot.ema_50, 2),
        },
        IndicatorRow {
            indicator: "EMA (200)".to_string(),
            value: cell(snapshot.ema_200, 2),
        },
        IndicatorRow {
            indicator: "Bollinger Upper".to_string(),
            value: cell(snapshot.bb_upper, 2),
        },
        IndicatorRow {
            indicator: "Bollinger Mid".to_string(),
            value: cell(snapshot.bb_middle, 2),
        },
        IndicatorRow {
            indicator: "Bollinger Lower".to_string(),
            value: cell(snapshot.bb_lower, 2),
        },
        IndicatorRow {
            indicator: "ATR (14)".to_string(),
            value: cell(snapshot.atr_14, 2),
        },
    ];
    Table::new(rows).to_string()
}

/// Renders the popular-tickers table.
pub fn popular_table() -> String {
    let rows: Vec<PopularRow> = POPULAR_TICKERS
        .iter()
        .map(|(name, ticker, kind)| PopularRow { name, ticker, kind })
        .collect();
    Table::new(rows).to_string()
}
