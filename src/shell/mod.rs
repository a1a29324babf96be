//! Interactive shell command parsing.
//!
//! The loop itself lives in `main.rs`; this module owns the grammar so it
//! can be tested without a terminal.

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Analyze { ticker: String },
    Chart { ticker: String },
    Popular,
    Help,
    Quit,
    Empty,
    /// The command word was recognized but its ticker argument is missing.
    MissingTicker { command: &'static str },
    Unknown { input: String },
}

pub const HELP_TEXT: &str = "\
Commands:
  analyze <ticker>   Full technical analysis (e.g. `analyze AAPL`)
  chart <ticker>     Price chart with EMA overlays (e.g. `chart BTC-USD`)
  popular            List popular tickers
  help               Show this help message
  exit | quit        Leave the shell";

pub const PROMPT: &str = "mma> ";

/// Parses a raw input line. Command words are case-insensitive; the ticker
/// argument is upper-cased the way data providers expect symbols.
pub fn parse_command(line: &str) -> ShellCommand {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return ShellCommand::Empty;
    };
    let arg = words.next();

    match command.to_ascii_lowercase().as_str() {
        "analyze" => match arg {
            Some(ticker) => ShellCommand::Analyze {
                ticker: ticker.to_ascii_uppercase(),
            },
            None => ShellCommand::MissingTicker { command: "analyze" },
        },
        "chart" => match arg {
            Some(ticker) => ShellCommand::Chart {
                ticker: ticker.to_ascii_uppercase(),
            },
            None => ShellCommand::MissingTicker { command: "chart" },
        },
        "popular" => ShellCommand::Popular,
        "help" => ShellCommand::Help,
        "exit" | "quit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown {
            input: command.to_string(),
        },
    }
}
