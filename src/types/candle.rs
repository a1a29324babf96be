#![allow(dead_code)]
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One OHLCV bar. The `low <= open,close <= high` relation is not enforced;
/// upstream data is taken as-is and downstream math must tolerate violations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Candle {
    pub fn change(&self) -> Decimal {
        self.close - self.open
    }

    pub fn change_percentage(&self) -> Decimal {
        if self.open.is_zero() {
            return Decimal::ZERO;
        }
        ((self.close - self.open) / self.open) * Decimal::from(100)
    }
}

/// Column names every input series must carry before indicators can run.
pub const REQUIRED_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// An ordered series of candles, strictly increasing by timestamp.
///
/// Alongside the rows it records which columns the upstream source actually
/// delivered (lowercased). A provider can legitimately omit an array (for
/// instance `volume` for some index tickers), and the indicator engine uses
/// this record to reject such series with a schema error instead of silently
/// computing on zero-filled values.
#[derive(Debug, Clone, Default)]
pub struct Series {
    candles: Vec<Candle>,
    columns: Vec<String>,
}

impl Series {
    /// Builds a series with the full OHLCV column set. This is the normal
    /// constructor for programmatically assembled data.
    pub fn from_candles(candles: Vec<Candle>) -> Self {
        Self {
            candles,
            columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Builds a series whose source delivered only the given columns.
    pub fn with_columns(candles: Vec<Candle>, columns: Vec<String>) -> Self {
        Self { candles, columns }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Case-insensitive column presence check.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    /// First required OHLCV column the source did not deliver, if any.
    pub fn missing_required_column(&self) -> Option<&'static str> {
        REQUIRED_COLUMNS.iter().copied().find(|c| !self.has_column(c))
    }

    pub fn closes(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn highs(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.high).collect()
    }

    pub fn lows(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.low).collect()
    }
}
