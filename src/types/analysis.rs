use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified trend state of the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketRegime {
    Bullish,
    Bearish,
    Sideways,
}

impl MarketRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketRegime::Bullish => "Bullish",
            MarketRegime::Bearish => "Bearish",
            MarketRegime::Sideways => "Sideways",
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recommended action derived from regime and oscillator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    Caution,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
            Signal::Caution => "CAUTION",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable result of one analysis run. The indicator fields carry the
/// values the classifier actually used, with neutral defaults already
/// substituted for undefined inputs, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: String,
    pub current_price: Decimal,
    pub regime: MarketRegime,
    pub signal: Signal,
    pub confidence: Decimal,
    pub rsi: Decimal,
    pub macd: Decimal,
    pub macd_signal: Decimal,
    pub ema_50: Decimal,
    pub ema_200: Decimal,
}
