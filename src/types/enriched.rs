use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Candle;

/// Derived indicator values for one bar. `None` means the bar sits inside the
/// indicator's warm-up window; consumers must treat that distinctly from zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub ema_50: Option<Decimal>,
    pub ema_200: Option<Decimal>,
    pub macd: Option<Decimal>,
    pub macd_signal: Option<Decimal>,
    pub rsi_14: Option<Decimal>,
    pub bb_upper: Option<Decimal>,
    pub bb_middle: Option<Decimal>,
    pub bb_lower: Option<Decimal>,
    pub atr_14: Option<Decimal>,
}

/// A candle together with the indicator values computed at its position.
#[derive(Debug, Clone)]
pub struct EnrichedBar {
    pub candle: Candle,
    pub indicators: IndicatorSnapshot,
}

/// Output of the indicator engine: the input rows in the same order, each
/// carrying its snapshot. Row count is invariant across the engine boundary.
#[derive(Debug, Clone, Default)]
pub struct EnrichedSeries {
    bars: Vec<EnrichedBar>,
}

impl EnrichedSeries {
    pub fn new(bars: Vec<EnrichedBar>) -> Self {
        Self { bars }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[EnrichedBar] {
        &self.bars
    }

    /// The most recent bar; this is what classification consumes.
    pub fn latest(&self) -> Option<&EnrichedBar> {
        self.bars.last()
    }
}
