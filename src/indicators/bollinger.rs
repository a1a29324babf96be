#![allow(dead_code)]
use rust_decimal::Decimal;

use super::{sma, stddev, Indicator};

#[derive(Debug, Clone, Copy)]
pub struct BollingerOutput {
    pub upper: Decimal,
    pub middle: Decimal,
    pub lower: Decimal,
}

/// Bollinger bands: rolling SMA of the input plus/minus a multiple of the
/// rolling standard deviation over the same window.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    multiplier: Decimal,
    window: Vec<Decimal>,
    last: Option<BollingerOutput>,
}

impl BollingerBands {
    pub fn new(period: usize, multiplier: Decimal) -> Self {
        Self {
            period,
            multiplier,
            window: Vec::with_capacity(period + 1),
            last: None,
        }
    }

    /// The conventional 20-period, 2-sigma parameterization.
    pub fn default_params() -> Self {
        Self::new(20, Decimal::from(2))
    }

    pub fn update(&mut self, price: Decimal) -> Option<BollingerOutput> {
        self.window.push(price);
        if self.window.len() > self.period {
            self.window.remove(0);
        }
        if self.window.len() < self.period {
            return None;
        }

        let middle = sma(&self.window, self.period)?;
        let deviation = stddev(&self.window, self.period)? * self.multiplier;

        let out = BollingerOutput {
            upper: middle + deviation,
            middle,
            lower: middle - deviation,
        };
        self.last = Some(out);
        Some(out)
    }

    pub fn value(&self) -> Option<BollingerOutput> {
        self.last
    }
}

impl Indicator for BollingerBands {
    fn name(&self) -> &'static str {
        "BollingerBands"
    }

    fn is_ready(&self) -> bool {
        self.last.is_some()
    }

    fn reset(&mut self) {
        self.window.clear();
        self.last = None;
    }
}
