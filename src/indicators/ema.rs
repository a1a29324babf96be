#![allow(dead_code)]
use rust_decimal::Decimal;

use super::Indicator;

/// Exponential moving average with smoothing factor `2 / (period + 1)`.
///
/// The first reported value is the simple average of the first `period`
/// inputs; every later value follows the standard recursion
/// `ema = (price - prev) * k + prev`. Until `period` inputs have been seen,
/// `update` returns `None`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: Decimal,
    seed_sum: Decimal,
    seen: usize,
    value: Option<Decimal>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            multiplier: Decimal::from(2) / Decimal::from(period as u32 + 1),
            seed_sum: Decimal::ZERO,
            seen: 0,
            value: None,
        }
    }

    pub fn update(&mut self, price: Decimal) -> Option<Decimal> {
        self.seen += 1;

        match self.value {
            Some(prev) => {
                self.value = Some((price - prev) * self.multiplier + prev);
            }
            None => {
                self.seed_sum += price;
                if self.seen == self.period {
                    self.value = Some(self.seed_sum / Decimal::from(self.period as u32));
                }
            }
        }

        self.value
    }

    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Ema {
    fn name(&self) -> &'static str {
        "EMA"
    }

    fn is_ready(&self) -> bool {
        self.value.is_some()
    }

    fn reset(&mut self) {
        self.seed_sum = Decimal::ZERO;
        self.seen = 0;
        self.value = None;
    }
}
