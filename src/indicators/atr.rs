#![allow(dead_code)]
use rust_decimal::Decimal;

use super::Indicator;

/// Average true range with Wilder's smoothing.
///
/// The first bar carries no true range (there is no previous close to measure
/// gaps against), so with period `n` the first value appears at bar `n`. The
/// initial value is the mean of the first `n` true ranges; afterwards
/// `atr = (prev * (n - 1) + tr) / n`. Output is never negative.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    prev_close: Option<Decimal>,
    warmup: Vec<Decimal>,
    value: Option<Decimal>,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prev_close: None,
            warmup: Vec::with_capacity(period),
            value: None,
        }
    }

    pub fn update(&mut self, high: Decimal, low: Decimal, close: Decimal) -> Option<Decimal> {
        let prev_close = self.prev_close.replace(close);
        let Some(prev) = prev_close else {
            return None;
        };

        let tr = (high - low)
            .max((high - prev).abs())
            .max((low - prev).abs());

        match self.value {
            Some(prev_atr) => {
                let n = Decimal::from(self.period as u32);
                self.value = Some((prev_atr * (n - Decimal::ONE) + tr) / n);
            }
            None => {
                self.warmup.push(tr);
                if self.warmup.len() == self.period {
                    let n = Decimal::from(self.period as u32);
                    self.value = Some(self.warmup.iter().sum::<Decimal>() / n);
                }
            }
        }

        self.value
    }

    pub fn value(&self) -> Option<Decimal> {
        self.value
    }
}

impl Indicator for Atr {
    fn name(&self) -> &'static str {
        "ATR"
    }

    fn is_ready(&self) -> bool {
        self.value.is_some()
    }

    fn reset(&mut self) {
        self.prev_close = None;
        self.warmup.clear();
        self.value = None;
    }
}
