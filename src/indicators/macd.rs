#![allow(dead_code)]
use rust_decimal::Decimal;

use super::{Ema, Indicator};

/// MACD line and signal line per update.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacdOutput {
    pub macd: Option<Decimal>,
    pub signal: Option<Decimal>,
}

/// Moving average convergence/divergence: `EMA(fast) - EMA(slow)` of the
/// input, with an `EMA(signal)` of the MACD line itself.
///
/// The MACD line is defined as soon as the slow EMA is (bar `slow - 1`);
/// the signal line needs a further `signal - 1` bars on top of that.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
    last: MacdOutput,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast: Ema::new(fast_period),
            slow: Ema::new(slow_period),
            signal: Ema::new(signal_period),
            last: MacdOutput::default(),
        }
    }

    /// The conventional 12/26/9 parameterization.
    pub fn default_params() -> Self {
        Self::new(12, 26, 9)
    }

    pub fn update(&mut self, price: Decimal) -> MacdOutput {
        let fast = self.fast.update(price);
        let slow = self.slow.update(price);

        self.last = match (fast, slow) {
            (Some(f), Some(s)) => {
                let macd_line = f - s;
                MacdOutput {
                    macd: Some(macd_line),
                    signal: self.signal.update(macd_line),
                }
            }
            _ => MacdOutput::default(),
        };
        self.last
    }

    pub fn macd_line(&self) -> Option<Decimal> {
        self.last.macd
    }

    pub fn signal_line(&self) -> Option<Decimal> {
        self.last.signal
    }
}

impl Indicator for Macd {
    fn name(&self) -> &'static str {
        "MACD"
    }

    fn is_ready(&self) -> bool {
        self.last.signal.is_some()
    }

    fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
        self.signal.reset();
        self.last = MacdOutput::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_warm_up_boundaries() {
        let mut macd = Macd::default_params();
        let mut line_defined_at = None;
        let mut signal_defined_at = None;
        for i in 0..60 {
            let out = macd.update(Decimal::from(100 + i % 7));
            if out.macd.is_some() && line_defined_at.is_none() {
                line_defined_at = Some(i);
            }
            if out.signal.is_some() && signal_defined_at.is_none() {
                signal_defined_at = Some(i);
            }
        }
        // Slow EMA(26) fills at bar index 25; signal EMA(9) of the MACD line
        // fills 8 bars later.
        assert_eq!(line_defined_at, Some(25));
        assert_eq!(signal_defined_at, Some(33));
    }

    #[test]
    fn test_constant_series_is_zero() {
        let mut macd = Macd::default_params();
        let mut out = MacdOutput::default();
        for _ in 0..60 {
            out = macd.update(dec!(250));
        }
        assert_eq!(out.macd, Some(Decimal::ZERO));
        assert_eq!(out.signal, Some(Decimal::ZERO));
    }

    #[test]
    fn test_rising_series_positive_macd() {
        let mut macd = Macd::default_params();
        let mut out = MacdOutput::default();
        for i in 0..80 {
            out = macd.update(Decimal::from(100 + i));
        }
        // Fast EMA tracks a steady rise more closely than the slow EMA.
        assert!(out.macd.unwrap() > Decimal::ZERO);
        assert!(out.signal.unwrap() > Decimal::ZERO);
    }
}
