#![allow(dead_code)]
use rust_decimal::Decimal;

use super::Indicator;

/// Relative strength index over Wilder-smoothed average gains and losses.
///
/// The first value appears once `period` price changes (i.e. `period + 1`
/// prices) have been seen: the initial averages are plain means of the first
/// `period` gains/losses, after which Wilder's smoothing
/// `avg = (avg * (n - 1) + x) / n` takes over. Output is always in [0, 100];
/// a zero average loss reports 100.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev_price: Option<Decimal>,
    gains: Vec<Decimal>,
    losses: Vec<Decimal>,
    avg_gain: Option<Decimal>,
    avg_loss: Option<Decimal>,
    value: Option<Decimal>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prev_price: None,
            gains: Vec::with_capacity(period),
            losses: Vec::with_capacity(period),
            avg_gain: None,
            avg_loss: None,
            value: None,
        }
    }

    pub fn update(&mut self, price: Decimal) -> Option<Decimal> {
        let Some(prev) = self.prev_price.replace(price) else {
            return None;
        };

        let change = price - prev;
        let gain = change.max(Decimal::ZERO);
        let loss = (-change).max(Decimal::ZERO);

        match (self.avg_gain, self.avg_loss) {
            (Some(avg_gain), Some(avg_loss)) => {
                let n = Decimal::from(self.period as u32);
                self.avg_gain = Some((avg_gain * (n - Decimal::ONE) + gain) / n);
                self.avg_loss = Some((avg_loss * (n - Decimal::ONE) + loss) / n);
            }
            _ => {
                self.gains.push(gain);
                self.losses.push(loss);
                if self.gains.len() == self.period {
                    let n = Decimal::from(self.period as u32);
                    self.avg_gain = Some(self.gains.iter().sum::<Decimal>() / n);
                    self.avg_loss = Some(self.losses.iter().sum::<Decimal>() / n);
                }
            }
        }

        self.value = self.current_rsi();
        self.value
    }

    fn current_rsi(&self) -> Option<Decimal> {
        let (avg_gain, avg_loss) = (self.avg_gain?, self.avg_loss?);
        if avg_loss.is_zero() {
            return Some(Decimal::from(100));
        }
        let rs = avg_gain / avg_loss;
        Some(Decimal::from(100) - Decimal::from(100) / (Decimal::ONE + rs))
    }

    pub fn value(&self) -> Option<Decimal> {
        self.value
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &'static str {
        "RSI"
    }

    fn is_ready(&self) -> bool {
        self.value.is_some()
    }

    fn reset(&mut self) {
        self.prev_price = None;
        self.gains.clear();
        self.losses.clear();
        self.avg_gain = None;
        self.avg_loss = None;
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_warm_up_length() {
        let mut rsi = Rsi::new(14);
        // 14 changes require 15 prices; the 15th produces the first value.
        for i in 0..14 {
            assert_eq!(rsi.update(Decimal::from(100 + i)), None, "bar {}", i);
        }
        assert!(rsi.update(dec!(114)).is_some());
    }

    #[test]
    fn test_all_gains_is_100() {
        let mut rsi = Rsi::new(14);
        let mut value = None;
        for i in 0..30 {
            value = rsi.update(Decimal::from(100 + i));
        }
        assert_eq!(value, Some(dec!(100)));
    }

    #[test]
    fn test_all_losses_is_0() {
        let mut rsi = Rsi::new(14);
        let mut value = None;
        for i in 0..30 {
            value = rsi.update(Decimal::from(500 - i));
        }
        assert_eq!(value, Some(Decimal::ZERO));
    }

    #[test]
    fn test_bounded_on_mixed_series() {
        let mut rsi = Rsi::new(14);
        // Alternating up/down walk with drift.
        let mut price = dec!(100);
        for i in 0..200 {
            price += if i % 3 == 0 { dec!(-1.5) } else { dec!(1) };
            if let Some(v) = rsi.update(price) {
                assert!(v >= Decimal::ZERO && v <= dec!(100), "out of range: {}", v);
            }
        }
        assert!(rsi.is_ready());
    }

    #[test]
    fn test_flat_series_is_100() {
        // No losses at all: average loss stays zero.
        let mut rsi = Rsi::new(5);
        let mut value = None;
        for _ in 0..10 {
            value = rsi.update(dec!(50));
        }
        assert_eq!(value, Some(dec!(100)));
    }
}
