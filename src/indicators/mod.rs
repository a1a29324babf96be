pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod engine;
pub mod macd;
pub mod rsi;

pub use atr::*;
pub use bollinger::*;
pub use ema::*;
pub use engine::*;
pub use macd::*;
pub use rsi::*;

use rust_decimal::Decimal;

/// Common surface of the streaming indicators. Each instance is fed the
/// series one bar at a time and reports a value only once its warm-up
/// window has filled.
pub trait Indicator {
    fn name(&self) -> &'static str;
    fn is_ready(&self) -> bool;
    fn reset(&mut self);
}

/// Simple moving average of the last `period` values.
pub fn sma(values: &[Decimal], period: usize) -> Option<Decimal> {
    if period == 0 || values.len() < period {
        return None;
    }
    let sum: Decimal = values.iter().rev().take(period).sum();
    Some(sum / Decimal::from(period as u32))
}

/// Population standard deviation of the last `period` values.
pub fn stddev(values: &[Decimal], period: usize) -> Option<Decimal> {
    if period == 0 || values.len() < period {
        return None;
    }
    let mean = sma(values, period)?;
    let variance: Decimal = values
        .iter()
        .rev()
        .take(period)
        .map(|v| {
            let diff = *v - mean;
            diff * diff
        })
        .sum::<Decimal>()
        / Decimal::from(period as u32);
    Some(sqrt_decimal(variance))
}

// Newton's method; Decimal has no built-in sqrt.
fn sqrt_decimal(value: Decimal) -> Decimal {
    if value.is_zero() || value.is_sign_negative() {
        return Decimal::ZERO;
    }

    let mut guess = value / Decimal::from(2);
    let epsilon = Decimal::new(1, 10);

    for _ in 0..50 {
        if guess.is_zero() {
            return Decimal::ZERO;
        }
        let next = (guess + value / guess) / Decimal::from(2);
        if (next - guess).abs() < epsilon {
            return next;
        }
        guess = next;
    }
    guess
}
