//! One pass over a candle series producing the enriched series consumed by
//! classification and rendering.
//!
//! Every indicator runs with its conventional parameters: EMA 50/200,
//! MACD 12/26/9, RSI 14, Bollinger 20/2, ATR 14. Rows inside an indicator's
//! warm-up window carry `None` for that indicator; this is not an error.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::AnalyzerError;
use crate::types::{EnrichedBar, EnrichedSeries, IndicatorSnapshot, Series};

use super::{Atr, BollingerBands, Ema, Macd, Rsi};

pub const EMA_FAST_PERIOD: usize = 50;
pub const EMA_SLOW_PERIOD: usize = 200;
pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;

/// Computes the full indicator set over `series`.
///
/// The input is read-only; the returned series owns derived copies of the
/// rows, in the original order and count. Fails only on schema violations
/// (a required OHLCV column missing from the source) or an empty series.
pub fn compute(series: &Series) -> Result<EnrichedSeries, AnalyzerError> {
    if let Some(column) = series.missing_required_column() {
        return Err(AnalyzerError::Schema {
            column: column.to_string(),
        });
    }
    if series.is_empty() {
        return Err(AnalyzerError::EmptySeries);
    }

    let mut ema_fast = Ema::new(EMA_FAST_PERIOD);
    let mut ema_slow = Ema::new(EMA_SLOW_PERIOD);
    let mut macd = Macd::default_params();
    let mut rsi = Rsi::new(RSI_PERIOD);
    let mut bollinger = BollingerBands::default_params();
    let mut atr = Atr::new(ATR_PERIOD);

    let mut bars = Vec::with_capacity(series.len());
    for candle in series.candles() {
        let close = candle.close;
        let macd_out = macd.update(close);
        let bb = bollinger.update(close);

        let indicators = IndicatorSnapshot {
            ema_50: ema_fast.update(close),
            ema_200: ema_slow.update(close),
            macd: macd_out.macd,
            macd_signal: macd_out.signal,
            rsi_14: rsi.update(close),
            bb_upper: bb.map(|b| b.upper),
            bb_middle: bb.map(|b| b.middle),
            bb_lower: bb.map(|b| b.lower),
            atr_14: atr.update(candle.high, candle.low, close),
        };

        bars.push(EnrichedBar {
            candle: candle.clone(),
            indicators,
        });
    }

    debug!(rows = bars.len(), "indicator pass complete");
    Ok(EnrichedSeries::new(bars))
}

/// Rounded neutral midpoint of the RSI scale, used by the classifier when the
/// oscillator is still warming up.
pub const NEUTRAL_RSI: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
