//! Regime and signal classification over the latest enriched bar.
//!
//! The signal logic is a fixed rule table per regime, evaluated top to
//! bottom; the first matching row wins and the fallback is a neutral Hold.
//! Keeping the table as data (rather than nested branches) keeps the rule
//! set auditable and lets tests cover each row directly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::AnalyzerError;
use crate::indicators::NEUTRAL_RSI;
use crate::types::{AnalysisResult, EnrichedBar, EnrichedSeries, MarketRegime, Signal};

pub const RSI_OVERSOLD: Decimal = dec!(30);
pub const RSI_OVERBOUGHT: Decimal = dec!(70);

const DEFAULT_SIGNAL: Signal = Signal::Hold;
const DEFAULT_CONFIDENCE: Decimal = dec!(0.5);

/// Indicator condition a rule fires on.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    RsiBelow(Decimal),
    RsiAbove(Decimal),
    MacdAboveSignal,
    MacdBelowSignal,
}

impl Trigger {
    fn fires(&self, rsi: Decimal, macd: Decimal, macd_signal: Decimal) -> bool {
        match self {
            Trigger::RsiBelow(threshold) => rsi < *threshold,
            Trigger::RsiAbove(threshold) => rsi > *threshold,
            Trigger::MacdAboveSignal => macd > macd_signal,
            Trigger::MacdBelowSignal => macd < macd_signal,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    trigger: Trigger,
    signal: Signal,
    confidence: Decimal,
}

const fn rule(trigger: Trigger, signal: Signal, confidence: Decimal) -> Rule {
    Rule {
        trigger,
        signal,
        confidence,
    }
}

// Oversold pullbacks in an uptrend are the strongest entries; momentum
// confirmation ranks below them, overbought conditions only warrant caution.
const BULLISH_RULES: &[Rule] = &[
    rule(Trigger::RsiBelow(RSI_OVERSOLD), Signal::Buy, dec!(0.8)),
    rule(Trigger::RsiAbove(RSI_OVERBOUGHT), Signal::Caution, dec!(0.6)),
    rule(Trigger::MacdAboveSignal, Signal::Buy, dec!(0.7)),
];

const BEARISH_RULES: &[Rule] = &[
    rule(Trigger::RsiAbove(RSI_OVERBOUGHT), Signal::Sell, dec!(0.8)),
    rule(Trigger::RsiBelow(RSI_OVERSOLD), Signal::Caution, dec!(0.6)),
    rule(Trigger::MacdBelowSignal, Signal::Sell, dec!(0.7)),
];

// Range-bound: fade the extremes only.
const SIDEWAYS_RULES: &[Rule] = &[
    rule(Trigger::RsiBelow(RSI_OVERSOLD), Signal::Buy, dec!(0.6)),
    rule(Trigger::RsiAbove(RSI_OVERBOUGHT), Signal::Sell, dec!(0.6)),
];

fn rules_for(regime: MarketRegime) -> &'static [Rule] {
    match regime {
        MarketRegime::Bullish => BULLISH_RULES,
        MarketRegime::Bearish => BEARISH_RULES,
        MarketRegime::Sideways => SIDEWAYS_RULES,
    }
}

/// Classifies the given bar into a regime and signal.
///
/// Pure and deterministic: identical input rows always produce identical
/// results. EMAs still inside their warm-up window fail both trend orderings
/// structurally (never compared as numbers), which lands in Sideways.
/// Undefined oscillator inputs are substituted with neutral defaults
/// (RSI 50, MACD and signal line 0) before the rule table runs.
pub fn classify(row: &EnrichedBar, ticker: &str) -> AnalysisResult {
    let close = row.candle.close;
    let snap = &row.indicators;

    let regime = match (snap.ema_50, snap.ema_200) {
        (Some(e50), Some(e200)) if close > e50 && e50 > e200 => MarketRegime::Bullish,
        (Some(e50), Some(e200)) if close < e50 && e50 < e200 => MarketRegime::Bearish,
        _ => MarketRegime::Sideways,
    };

    let rsi = snap.rsi_14.unwrap_or(NEUTRAL_RSI);
    let macd = snap.macd.unwrap_or(Decimal::ZERO);
    let macd_signal = snap.macd_signal.unwrap_or(Decimal::ZERO);

    let (signal, confidence) = rules_for(regime)
        .iter()
        .find(|r| r.trigger.fires(rsi, macd, macd_signal))
        .map(|r| (r.signal, r.confidence))
        .unwrap_or((DEFAULT_SIGNAL, DEFAULT_CONFIDENCE));

    AnalysisResult {
        ticker: ticker.to_string(),
        current_price: close,
        regime,
        signal,
        confidence,
        rsi,
        macd,
        macd_signal,
        ema_50: snap.ema_50.unwrap_or(Decimal::ZERO),
        ema_200: snap.ema_200.unwrap_or(Decimal::ZERO),
    }
}

/// Classifies the most recent bar of an enriched series.
pub fn analyze_market(
    series: &EnrichedSeries,
    ticker: &str,
) -> Result<AnalysisResult, AnalyzerError> {
    let latest = series.latest().ok_or(AnalyzerError::EmptySeries)?;
    Ok(classify(latest, ticker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::types::{Candle, IndicatorSnapshot};

    fn bar(close: Decimal, indicators: IndicatorSnapshot) -> EnrichedBar {
        EnrichedBar {
            candle: Candle {
                timestamp: Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: dec!(1),
            },
            indicators,
        }
    }

    fn snapshot(
        ema_50: Decimal,
        ema_200: Decimal,
        rsi: Decimal,
        macd: Decimal,
        macd_signal: Decimal,
    ) -> IndicatorSnapshot {
        IndicatorSnapshot {
            ema_50: Some(ema_50),
            ema_200: Some(ema_200),
            macd: Some(macd),
            macd_signal: Some(macd_signal),
            rsi_14: Some(rsi),
            ..IndicatorSnapshot::default()
        }
    }

    #[test]
    fn test_bullish_oversold_buy() {
        let row = bar(
            dec!(150),
            snapshot(dec!(140), dec!(130), dec!(25), dec!(1.0), dec!(0.5)),
        );
        let result = classify(&row, "TEST");
        assert_eq!(result.regime, MarketRegime::Bullish);
        assert_eq!(result.signal, Signal::Buy);
        assert_eq!(result.confidence, dec!(0.8));
        assert_eq!(result.current_price, dec!(150));
    }

    #[test]
    fn test_bullish_overbought_caution() {
        let row = bar(
            dec!(150),
            snapshot(dec!(140), dec!(130), dec!(75), dec!(1.0), dec!(0.5)),
        );
        let result = classify(&row, "TEST");
        assert_eq!(result.regime, MarketRegime::Bullish);
        assert_eq!(result.signal, Signal::Caution);
        assert_eq!(result.confidence, dec!(0.6));
    }

    #[test]
    fn test_bullish_momentum_buy() {
        let row = bar(
            dec!(150),
            snapshot(dec!(140), dec!(130), dec!(55), dec!(1.0), dec!(0.5)),
        );
        let result = classify(&row, "TEST");
        assert_eq!(result.signal, Signal::Buy);
        assert_eq!(result.confidence, dec!(0.7));
    }

    #[test]
    fn test_bullish_fallback_hold() {
        let row = bar(
            dec!(150),
            snapshot(dec!(140), dec!(130), dec!(55), dec!(0.5), dec!(1.0)),
        );
        let result = classify(&row, "TEST");
        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.confidence, dec!(0.5));
    }

    #[test]
    fn test_bearish_overbought_sell() {
        let row = bar(
            dec!(100),
            snapshot(dec!(110), dec!(120), dec!(75), dec!(-1.0), dec!(-0.5)),
        );
        let result = classify(&row, "TEST");
        assert_eq!(result.regime, MarketRegime::Bearish);
        assert_eq!(result.signal, Signal::Sell);
        assert_eq!(result.confidence, dec!(0.8));
    }

    #[test]
    fn test_bearish_oversold_caution() {
        let row = bar(
            dec!(100),
            snapshot(dec!(110), dec!(120), dec!(25), dec!(0.5), dec!(0.0)),
        );
        let result = classify(&row, "TEST");
        assert_eq!(result.signal, Signal::Caution);
        assert_eq!(result.confidence, dec!(0.6));
    }

    #[test]
    fn test_bearish_momentum_sell() {
        let row = bar(
            dec!(100),
            snapshot(dec!(110), dec!(120), dec!(45), dec!(-1.0), dec!(-0.5)),
        );
        let result = classify(&row, "TEST");
        assert_eq!(result.signal, Signal::Sell);
        assert_eq!(result.confidence, dec!(0.7));
    }

    #[test]
    fn test_bearish_fallback_hold() {
        let row = bar(
            dec!(100),
            snapshot(dec!(110), dec!(120), dec!(45), dec!(-0.5), dec!(-1.0)),
        );
        let result = classify(&row, "TEST");
        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.confidence, dec!(0.5));
    }

    #[test]
    fn test_sideways_hold() {
        // Mixed EMA ordering: price below the fast average but above the slow.
        let row = bar(
            dec!(115),
            snapshot(dec!(120), dec!(110), dec!(50), dec!(0), dec!(0)),
        );
        let result = classify(&row, "TEST");
        assert_eq!(result.regime, MarketRegime::Sideways);
        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.confidence, dec!(0.5));
    }

    #[test]
    fn test_sideways_oversold_buy() {
        let row = bar(
            dec!(115),
            snapshot(dec!(120), dec!(110), dec!(25), dec!(0), dec!(0)),
        );
        let result = classify(&row, "TEST");
        assert_eq!(result.signal, Signal::Buy);
        assert_eq!(result.confidence, dec!(0.6));
    }

    #[test]
    fn test_sideways_overbought_sell() {
        let row = bar(
            dec!(115),
            snapshot(dec!(120), dec!(110), dec!(75), dec!(0), dec!(0)),
        );
        let result = classify(&row, "TEST");
        assert_eq!(result.signal, Signal::Sell);
        assert_eq!(result.confidence, dec!(0.6));
    }

    #[test]
    fn test_undefined_indicators_use_neutral_defaults() {
        let row = bar(dec!(150), IndicatorSnapshot::default());
        let result = classify(&row, "TEST");
        // Undefined EMAs fail both orderings; neutral RSI/MACD fire no rule.
        assert_eq!(result.regime, MarketRegime::Sideways);
        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.confidence, dec!(0.5));
        assert_eq!(result.rsi, dec!(50));
        assert_eq!(result.macd, Decimal::ZERO);
        assert_eq!(result.ema_50, Decimal::ZERO);
        assert_eq!(result.ema_200, Decimal::ZERO);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let row = bar(
            dec!(150),
            snapshot(dec!(140), dec!(130), dec!(25), dec!(1.0), dec!(0.5)),
        );
        let a = classify(&row, "TEST");
        let b = classify(&row, "TEST");
        assert_eq!(a.signal, b.signal);
        assert_eq!(a.regime, b.regime);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.current_price, b.current_price);
        assert_eq!(a.rsi, b.rsi);
    }

    #[test]
    fn test_short_series_classifies_with_defaults() {
        // Five bars leave every indicator inside its warm-up window; the
        // pipeline still produces a neutral classification.
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        let candles = (0..5)
            .map(|i| Candle {
                timestamp: start + chrono::Duration::days(i),
                open: dec!(100),
                high: dec!(101),
                low: dec!(99),
                close: dec!(100) + Decimal::from(i),
                volume: dec!(1000),
            })
            .collect();
        let enriched = crate::indicators::compute(&crate::types::Series::from_candles(candles))
            .unwrap();

        let result = analyze_market(&enriched, "TEST").unwrap();
        assert_eq!(result.regime, MarketRegime::Sideways);
        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.confidence, dec!(0.5));
        assert_eq!(result.current_price, dec!(104));
        assert_eq!(result.rsi, dec!(50));
    }

    #[test]
    fn test_analyze_market_empty_series() {
        let series = EnrichedSeries::default();
        assert!(matches!(
            analyze_market(&series, "TEST"),
            Err(AnalyzerError::EmptySeries)
        ));
    }
}
