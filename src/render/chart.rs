//! ASCII price chart.
//!
//! Plots the close series with EMA 50/200 overlays on a character grid. The
//! pack offers no terminal plotting crate, so the grid is drawn by hand.

use rust_decimal::prelude::ToPrimitive;

use crate::types::EnrichedSeries;

const CHART_WIDTH: usize = 100;
const CHART_HEIGHT: usize = 18;

const CLOSE_MARK: char = '*';
const EMA_FAST_MARK: char = '+';
const EMA_SLOW_MARK: char = 'x';

/// Renders the series into a printable chart string. Returns a short notice
/// when the series is empty.
pub fn render_chart(series: &EnrichedSeries, ticker: &str) -> String {
    if series.is_empty() {
        return format!("No data to chart for {}", ticker);
    }

    let bars = series.bars();
    let width = CHART_WIDTH.min(bars.len());
    // Evenly sampled column -> bar index mapping (rightmost column is the
    // latest bar).
    let pick = |col: usize| -> usize {
        if width == 1 {
            bars.len() - 1
        } else {
            col * (bars.len() - 1) / (width - 1)
        }
    };

    let mut points: Vec<(Option<f64>, Option<f64>, Option<f64>)> = Vec::with_capacity(width);
    for col in 0..width {
        let bar = &bars[pick(col)];
        points.push((
            bar.candle.close.to_f64(),
            bar.indicators.ema_50.and_then(|v| v.to_f64()),
            bar.indicators.ema_200.and_then(|v| v.to_f64()),
        ));
    }

    let plotted: Vec<f64> = points
        .iter()
        .flat_map(|(c, f, s)| [c, f, s])
        .filter_map(|v| *v)
        .collect();
    let min = plotted.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = plotted.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return format!("No data to chart for {}", ticker);
    }
    let span = if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        max - min
    };

    let row_of = |value: f64| -> usize {
        let norm = (value - min) / span;
        let row = ((1.0 - norm) * (CHART_HEIGHT - 1) as f64).round() as isize;
        row.clamp(0, CHART_HEIGHT as isize - 1) as usize
    };

    let mut grid = vec![vec![' '; width]; CHART_HEIGHT];
    // Overlays first so the close marker wins contested cells.
    for (col, (close, ema_fast, ema_slow)) in points.iter().enumerate() {
        if let Some(v) = ema_slow {
            grid[row_of(*v)][col] = EMA_SLOW_MARK;
        }
        if let Some(v) = ema_fast {
            grid[row_of(*v)][col] = EMA_FAST_MARK;
        }
        if let Some(v) = close {
            grid[row_of(*v)][col] = CLOSE_MARK;
        }
    }

    let first_date = bars.first().map(|b| b.candle.timestamp.format("%Y-%m-%d").to_string());
    let last_date = bars.last().map(|b| b.candle.timestamp.format("%Y-%m-%d").to_string());

    let mut out = String::new();
    out.push_str(&format!("{} price history ({} bars)\n", ticker, bars.len()));
    for (row, cells) in grid.iter().enumerate() {
        let label = if row == 0 {
            format!("{:>10.2} ", max)
        } else if row == CHART_HEIGHT - 1 {
            format!("{:>10.2} ", min)
        } else {
            " ".repeat(11)
        };
        out.push_str(&label);
        out.push('|');
        out.push_str(&cells.iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&" ".repeat(11));
    out.push('+');
    out.push_str(&"-".repeat(width));
    out.push('\n');
    if let (Some(first), Some(last)) = (first_date, last_date) {
        let gap = width.saturating_sub(first.len()) + 1;
        out.push_str(&format!("{:>11}{}{:>gap$}\n", "", first, last, gap = gap));
    }
    out.push_str(&format!(
        "            {} close   {} EMA 50   {} EMA 200\n",
        CLOSE_MARK, EMA_FAST_MARK, EMA_SLOW_MARK
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::indicators;
    use crate::types::{Candle, Series};

    fn series(len: usize) -> EnrichedSeries {
        let start = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
        let candles = (0..len)
            .map(|i| {
                // Steady uptrend with a wiggle: keeps close, EMA 50 and
                // EMA 200 on visibly different grid rows.
                let base = Decimal::from(100) + Decimal::new(i as i64, 1) * dec!(5)
                    + Decimal::from((i % 5) as i64);
                Candle {
                    timestamp: start + Duration::days(i as i64),
                    open: base,
                    high: base + dec!(1),
                    low: base - dec!(1),
                    close: base,
                    volume: dec!(100),
                }
            })
            .collect();
        indicators::compute(&Series::from_candles(candles)).unwrap()
    }

    #[test]
    fn test_chart_dimensions() {
        let chart = render_chart(&series(250), "AAPL");
        let lines: Vec<&str> = chart.lines().collect();
        // Title + grid + axis + dates + legend.
        assert_eq!(lines.len(), CHART_HEIGHT + 4);
        assert!(lines[0].contains("AAPL"));
        assert!(chart.contains(CLOSE_MARK));
        assert!(chart.contains(EMA_FAST_MARK));
        assert!(chart.contains(EMA_SLOW_MARK));
    }

    #[test]
    fn test_chart_short_series() {
        let chart = render_chart(&series(3), "TSLA");
        assert!(chart.contains("TSLA"));
        assert!(chart.contains(CLOSE_MARK));
    }

    #[test]
    fn test_chart_flat_series_no_panic() {
        let start = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
        let candles = (0..30)
            .map(|i| Candle {
                timestamp: start + Duration::days(i as i64),
                open: dec!(50),
                high: dec!(50),
                low: dec!(50),
                close: dec!(50),
                volume: dec!(1),
            })
            .collect();
        let enriched = indicators::compute(&Series::from_candles(candles)).unwrap();
        let chart = render_chart(&enriched, "FLAT");
        assert!(chart.contains(CLOSE_MARK));
    }

    #[test]
    fn test_chart_empty_series() {
        let chart = render_chart(&EnrichedSeries::default(), "NONE");
        assert!(chart.contains("No data"));
    }
}
