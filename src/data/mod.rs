//! Historical market data retrieval.
//!
//! Thin collaborator around the analysis core: fetches a daily OHLCV series
//! from the Yahoo Finance chart endpoint and converts it into a `Series`.
//! Failures are surfaced, never retried here.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DataSettings;
use crate::error::AnalyzerError;
use crate::types::{Candle, Series};

#[cfg(test)]
use mockall::automock;

/// Raw response of the chart endpoint. Quote arrays are all optional: the
/// provider omits whole arrays for some instruments and interleaves nulls
/// for halted sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    pub timestamp: Option<Vec<i64>>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartIndicators {
    pub quote: Vec<Quote>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Quote {
    pub open: Option<Vec<Option<f64>>>,
    pub high: Option<Vec<Option<f64>>>,
    pub low: Option<Vec<Option<f64>>>,
    pub close: Option<Vec<Option<f64>>>,
    pub volume: Option<Vec<Option<f64>>>,
}

/// Source of raw chart data. The seam exists so the series-building logic is
/// testable without the network.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn chart(
        &self,
        ticker: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResponse, AnalyzerError>;
}

#[derive(Debug, Clone)]
pub struct MarketDataClient {
    client: reqwest::Client,
    base_url: String,
}

impl MarketDataClient {
    pub fn new(settings: &DataSettings) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: settings.base_url.clone(),
        }
    }
}

#[async_trait]
impl MarketDataProvider for MarketDataClient {
    async fn chart(
        &self,
        ticker: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResponse, AnalyzerError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval={}",
            self.base_url, ticker, range, interval
        );
        debug!(%url, "fetching chart data");
        let resp = self.client.get(&url).send().await?;
        Ok(resp.json::<ChartResponse>().await?)
    }
}

/// Fetches and assembles the historical series for `ticker`.
pub async fn fetch_series(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    range: &str,
    interval: &str,
) -> Result<Series, AnalyzerError> {
    let response = provider.chart(ticker, range, interval).await?;
    series_from_chart(response, ticker)
}

/// Converts a chart response into a `Series`.
///
/// Rows with a null in any OHLC array are dropped. Which quote arrays the
/// provider delivered is recorded on the series; a missing required array is
/// NOT an error here — the indicator engine owns that schema decision.
pub fn series_from_chart(response: ChartResponse, ticker: &str) -> Result<Series, AnalyzerError> {
    if let Some(err) = response.chart.error {
        return Err(AnalyzerError::Provider(format!(
            "{}: {}",
            err.code, err.description
        )));
    }

    let result = response
        .chart
        .result
        .and_then(|mut results| if results.is_empty() { None } else { Some(results.remove(0)) })
        .ok_or_else(|| AnalyzerError::DataUnavailable {
            ticker: ticker.to_string(),
        })?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_default();

    let mut columns = Vec::new();
    for (name, present) in [
        ("open", quote.open.is_some()),
        ("high", quote.high.is_some()),
        ("low", quote.low.is_some()),
        ("close", quote.close.is_some()),
        ("volume", quote.volume.is_some()),
    ] {
        if present {
            columns.push(name.to_string());
        }
    }

    let at = |arr: &Option<Vec<Option<f64>>>, i: usize| -> Option<f64> {
        arr.as_ref().and_then(|v| v.get(i).copied().flatten())
    };

    let mut candles = Vec::with_capacity(timestamps.len());
    let mut dropped = 0usize;
    for (i, ts) in timestamps.iter().enumerate() {
        let row = (
            at(&quote.open, i).and_then(Decimal::from_f64),
            at(&quote.high, i).and_then(Decimal::from_f64),
            at(&quote.low, i).and_then(Decimal::from_f64),
            at(&quote.close, i).and_then(Decimal::from_f64),
        );
        let (Some(open), Some(high), Some(low), Some(close)) = row else {
            dropped += 1;
            continue;
        };
        let Some(timestamp) = Utc.timestamp_opt(*ts, 0).single() else {
            dropped += 1;
            continue;
        };
        let volume = at(&quote.volume, i)
            .and_then(Decimal::from_f64)
            .unwrap_or(Decimal::ZERO);

        candles.push(Candle {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        });
    }
    if dropped > 0 {
        warn!(dropped, ticker, "dropped rows with null OHLC values");
    }

    let series = Series::with_columns(candles, columns);
    // An empty but schema-complete answer means the provider had nothing for
    // this symbol. A schema-incomplete answer is forwarded so the engine can
    // name the missing column.
    if series.is_empty() && series.missing_required_column().is_none() {
        return Err(AnalyzerError::DataUnavailable {
            ticker: ticker.to_string(),
        });
    }
    Ok(series)
}
