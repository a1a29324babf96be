//! AI-generated market narrative.
//!
//! Calls the Gemini `generateContent` endpoint with the latest analysis
//! result. Purely decorative: every failure mode (no key, transport error,
//! empty answer) degrades to an explanatory string so the analysis pipeline
//! never depends on this collaborator.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::config::InsightSettings;
use crate::types::AnalysisResult;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Clone)]
pub struct InsightClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl InsightClient {
    pub fn new(settings: &InsightSettings, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: settings.base_url.clone(),
            model: settings.model.clone(),
            api_key,
        }
    }

    /// Reads the API key from the environment; `None` disables summaries.
    pub fn from_env(settings: &InsightSettings) -> Self {
        let api_key = std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            warn!("{} not set; AI summaries disabled", API_KEY_VAR);
        }
        Self::new(settings, api_key)
    }

    /// Produces a short natural-language summary for the analysis, or an
    /// explanatory fallback string. Never fails.
    pub async fn summarize(&self, result: &AnalysisResult) -> String {
        let Some(api_key) = &self.api_key else {
            return format!("AI summary unavailable ({} not set).", API_KEY_VAR);
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(result),
                }],
            }],
        };

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(resp) => resp,
            Err(e) => return format!("Error generating summary: {}", e),
        };
        let parsed: GenerateResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => return format!("Error generating summary: {}", e),
        };

        parsed
            .candidates
            .and_then(|mut c| if c.is_empty() { None } else { c.remove(0).content })
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "No summary generated.".to_string())
    }
}

fn build_prompt(result: &AnalysisResult) -> String {
    format!(
        "You are an expert financial analyst. Provide a concise, 2-sentence market \
         summary for {ticker} based on the following technical data:\n\n\
         - Price: ${price:.2}\n\
         - Trend Regime: {regime}\n\
         - Signal: {signal} (Confidence: {confidence:.0}%)\n\
         - RSI (14): {rsi:.2}\n\
         - MACD: {macd:.4} (Signal: {macd_signal:.4})\n\
         - EMA 50: {ema_50:.2}\n\
         - EMA 200: {ema_200:.2}\n\n\
         Explain *why* the signal is {signal} citing the most important indicator. \
         Do not use financial advice disclaimers. Keep it professional and direct.",
        ticker = result.ticker,
        price = result.current_price,
        regime = result.regime,
        signal = result.signal,
        confidence = result.confidence * rust_decimal::Decimal::from(100),
        rsi = result.rsi,
        macd = result.macd,
        macd_signal = result.macd_signal,
        ema_50 = result.ema_50,
        ema_200 = result.ema_200,
    )
}
