use thiserror::Error;

/// Unified error type for the analyzer pipeline.
///
/// Insufficient indicator history is deliberately NOT represented here: it is
/// encoded as `None` cells in the enriched series and handled by the
/// classifier's neutral defaults.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// A required OHLCV column is absent from the input series. Fatal for the
    /// invocation; the caller must fix the upstream schema.
    #[error("required column '{column}' missing from series")]
    Schema { column: String },

    /// The provider returned no rows for the ticker.
    #[error("no data found for ticker '{ticker}'; check the symbol")]
    DataUnavailable { ticker: String },

    /// Network or HTTP-level failure talking to the data provider.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with an in-body error payload.
    #[error("provider error: {0}")]
    Provider(String),

    /// The operation needs at least one row.
    #[error("series is empty: at least one row is required")]
    EmptySeries,
}
