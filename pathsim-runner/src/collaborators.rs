//! Interfaces to the external chart and narrative collaborators.
//!
//! Neither collaborator lives in this workspace. The renderer turns candles
//! into an image; the narrative source turns that image into dated headlines.
//! Hosts plug in real implementations; tests use stubs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pathsim_core::domain::bar::utc_timestamp;
use pathsim_core::Bar;

#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("narrative generation failed: {0}")]
    Narrative(String),

    #[error("malformed narrative response: {0}")]
    MalformedResponse(String),
}

/// The `(timestamp, open, high, low, close, volume)` row a renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(with = "utc_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl From<&Bar> for Candle {
    fn from(bar: &Bar) -> Self {
        Self {
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.current_price,
            volume: bar.volume,
        }
    }
}

pub fn candles(bars: &[Bar]) -> Vec<Candle> {
    bars.iter().map(Candle::from).collect()
}

/// Rendered chart: raw image bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// One generated news record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub date: String,
    pub headline: String,
    pub article: String,
}

/// Renders candles as a raster chart.
pub trait ChartRenderer: Send + Sync {
    fn name(&self) -> &str;

    fn render(&self, symbol: &str, candles: &[Candle]) -> Result<ChartImage, CollaboratorError>;
}

/// Produces date-ordered headlines from a chart image.
pub trait NarrativeSource: Send + Sync {
    fn name(&self) -> &str;

    fn narrate(&self, chart: &ChartImage) -> Result<Vec<NewsItem>, CollaboratorError>;
}

#[derive(Deserialize)]
struct NewsEnvelope {
    response: Vec<NewsItem>,
}

/// Decode the `{"response": [{date, headline, article}, ...]}` body a
/// narrative service returns. Record order is preserved.
pub fn parse_news_envelope(body: &str) -> Result<Vec<NewsItem>, CollaboratorError> {
    serde_json::from_str::<NewsEnvelope>(body)
        .map(|env| env.response)
        .map_err(|e| CollaboratorError::MalformedResponse(e.to_string()))
}
