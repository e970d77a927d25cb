//! Bar — one generated OHLCV record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Synthesized OHLCV bar.
///
/// Price fields are rounded to 2 decimal places; `volume` is an integer and
/// may be negative for very small `volume_mean` (the normal draw is not clamped).
/// `low <= open <= high` holds by construction, but `current_price` (the close)
/// is perturbed independently and can fall outside `[low, high]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub company_name: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub previous_close: f64,
    pub volume: i64,
    #[serde(with = "utc_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Bar {
    /// True when `low <= min(open, close)` and `high >= max(open, close)`.
    pub fn is_ordered(&self) -> bool {
        self.low <= self.open.min(self.current_price)
            && self.high >= self.open.max(self.current_price)
            && self.low <= self.high
    }
}

/// Serde adapter for the `%Y-%m-%dT%H:%M:%SZ` timestamp form.
pub mod utc_timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::timestamps::{format_timestamp, TIMESTAMP_FORMAT};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        let naive =
            NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)?;
        Ok(Utc.from_utc_datetime(&naive))
    }
}
