//! Interval resolution: symbolic interval code → calendar step + sampling rate.
//!
//! Every supported code maps to exactly one [`ResolvedFrequency`]. The
//! bars-per-day rate is kept as an exact rational so that bar counts such as
//! `70 days @ 1wk` come out as whole numbers without float truncation error.
//! Monthly resolution uses 1/30 bars per day, an explicit approximation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Supported bar intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    OneMinute,
    TwoMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    OneDay,
    OneWeek,
    OneMonth,
}

impl Interval {
    pub const ALL: [Interval; 9] = [
        Interval::OneMinute,
        Interval::TwoMinutes,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
        Interval::OneHour,
        Interval::OneDay,
        Interval::OneWeek,
        Interval::OneMonth,
    ];

    /// The wire code for this interval (`"1m"`, `"1wk"`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::TwoMinutes => "2m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::OneHour => "1h",
            Interval::OneDay => "1d",
            Interval::OneWeek => "1wk",
            Interval::OneMonth => "1mo",
        }
    }

    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|i| i.code()).collect()
    }

    /// Parse an interval code. Unknown codes are an error, never a default.
    pub fn parse(code: &str) -> Result<Self, SimulationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.code() == code)
            .ok_or_else(|| SimulationError::InvalidInterval {
                code: code.to_string(),
            })
    }

    pub fn resolve(self) -> ResolvedFrequency {
        let (step, bars_per_day) = match self {
            Interval::OneMinute => (Step::Minutes(1), BarsPerDay::new(1440, 1)),
            Interval::TwoMinutes => (Step::Minutes(2), BarsPerDay::new(720, 1)),
            Interval::FiveMinutes => (Step::Minutes(5), BarsPerDay::new(288, 1)),
            Interval::FifteenMinutes => (Step::Minutes(15), BarsPerDay::new(96, 1)),
            Interval::ThirtyMinutes => (Step::Minutes(30), BarsPerDay::new(48, 1)),
            Interval::OneHour => (Step::Hours(1), BarsPerDay::new(24, 1)),
            Interval::OneDay => (Step::Days(1), BarsPerDay::new(1, 1)),
            Interval::OneWeek => (Step::Weeks(1), BarsPerDay::new(1, 7)),
            Interval::OneMonth => (Step::Months(1), BarsPerDay::new(1, 30)),
        };
        ResolvedFrequency { step, bars_per_day }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Interval {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Interval {
    type Error = SimulationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Interval> for String {
    fn from(value: Interval) -> Self {
        value.code().to_string()
    }
}

/// Calendar step between consecutive bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Minutes(u32),
    Hours(u32),
    Days(u32),
    Weeks(u32),
    /// Calendar months; spacing in days varies with month length.
    Months(u32),
}

/// Exact sampling rate `num / den` bars per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarsPerDay {
    pub num: u64,
    pub den: u64,
}

impl BarsPerDay {
    const fn new(num: u64, den: u64) -> Self {
        Self { num, den }
    }

    pub fn as_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

/// Step unit plus sampling rate for one interval code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFrequency {
    pub step: Step,
    pub bars_per_day: BarsPerDay,
}

impl ResolvedFrequency {
    /// `floor(days × bars_per_day)`, computed in integers.
    pub fn total_intervals(&self, days: u32) -> u64 {
        u64::from(days) * self.bars_per_day.num / self.bars_per_day.den
    }
}

/// Resolve an interval code in one step.
pub fn resolve_interval(code: &str) -> Result<ResolvedFrequency, SimulationError> {
    Interval::parse(code).map(Interval::resolve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_round_trips() {
        for interval in Interval::ALL {
            assert_eq!(Interval::parse(interval.code()).unwrap(), interval);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = resolve_interval("bogus").unwrap_err();
        assert_eq!(
            err,
            SimulationError::InvalidInterval {
                code: "bogus".into()
            }
        );
        // Case matters; no silent normalisation.
        assert!(Interval::parse("1D").is_err());
        assert!(Interval::parse("").is_err());
    }

    #[test]
    fn bars_per_day_rates() {
        let rate = |code: &str| resolve_interval(code).unwrap().bars_per_day.as_f64();
        assert_eq!(rate("1m"), 1440.0);
        assert_eq!(rate("5m"), 288.0);
        assert_eq!(rate("30m"), 48.0);
        assert_eq!(rate("1h"), 24.0);
        assert_eq!(rate("1d"), 1.0);
        assert!((rate("1wk") - 1.0 / 7.0).abs() < 1e-12);
        assert!((rate("1mo") - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn weekly_count_is_exact() {
        let weekly = Interval::OneWeek.resolve();
        assert_eq!(weekly.total_intervals(70), 10);
        assert_eq!(weekly.total_intervals(6), 0);
        assert_eq!(weekly.total_intervals(13), 1);
    }

    #[test]
    fn monthly_and_intraday_counts() {
        assert_eq!(Interval::OneMonth.resolve().total_intervals(365), 12);
        assert_eq!(Interval::OneHour.resolve().total_intervals(2), 48);
        assert_eq!(Interval::FifteenMinutes.resolve().total_intervals(1), 96);
    }

    #[test]
    fn serde_uses_wire_code() {
        let json = serde_json::to_string(&Interval::OneWeek).unwrap();
        assert_eq!(json, "\"1wk\"");
        let back: Interval = serde_json::from_str("\"15m\"").unwrap();
        assert_eq!(back, Interval::FifteenMinutes);
        assert!(serde_json::from_str::<Interval>("\"2h\"").is_err());
    }
}
