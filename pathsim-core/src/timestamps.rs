//! Timestamp sequencing for generated bars.
//!
//! A [`TimestampSequence`] is a pure function of `(start_date, frequency, count)`.
//! It never touches a random source, so timestamps can be verified
//! independently of the price path. The sequence is lazy and restartable:
//! each call to [`TimestampSequence::iter`] starts again from the first bar.
//!
//! Anchoring:
//! - minute / hour / day steps start at `start_date 00:00:00Z`
//! - weekly steps start on the first Sunday on or after `start_date`
//! - monthly steps start on the first month-start on or after `start_date`

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Utc};

use crate::error::SimulationError;
use crate::interval::{ResolvedFrequency, Step};

/// Wire format for bar timestamps. Always UTC with a literal `Z` suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Finite, ordered sequence of `count` bar timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampSequence {
    first: DateTime<Utc>,
    step: Step,
    count: u64,
}

impl TimestampSequence {
    /// Build a sequence, failing if the last timestamp falls off the calendar.
    pub fn new(
        start_date: NaiveDate,
        frequency: &ResolvedFrequency,
        count: u64,
    ) -> Result<Self, SimulationError> {
        let first = anchor(start_date, frequency.step).ok_or_else(|| {
            SimulationError::config(format!("cannot anchor {start_date} to the calendar"))
        })?;
        let seq = Self {
            first,
            step: frequency.step,
            count,
        };
        if count > 0 && seq.get(count - 1).is_none() {
            return Err(SimulationError::config(format!(
                "{count} bars from {start_date} overflow the calendar"
            )));
        }
        Ok(seq)
    }

    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Timestamp of bar `index`, or `None` past the end.
    pub fn get(&self, index: u64) -> Option<DateTime<Utc>> {
        if index >= self.count {
            return None;
        }
        offset(self.first, self.step, index)
    }

    pub fn iter(&self) -> Timestamps<'_> {
        Timestamps {
            seq: self,
            next: 0,
        }
    }
}

impl<'a> IntoIterator for &'a TimestampSequence {
    type Item = DateTime<Utc>;
    type IntoIter = Timestamps<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a [`TimestampSequence`].
#[derive(Debug, Clone)]
pub struct Timestamps<'a> {
    seq: &'a TimestampSequence,
    next: u64,
}

impl Iterator for Timestamps<'_> {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let ts = self.seq.get(self.next)?;
        self.next += 1;
        Some(ts)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.seq.count.saturating_sub(self.next);
        let n = usize::try_from(remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Timestamps<'_> {}

fn anchor(start_date: NaiveDate, step: Step) -> Option<DateTime<Utc>> {
    let date = match step {
        Step::Weeks(_) => {
            let days_ahead = (7 - start_date.weekday().num_days_from_sunday()) % 7;
            start_date.checked_add_signed(Duration::days(i64::from(days_ahead)))?
        }
        Step::Months(_) if start_date.day() != 1 => {
            NaiveDate::from_ymd_opt(start_date.year(), start_date.month(), 1)?
                .checked_add_months(Months::new(1))?
        }
        _ => start_date,
    };
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

fn offset(first: DateTime<Utc>, step: Step, index: u64) -> Option<DateTime<Utc>> {
    let index = i64::try_from(index).ok()?;
    let delta = match step {
        Step::Minutes(n) => Duration::try_minutes(index.checked_mul(i64::from(n))?)?,
        Step::Hours(n) => Duration::try_hours(index.checked_mul(i64::from(n))?)?,
        Step::Days(n) => Duration::try_days(index.checked_mul(i64::from(n))?)?,
        Step::Weeks(n) => Duration::try_weeks(index.checked_mul(i64::from(n))?)?,
        Step::Months(n) => {
            let months = u32::try_from(index.checked_mul(i64::from(n))?).ok()?;
            return first.checked_add_months(Months::new(months));
        }
    };
    first.checked_add_signed(delta)
}
