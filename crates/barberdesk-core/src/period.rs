//! # Period Module
//!
//! Resolves named and explicit report periods into concrete half-open
//! intervals.
//!
//! ## Half-Open Ranges
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [start, end)  start INCLUDED, end EXCLUDED                             │
//! │                                                                         │
//! │  March                         April                                   │
//! │  [03-01 00:00 ─────────────── 04-01 00:00)                             │
//! │                               [04-01 00:00 ──────────── 05-01 00:00)   │
//! │                                ▲                                        │
//! │                                └── an appointment at exactly 00:00     │
//! │                                    on April 1st lands in April only    │
//! │                                                                         │
//! │  Adjacent ranges never overlap and never leave a gap.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Civil Calendar
//! Boundaries are local midnights in the time zone carried by `now`, then
//! converted to UTC for the Data Store. `now` is always an argument; nothing
//! here reads a clock.
//!
//! ## Week Convention
//! Weeks follow ISO 8601: they start on **Monday** at 00:00 local time.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Granularity used when stepping over a DST gap at local midnight.
const DST_GAP_STEP_MINUTES: i64 = 15;

// =============================================================================
// Date Range
// =============================================================================

/// A half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DateRange {
    /// First instant included in the range.
    #[ts(as = "String")]
    pub start: DateTime<Utc>,
    /// First instant after the range.
    #[ts(as = "String")]
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Creates a range, rejecting empty or inverted intervals.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> CoreResult<Self> {
        if start >= end {
            return Err(CoreError::InvalidPeriod(format!(
                "range start {} is not before end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(DateRange { start, end })
    }

    /// True when `instant` falls inside `[start, end)`.
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Length of the range.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

// =============================================================================
// Period Tag
// =============================================================================

/// Named periods offered by the cash-flow view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PeriodTag {
    /// The current local day.
    Today,
    /// The current ISO week (Monday start).
    Week,
    /// The current calendar month.
    Month,
}

impl PeriodTag {
    /// All tags, in display order.
    pub const ALL: [PeriodTag; 3] = [PeriodTag::Today, PeriodTag::Week, PeriodTag::Month];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PeriodTag::Today => "today",
            PeriodTag::Week => "week",
            PeriodTag::Month => "month",
        }
    }
}

impl fmt::Display for PeriodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(PeriodTag::Today),
            "week" => Ok(PeriodTag::Week),
            "month" => Ok(PeriodTag::Month),
            other => Err(CoreError::InvalidPeriod(other.to_string())),
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves a period tag given as text (`"today"`, `"week"`, `"month"`).
///
/// ## Example
/// ```rust
/// use barberdesk_core::period::resolve_named;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
/// let today = resolve_named("today", &now).unwrap();
/// assert_eq!(today.start, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
/// assert_eq!(today.end, Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap());
///
/// assert!(resolve_named("fortnight", &now).is_err());
/// ```
pub fn resolve_named<Tz: TimeZone>(tag: &str, now: &DateTime<Tz>) -> CoreResult<DateRange> {
    let tag: PeriodTag = tag.parse()?;
    resolve(tag, now)
}

/// Resolves a parsed period tag relative to `now`.
pub fn resolve<Tz: TimeZone>(tag: PeriodTag, now: &DateTime<Tz>) -> CoreResult<DateRange> {
    let zone = now.timezone();
    let today = now.date_naive();

    let (first_day, next_first_day) = match tag {
        PeriodTag::Today => (today, today + Duration::days(1)),
        PeriodTag::Week => {
            let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
            (monday, monday + Duration::days(7))
        }
        PeriodTag::Month => {
            let first = today - Duration::days(today.day0() as i64);
            let (next_year, next_month0) = next_month(today.year(), today.month0());
            (first, first_of_month(next_year, next_month0)?)
        }
    };

    DateRange::new(
        local_midnight(&zone, first_day),
        local_midnight(&zone, next_first_day),
    )
}

/// Resolves an arbitrary calendar month in `zone`.
///
/// `month_index` is zero-based (January = 0). December rolls over into
/// January of the following year.
///
/// ## Example
/// ```rust
/// use barberdesk_core::period::resolve_month;
/// use chrono::{TimeZone, Utc};
///
/// let december = resolve_month(2024, 11, &Utc).unwrap();
/// assert_eq!(december.start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
/// assert_eq!(december.end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
/// ```
pub fn resolve_month<Tz: TimeZone>(year: i32, month_index: u32, zone: &Tz) -> CoreResult<DateRange> {
    if month_index > 11 {
        return Err(CoreError::InvalidMonth { month_index });
    }

    let first = first_of_month(year, month_index)?;
    let (next_year, next_month0) = next_month(year, month_index);
    let next_first = first_of_month(next_year, next_month0)?;

    DateRange::new(local_midnight(zone, first), local_midnight(zone, next_first))
}

/// First instant of the local calendar month containing `now`.
pub fn start_of_month<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let today = now.date_naive();
    local_midnight(&now.timezone(), today - Duration::days(today.day0() as i64))
}

// =============================================================================
// Helpers
// =============================================================================

fn first_of_month(year: i32, month0: u32) -> CoreResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).ok_or(CoreError::InvalidYear { year })
}

fn next_month(year: i32, month0: u32) -> (i32, u32) {
    if month0 == 11 {
        (year + 1, 0)
    } else {
        (year, month0 + 1)
    }
}

/// Converts local 00:00 of `date` in `zone` to UTC.
///
/// When midnight does not exist locally (DST starting at 00:00), the first
/// wall-clock time that does exist is used. Ambiguous midnights take the
/// earlier instant.
fn local_midnight<Tz: TimeZone>(zone: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    first_existing_instant(zone, midnight)
}

fn first_existing_instant<Tz: TimeZone>(zone: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    let step = Duration::minutes(DST_GAP_STEP_MINUTES);
    let mut candidate = local;

    // No real-world gap is longer than a day
    for _ in 0..(24 * 60 / DST_GAP_STEP_MINUTES) {
        if let Some(instant) = zone.from_local_datetime(&candidate).earliest() {
            return instant.with_timezone(&Utc);
        }
        candidate += step;
    }

    Utc.from_utc_datetime(&local)
}

// =============================================================================
// Unit Tests
// =============================================================================
