use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::models::{Service, Transaction};

/// Anything stamped with a `YYYY-MM-DD` (or full date-time) string.
pub trait Dated {
    fn date(&self) -> &str;
}

impl Dated for Service {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for Transaction {
    fn date(&self) -> &str {
        &self.date
    }
}

/// Inclusive `[start, end]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Records whose date parses and falls inside the window, in input order.
    pub fn filter<T: Dated + Clone>(&self, records: &[T]) -> Vec<T> {
        records
            .iter()
            .filter(|r| parse_instant(r.date()).is_some_and(|d| self.contains(d)))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    CurrentMonth,
    LastMonth,
    LastThreeMonths,
    LastSixMonths,
    AllTime,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateRange {
    pub const PRESETS: [DateRange; 5] = [
        DateRange::CurrentMonth,
        DateRange::LastMonth,
        DateRange::LastThreeMonths,
        DateRange::LastSixMonths,
        DateRange::AllTime,
    ];

    /// Custom range covering one calendar month. `None` for an invalid or
    /// unrepresentable month.
    pub fn month(year: i32, month: u32) -> Option<DateRange> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(DateRange::Custom {
            start: Some(first),
            end: Some(month_end(first)?),
        })
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::CurrentMonth => "current-month",
            Self::LastMonth => "last-month",
            Self::LastThreeMonths => "last-3-months",
            Self::LastSixMonths => "last-6-months",
            Self::AllTime => "all-time",
            Self::Custom { .. } => "custom",
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::CurrentMonth => "Current month".to_string(),
            Self::LastMonth => "Last month".to_string(),
            Self::LastThreeMonths => "Last 3 months".to_string(),
            Self::LastSixMonths => "Last 6 months".to_string(),
            Self::AllTime => "All time".to_string(),
            Self::Custom {
                start: Some(s),
                end: Some(e),
            } => format!("{} to {}", s.format("%Y-%m-%d"), e.format("%Y-%m-%d")),
            Self::Custom { .. } => "Custom range".to_string(),
        }
    }

    /// `(months back from now's month, months spanned)` for month-anchored presets.
    fn month_shape(&self) -> Option<(u32, u32)> {
        match self {
            Self::CurrentMonth => Some((0, 1)),
            Self::LastMonth => Some((1, 1)),
            Self::LastThreeMonths => Some((3, 4)),
            Self::LastSixMonths => Some((6, 7)),
            Self::AllTime | Self::Custom { .. } => None,
        }
    }

    /// The window this range selects at `now`, or `None` when it is unbounded
    /// or falls outside the representable calendar.
    pub fn bounds(&self, now: NaiveDateTime) -> Option<Window> {
        if let Some((back, span)) = self.month_shape() {
            return month_window(month_start(now.date()), back, span);
        }
        match self {
            Self::Custom {
                start: Some(s),
                end: Some(e),
            } => Some(Window {
                start: start_of_day(*s),
                end: end_of_day(*e)?,
            }),
            _ => None,
        }
    }

    /// The window of the same span immediately preceding [`bounds`](Self::bounds).
    pub fn previous_bounds(&self, now: NaiveDateTime) -> Option<Window> {
        if let Some((back, span)) = self.month_shape() {
            return month_window(month_start(now.date()), back + span, span);
        }
        match self {
            Self::Custom {
                start: Some(s),
                end: Some(e),
            } => {
                let days = (*e - *s).num_days().max(0) as u64 + 1;
                let prev_end = s.checked_sub_days(Days::new(1))?;
                let prev_start = s.checked_sub_days(Days::new(days))?;
                Some(Window {
                    start: start_of_day(prev_start),
                    end: end_of_day(prev_end)?,
                })
            }
            _ => None,
        }
    }

    /// True for every range except `AllTime` and an incomplete custom range.
    fn is_bounded(&self) -> bool {
        match self {
            Self::AllTime => false,
            Self::Custom { start, end } => start.is_some() && end.is_some(),
            _ => true,
        }
    }

    /// Keep the records dated inside this range at `now`.
    ///
    /// `AllTime` is the identity. A custom range missing either bound also
    /// returns the input unchanged. A fully bounded range whose window cannot
    /// be represented selects nothing.
    pub fn filter<T: Dated + Clone>(&self, records: &[T], now: NaiveDateTime) -> Vec<T> {
        match self.bounds(now) {
            Some(window) => window.filter(records),
            None if self.is_bounded() => {
                warn!(range = %self, "range falls outside the calendar, selecting nothing");
                Vec::new()
            }
            None => {
                if let Self::Custom { start, end } = self {
                    warn!(
                        start = ?start,
                        end = ?end,
                        "custom range is missing a bound, returning records unfiltered"
                    );
                }
                records.to_vec()
            }
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::PRESETS
            .iter()
            .find(|r| r.key() == wanted)
            .copied()
            .ok_or_else(|| {
                format!(
                    "unknown range '{s}' (expected current-month, last-month, last-3-months, last-6-months or all-time)"
                )
            })
    }
}

/// Free-function form of [`DateRange::filter`].
pub fn filter<T: Dated + Clone>(records: &[T], range: &DateRange, now: NaiveDateTime) -> Vec<T> {
    range.filter(records, now)
}

/// Parse a record date. Accepts `YYYY-MM-DD` (midnight), `YYYY-MM-DDTHH:MM:SS`
/// and RFC 3339 (converted to UTC). Anything else yields `None`.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(start_of_day(d));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc())
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Parse a `YYYY-MM` month into `(year, month)`.
pub fn parse_month(raw: &str) -> Option<(i32, u32)> {
    let (y, m) = raw.trim().split_once('-')?;
    let year: i32 = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1).map(|_| (year, month))
}

fn month_start(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

fn month_end(first: NaiveDate) -> Option<NaiveDate> {
    first
        .checked_add_months(Months::new(1))?
        .checked_sub_days(Days::new(1))
}

fn month_window(first: NaiveDate, back: u32, span: u32) -> Option<Window> {
    let start = first.checked_sub_months(Months::new(back))?;
    let last_month = start.checked_add_months(Months::new(span - 1))?;
    Some(Window {
        start: start_of_day(start),
        end: end_of_day(month_end(last_month)?)?,
    })
}

fn start_of_day(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN)
}

// Inclusive end of day: 23:59:59.
fn end_of_day(d: NaiveDate) -> Option<NaiveDateTime> {
    d.and_hms_opt(23, 59, 59)
}
