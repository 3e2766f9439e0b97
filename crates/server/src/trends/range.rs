//! # Trend Date Ranges
//!
//! Turns a named range or explicit year/month bounds into an inclusive
//! calendar interval and the label granularity for chart points. Every
//! trend endpoint resolves its interval through [`resolve`].

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};

use crate::calendar::date_key;

/// Named ranges accepted by the `range` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKeyword {
    /// Today and the six days before it
    LastSevenDays,
    /// Today and the twenty-nine days before it
    LastThirtyDays,
    /// The current calendar month
    Month,
    /// The current calendar year
    Year,
}

impl FromStr for RangeKeyword {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(Self::LastSevenDays),
            "30d" => Ok(Self::LastThirtyDays),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(()),
        }
    }
}

/// Granularity of trend labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFormat {
    /// `MM/DD`
    DayMonth,
    /// `YYYY/MM`
    YearMonth,
}

impl LabelFormat {
    /// Renders the label of `date`.
    pub fn label(self, date: NaiveDate) -> String {
        match self {
            LabelFormat::DayMonth => date.format("%m/%d").to_string(),
            LabelFormat::YearMonth => date.format("%Y/%m").to_string(),
        }
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelFormat::DayMonth => f.write_str("MM/DD"),
            LabelFormat::YearMonth => f.write_str("YYYY/MM"),
        }
    }
}

/// Query parameters shared by every trend endpoint.
///
/// Empty or non-numeric `year`, `startMonth` and `endMonth` values count as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRangeRequest {
    pub range:       Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub year:        Option<i32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub start_month: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub end_month:   Option<u32>,
}

fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

impl TrendRangeRequest {
    /// Request for a named range.
    pub fn named(range: &str) -> Self {
        Self {
            range: Some(range.to_string()),
            ..Default::default()
        }
    }

    /// Request for explicit year/month bounds.
    pub fn months(year: i32, start_month: u32, end_month: u32) -> Self {
        Self {
            range: None,
            year: Some(year),
            start_month: Some(start_month),
            end_month: Some(end_month),
        }
    }

    /// Parsed keyword; unknown values count as absent.
    pub fn keyword(&self) -> Option<RangeKeyword> { self.range.as_deref().and_then(|r| r.parse().ok()) }
}

/// Inclusive calendar interval with its label granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start:        NaiveDate,
    pub end:          NaiveDate,
    pub label_format: LabelFormat,
}

impl DateRange {
    /// Storage key of the first day.
    pub fn start_key(&self) -> String { date_key(self.start) }

    /// Storage key of the last day.
    pub fn end_key(&self) -> String { date_key(self.end) }

    /// Whether a stored `YYYY-MM-DD` key lies inside the interval.
    pub fn contains(&self, key: &str) -> bool {
        let start = self.start_key();
        let end = self.end_key();
        key >= start.as_str() && key <= end.as_str()
    }
}

/// Calendar date of `now` in `tz`.
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate { now.with_timezone(&tz).date_naive() }

/// Resolves the interval for `req` relative to `today`.
///
/// The first matching rule wins: a recognised keyword, then complete
/// year/month bounds, then the last seven days. Month bounds outside
/// 1..=12 or with the start after the end are treated as absent.
pub fn resolve(req: &TrendRangeRequest, today: NaiveDate) -> DateRange {
    match req.keyword() {
        Some(RangeKeyword::LastSevenDays) => trailing_days(today, 7),
        Some(RangeKeyword::LastThirtyDays) => trailing_days(today, 30),
        Some(RangeKeyword::Month) => {
            let start = first_of_month(today.year(), today.month()).unwrap_or(today);
            DateRange {
                start,
                end: last_of_month(today.year(), today.month()).unwrap_or(today),
                label_format: LabelFormat::DayMonth,
            }
        },
        Some(RangeKeyword::Year) => {
            match (
                NaiveDate::from_ymd_opt(today.year(), 1, 1),
                NaiveDate::from_ymd_opt(today.year(), 12, 31),
            ) {
                (Some(start), Some(end)) => {
                    DateRange {
                        start,
                        end,
                        label_format: LabelFormat::YearMonth,
                    }
                },
                _ => trailing_days(today, 7),
            }
        },
        None => explicit_months(req).unwrap_or_else(|| trailing_days(today, 7)),
    }
}

fn explicit_months(req: &TrendRangeRequest) -> Option<DateRange> {
    let (year, start_month, end_month) = (req.year?, req.start_month?, req.end_month?);
    if start_month > end_month {
        return None;
    }
    Some(DateRange {
        start:        first_of_month(year, start_month)?,
        end:          last_of_month(year, end_month)?,
        label_format: LabelFormat::YearMonth,
    })
}

fn trailing_days(today: NaiveDate, days: i64) -> DateRange {
    DateRange {
        start:        today - Duration::days(days - 1),
        end:          today,
        label_format: LabelFormat::DayMonth,
    }
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> { NaiveDate::from_ymd_opt(year, month, 1) }

fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    }
    else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next?.pred_opt()
}
