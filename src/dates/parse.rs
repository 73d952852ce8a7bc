// Date parsing — an ordered list of formats, first success wins.
//
// Ambiguous numeric dates such as "03/04/2023" resolve day-first because
// `DayMonthYear` is tried before `MonthDayYear`. There is no locale
// inference. A raw string no format accepts is dropped, not reported.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex_lite::Regex;
use tracing::debug;

static DAY_MONTH_NAME_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)?[\s\-/.,]*([a-z]+)[\s\-/.,]+(\d{4})$")
        .expect("day-month-year pattern is valid")
});

static NUMERIC_DMY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})$").expect("numeric pattern is valid")
});

static ISO_YMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("iso pattern is valid")
});

/// One date layout the parser knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// "12 March 2023", "3rd Sep 2021"
    DayMonthNameYear,
    /// "12/03/2023"
    DayMonthYear,
    /// "03/12/2023"
    MonthDayYear,
    /// "2023-03-12"
    YearMonthDay,
}

/// Formats in the order they are attempted.
pub const DATE_FORMATS: [DateFormat; 4] = [
    DateFormat::DayMonthNameYear,
    DateFormat::DayMonthYear,
    DateFormat::MonthDayYear,
    DateFormat::YearMonthDay,
];

impl DateFormat {
    /// Try to read `raw` in this format. Years must have four digits.
    pub fn parse(self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        match self {
            DateFormat::DayMonthNameYear => {
                let caps = DAY_MONTH_NAME_YEAR.captures(raw)?;
                let day = caps[1].parse().ok()?;
                let month = month_from_name(&caps[2])?;
                let year = caps[3].parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateFormat::DayMonthYear => {
                let caps = NUMERIC_DMY.captures(raw)?;
                let day = caps[1].parse().ok()?;
                let month = caps[2].parse().ok()?;
                let year = caps[3].parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateFormat::MonthDayYear => {
                let caps = NUMERIC_DMY.captures(raw)?;
                let month = caps[1].parse().ok()?;
                let day = caps[2].parse().ok()?;
                let year = caps[3].parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateFormat::YearMonthDay => {
                let caps = ISO_YMD.captures(raw)?;
                let year = caps[1].parse().ok()?;
                let month = caps[2].parse().ok()?;
                let day = caps[3].parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
        }
    }
}

/// Parse a raw date string with the first format in `DATE_FORMATS` that
/// accepts it.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let parsed = DATE_FORMATS.iter().find_map(|format| format.parse(raw));
    if parsed.is_none() {
        debug!(raw, "Dropping unparseable date");
    }
    parsed
}

/// Month number for a full English month name or its abbreviation.
fn month_from_name(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}
