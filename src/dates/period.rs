// Period granularities and the bucket keys they produce.
//
//   yearly       2023
//   quarterly    2023-Q1      quarter = (month - 1) / 3 + 1
//   half-yearly  2023-H2      half    = (month - 1) / 6 + 1
//   3-years      2022-2024    windows aligned on multiples of 3
//   5-years      2020-2024    windows aligned on multiples of 5

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use tracing::warn;

/// Width of the temporal buckets used by `top_words_by_period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    #[default]
    Yearly,
    Quarterly,
    HalfYearly,
    #[serde(rename = "3-years")]
    ThreeYears,
    #[serde(rename = "5-years")]
    FiveYears,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Yearly,
        Period::Quarterly,
        Period::HalfYearly,
        Period::ThreeYears,
        Period::FiveYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Yearly => "yearly",
            Period::Quarterly => "quarterly",
            Period::HalfYearly => "half-yearly",
            Period::ThreeYears => "3-years",
            Period::FiveYears => "5-years",
        }
    }

    /// Parse a period label. Unknown labels fall back to yearly.
    pub fn from_label(label: &str) -> Period {
        let normalized = label.trim().to_lowercase();
        match Period::ALL.iter().find(|p| p.as_str() == normalized) {
            Some(period) => *period,
            None => {
                warn!(period = label, "Unrecognized period, using yearly buckets");
                Period::Yearly
            }
        }
    }

    /// The bucket `date` falls into at this granularity.
    pub fn bucket(&self, date: NaiveDate) -> DateBucketKey {
        let year = date.year();
        let month = date.month();
        match self {
            Period::Yearly => DateBucketKey::Year(year),
            Period::Quarterly => DateBucketKey::Quarter {
                year,
                quarter: (month - 1) / 3 + 1,
            },
            Period::HalfYearly => DateBucketKey::Half {
                year,
                half: (month - 1) / 6 + 1,
            },
            Period::ThreeYears => aligned_window(year, 3),
            Period::FiveYears => aligned_window(year, 5),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn aligned_window(year: i32, width: i32) -> DateBucketKey {
    let start = year.div_euclid(width) * width;
    DateBucketKey::Range {
        start,
        end: start + width - 1,
    }
}

/// Grouping key derived from a parsed date and a period.
///
/// Keys of the same period order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateBucketKey {
    Year(i32),
    Quarter { year: i32, quarter: u32 },
    Half { year: i32, half: u32 },
    Range { start: i32, end: i32 },
}

impl fmt::Display for DateBucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateBucketKey::Year(year) => write!(f, "{year}"),
            DateBucketKey::Quarter { year, quarter } => write!(f, "{year}-Q{quarter}"),
            DateBucketKey::Half { year, half } => write!(f, "{year}-H{half}"),
            DateBucketKey::Range { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

impl Serialize for DateBucketKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
