// Date extraction — find date-like substrings in raw text.
//
// One case-insensitive pattern with two alternatives:
//   - an optional day (with ordinal suffix), a month name or abbreviation,
//     separators, and a 2-4 digit year: "12 March 2023", "3rd Sept, 2021"
//   - a numeric D/M/Y date with `-`, `/` or `.` separators: "12/03/2023"
//
// Matches are non-overlapping and reported left to right. Whether a match
// is a real calendar date is decided later by `parse::parse_date`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex_lite::Regex;

use super::parse::parse_date;

const MONTH_NAMES: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|\
                           aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)\b(?:\d{{1,2}}(?:st|nd|rd|th)?[\s\-/.,]*)?(?:{MONTH_NAMES})[\s\-/.,]+\d{{2,4}}\b|\b\d{{1,2}}[-/.]\d{{1,2}}[-/.]\d{{2,4}}\b"
    );
    Regex::new(&pattern).expect("date pattern is valid")
});

/// Raw date substrings found in `text`, in order of appearance.
pub fn extract_dates(text: &str) -> Vec<String> {
    DATE_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Every date in `text` that parses, in order of appearance.
///
/// Unparseable matches are dropped silently; see `parse::parse_date`.
pub fn extract_parsed_dates(text: &str) -> Vec<NaiveDate> {
    extract_dates(text)
        .iter()
        .filter_map(|raw| parse_date(raw))
        .collect()
}
