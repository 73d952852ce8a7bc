// Dates — extraction of date-like substrings, ordered-format parsing,
// and bucketing by period granularity.

pub mod extract;
pub mod parse;
pub mod period;
