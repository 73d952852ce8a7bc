// Header/footer stripping for extracted PDF text.
//
// PDF extraction keeps running heads, page numbers and footers. Lines that
// repeat across more than `repeat_threshold` of all lines are dropped, as
// are short lines (at most `min_words` words), which are mostly captions,
// page numbers and layout debris. Surviving lines are joined with spaces.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripOptions {
    /// Fraction of all lines above which a repeated line counts as a
    /// header or footer
    pub repeat_threshold: f64,
    /// Lines with this many words or fewer are dropped
    pub min_words: usize,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            repeat_threshold: 0.1,
            min_words: 5,
        }
    }
}

/// Remove repeated header/footer lines and short lines from `text`.
///
/// A line must occur more than once to count as repeated, so a short
/// document does not lose every line to the fractional threshold.
pub fn remove_headers_footers(text: &str, options: &StripOptions) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in &lines {
        *counts.entry(line).or_insert(0) += 1;
    }

    let threshold = (lines.len() as f64 * options.repeat_threshold).max(1.0);
    lines
        .iter()
        .filter(|line| counts[*line] as f64 <= threshold)
        .filter(|line| line.split_whitespace().count() > options.min_words)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
