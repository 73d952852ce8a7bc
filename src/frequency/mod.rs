// Frequency analysis — token counting for the corpus, single documents,
// and date buckets.

pub mod analyzer;
pub mod table;
