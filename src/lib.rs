// Docscope: text analytics over collections of PDF documents
//
// This is the library root. Each module corresponds to a stage of the
// analysis: ingestion and normalization feed the word-frequency, date,
// topic and clustering analyses, and output renders their results.

pub mod clustering;
pub mod config;
pub mod dates;
pub mod document;
pub mod error;
pub mod frequency;
pub mod ingest;
pub mod output;
pub mod text;
pub mod topics;
pub mod vectorize;
