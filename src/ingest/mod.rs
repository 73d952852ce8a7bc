// Ingestion — turn PDF and text files into documents for analysis.

pub mod clean;
pub mod loader;
pub mod pdf;
