// Analysis errors — the fatal conditions the core reports to its caller.
//
// Recoverable conditions (an unknown stopword language, a date that no
// format accepts) are logged and never reach this type.

use thiserror::Error;

/// Error returned by the frequency, topic and clustering analyses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The document collection was empty, or nothing survived normalization.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// More clusters were requested than there are documents (or zero).
    #[error("cannot build {requested} clusters from {documents} documents")]
    InvalidClusterCount { requested: usize, documents: usize },

    /// The term matrix cannot support the requested factorization.
    #[error("model fitting failed: {0}")]
    ModelFitting(String),
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
