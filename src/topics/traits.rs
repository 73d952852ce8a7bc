// Topic factorizer trait — swap-ready abstraction.
//
// The topic model only needs a non-negative factorization X ≈ W·H of the
// document-term matrix. The default implementation is NMF with NNDSVD-a
// initialization; anything honoring the same contract can replace it.

use crate::error::AnalysisResult;
use crate::vectorize::matrix::Matrix;

/// Result of factorizing a `documents × terms` matrix into `num_topics`
/// latent components.
#[derive(Debug, Clone)]
pub struct Factorization {
    /// `documents × topics` weights (W)
    pub document_topics: Matrix,
    /// `topics × terms` weights (H); row `i` describes topic `i`
    pub components: Matrix,
    /// Frobenius norm of X - W·H after the last iteration
    pub reconstruction_error: f64,
    pub iterations: usize,
}

/// Factorizes a non-negative document-term matrix into latent topics.
pub trait TopicFactorizer {
    /// Must be deterministic: the same matrix and topic count always yield
    /// the same factorization.
    fn factorize(&self, matrix: &Matrix, num_topics: usize) -> AnalysisResult<Factorization>;
}
