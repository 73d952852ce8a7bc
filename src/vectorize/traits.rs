// Vectorizer trait — the seam between raw text and the numeric models.
//
// Topic modeling and clustering only see a `TermMatrix`, so the weighting
// scheme can change without touching either of them.

use crate::error::AnalysisResult;

use super::matrix::Matrix;

/// A document-term matrix together with the term for each column.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatrix {
    /// Column labels, one per feature
    pub vocabulary: Vec<String>,
    /// One row per input document, one column per vocabulary term
    pub weights: Matrix,
}

/// Turns a batch of texts into a weighted document-term matrix.
pub trait Vectorizer {
    /// Learn a vocabulary from `texts` and weight each document against it.
    ///
    /// Fails with `ModelFitting` when no term survives filtering.
    fn fit_transform(&self, texts: &[&str]) -> AnalysisResult<TermMatrix>;
}

impl<T: Vectorizer + ?Sized> Vectorizer for &T {
    fn fit_transform(&self, texts: &[&str]) -> AnalysisResult<TermMatrix> {
        (**self).fit_transform(texts)
    }
}
