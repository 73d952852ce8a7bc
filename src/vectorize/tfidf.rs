// TF-IDF vectorizer.
//
// Tokens are lowercase runs of two or more word characters, minus English
// stopwords. Weights are raw term counts times a smoothed IDF,
//
//   idf(t) = ln((1 + n_docs) / (1 + df(t))) + 1
//
// and every document row is scaled to unit L2 norm. Columns are ordered
// alphabetically so the same corpus always yields the same matrix.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{AnalysisError, AnalysisResult};
use crate::text::normalize::is_word_char;
use crate::text::resources::LinguisticResources;

use super::matrix::Matrix;
use super::traits::{TermMatrix, Vectorizer};

#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    stopwords: HashSet<String>,
    /// Keep only the most frequent terms across the corpus
    max_features: Option<usize>,
}

impl TfIdfVectorizer {
    /// A vectorizer that drops the English stopwords from `resources`.
    pub fn english(resources: &LinguisticResources) -> Self {
        Self {
            stopwords: resources.stopwords("english").clone(),
            max_features: None,
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !is_word_char(c))
            .filter(|t| t.chars().count() >= 2)
            .filter(|t| !self.stopwords.contains(*t))
            .map(str::to_string)
            .collect()
    }

    /// Pick the vocabulary: most frequent terms first (ties alphabetical),
    /// capped at `max_features`, then sorted alphabetically.
    fn select_vocabulary(&self, corpus_counts: &HashMap<String, usize>) -> Vec<String> {
        let mut ranked: Vec<(&String, usize)> =
            corpus_counts.iter().map(|(t, c)| (t, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        if let Some(cap) = self.max_features {
            ranked.truncate(cap);
        }

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t.clone()).collect();
        vocabulary.sort();
        vocabulary
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn fit_transform(&self, texts: &[&str]) -> AnalysisResult<TermMatrix> {
        let doc_counts: Vec<HashMap<String, usize>> = texts
            .iter()
            .map(|text| {
                let mut counts = HashMap::new();
                for token in self.tokenize(text) {
                    *counts.entry(token).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut corpus_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for counts in &doc_counts {
            for (term, count) in counts {
                *corpus_counts.entry(term.clone()).or_insert(0) += count;
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        if corpus_counts.is_empty() {
            return Err(AnalysisError::ModelFitting(
                "empty vocabulary; documents may contain only stop words".to_string(),
            ));
        }

        let vocabulary = self.select_vocabulary(&corpus_counts);
        let n_docs = texts.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let mut weights = Matrix::zeros(texts.len(), vocabulary.len());
        for (row, counts) in doc_counts.iter().enumerate() {
            let weights_row = weights.row_mut(row);
            for (col, term) in vocabulary.iter().enumerate() {
                if let Some(&count) = counts.get(term) {
                    weights_row[col] = count as f64 * idf[col];
                }
            }
            let row_norm = weights_row.iter().map(|w| w * w).sum::<f64>().sqrt();
            if row_norm > 0.0 {
                weights_row.iter_mut().for_each(|w| *w /= row_norm);
            }
        }

        debug!(
            documents = texts.len(),
            vocabulary = vocabulary.len(),
            "Built TF-IDF matrix"
        );

        Ok(TermMatrix {
            vocabulary,
            weights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfIdfVectorizer {
        let res = LinguisticResources::from_sets(vec![(
            "english".to_string(),
            vec!["the".to_string(), "of".to_string()],
        )]);
        TfIdfVectorizer::english(&res)
    }

    #[test]
    fn test_vocabulary_sorted_and_filtered() {
        let m = vectorizer()
            .fit_transform(&["The zebra of a yak", "yak yak apple"])
            .unwrap();
        // "a" is too short, "the"/"of" are stopwords
        assert_eq!(m.vocabulary, vec!["apple", "yak", "zebra"]);
        assert_eq!(m.weights.rows(), 2);
    }

    #[test]
    fn test_rows_unit_norm() {
        let m = vectorizer()
            .fit_transform(&["alpha beta beta", "gamma alpha"])
            .unwrap();
        for r in 0..m.weights.rows() {
            let n: f64 = m.weights.row(r).iter().map(|w| w * w).sum::<f64>().sqrt();
            assert!((n - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let m = vectorizer()
            .fit_transform(&["common rare", "common other"])
            .unwrap();
        let common = m.vocabulary.iter().position(|t| t == "common").unwrap();
        let rare = m.vocabulary.iter().position(|t| t == "rare").unwrap();
        assert!(m.weights.get(0, rare) > m.weights.get(0, common));
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let m = vectorizer()
            .with_max_features(2)
            .fit_transform(&["delta delta delta beta beta alpha", "delta beta"])
            .unwrap();
        assert_eq!(m.vocabulary, vec!["beta", "delta"]);
    }

    #[test]
    fn test_empty_vocabulary_is_model_fitting_error() {
        let err = vectorizer().fit_transform(&["the of", "a"]).unwrap_err();
        assert!(matches!(err, AnalysisError::ModelFitting(_)));
    }

    #[test]
    fn test_empty_document_row_is_zero() {
        let m = vectorizer().fit_transform(&["", "solar wind"]).unwrap();
        assert!(m.weights.row(0).iter().all(|w| *w == 0.0));
    }
}
