// Topic model — TF-IDF vectorization followed by NMF.
//
// Each NMF component becomes a topic: its ten heaviest terms are the topic's
// signature. The excerpt variant also pulls up to two sentences from the
// corpus that mention one of those terms. The mention check is a raw,
// case-sensitive substring test, so "tax" matches inside "taxonomy" but not
// in "Tax".

use serde::Serialize;
use tracing::info;

use crate::document::{texts, Document};
use crate::error::{AnalysisError, AnalysisResult};
use crate::text::resources::LinguisticResources;
use crate::text::sentences::split_sentences;
use crate::vectorize::tfidf::TfIdfVectorizer;
use crate::vectorize::traits::{TermMatrix, Vectorizer};

use super::nmf::NmfFactorizer;
use super::traits::TopicFactorizer;

/// Vocabulary cap used for topic modeling.
pub const TOPIC_MAX_FEATURES: usize = 5000;
pub const TERMS_PER_TOPIC: usize = 10;
pub const EXCERPTS_PER_TOPIC: usize = 2;

/// One discovered topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    /// Zero-based position of the NMF component
    pub index: usize,
    /// Up to ten terms, heaviest first
    pub top_terms: Vec<String>,
    /// Up to two corpus sentences mentioning a top term (empty unless
    /// excerpts were requested)
    pub excerpt: Vec<String>,
}

/// Topic model over pluggable vectorization and factorization strategies.
pub struct TopicModel<V = TfIdfVectorizer, F = NmfFactorizer> {
    vectorizer: V,
    factorizer: F,
}

impl TopicModel {
    /// TF-IDF (English stopwords, 5000-term cap) followed by NMF.
    pub fn new(resources: &LinguisticResources) -> Self {
        Self {
            vectorizer: TfIdfVectorizer::english(resources).with_max_features(TOPIC_MAX_FEATURES),
            factorizer: NmfFactorizer::default(),
        }
    }
}

impl<V: Vectorizer, F: TopicFactorizer> TopicModel<V, F> {
    pub fn with_strategies(vectorizer: V, factorizer: F) -> Self {
        Self {
            vectorizer,
            factorizer,
        }
    }

    /// Discover `num_topics` topics, each described by its top terms.
    pub fn topics(&self, documents: &[Document], num_topics: usize) -> AnalysisResult<Vec<Topic>> {
        if documents.is_empty() {
            return Err(AnalysisError::EmptyInput(
                "no documents to model topics from".to_string(),
            ));
        }
        if num_topics == 0 {
            return Err(AnalysisError::ModelFitting(
                "number of topics must be at least 1".to_string(),
            ));
        }

        let TermMatrix {
            vocabulary,
            weights,
        } = self.vectorizer.fit_transform(&texts(documents))?;
        if num_topics > vocabulary.len() {
            return Err(AnalysisError::ModelFitting(format!(
                "{num_topics} topics requested but the vocabulary has only {} terms",
                vocabulary.len()
            )));
        }

        let factorization = self.factorizer.factorize(&weights, num_topics)?;
        let components = &factorization.components;

        let topics: Vec<Topic> = (0..components.rows())
            .map(|index| Topic {
                index,
                top_terms: top_terms(components.row(index), &vocabulary, TERMS_PER_TOPIC),
                excerpt: Vec::new(),
            })
            .collect();

        info!(
            documents = documents.len(),
            vocabulary = vocabulary.len(),
            topics = topics.len(),
            iterations = factorization.iterations,
            "Fitted topic model"
        );

        Ok(topics)
    }

    /// Like `topics`, with up to two excerpt sentences per topic.
    pub fn topics_with_excerpts(
        &self,
        documents: &[Document],
        num_topics: usize,
    ) -> AnalysisResult<Vec<Topic>> {
        let mut topics = self.topics(documents, num_topics)?;
        for topic in &mut topics {
            topic.excerpt = find_excerpts(documents, &topic.top_terms, EXCERPTS_PER_TOPIC);
        }
        Ok(topics)
    }
}

/// Topics with the default TF-IDF + NMF pipeline.
pub fn model_topics(
    documents: &[Document],
    num_topics: usize,
    resources: &LinguisticResources,
) -> AnalysisResult<Vec<Topic>> {
    TopicModel::new(resources).topics(documents, num_topics)
}

/// Topics with excerpts, using the default TF-IDF + NMF pipeline.
pub fn model_topics_with_excerpts(
    documents: &[Document],
    num_topics: usize,
    resources: &LinguisticResources,
) -> AnalysisResult<Vec<Topic>> {
    TopicModel::new(resources).topics_with_excerpts(documents, num_topics)
}

/// The `n` heaviest terms of a component, ties broken by column order.
fn top_terms(weights: &[f64], vocabulary: &[String], n: usize) -> Vec<String> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| {
        weights[b]
            .partial_cmp(&weights[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
        .into_iter()
        .take(n)
        .map(|i| vocabulary[i].clone())
        .collect()
}

/// First `limit` sentences, in document order, containing any of `terms`.
fn find_excerpts(documents: &[Document], terms: &[String], limit: usize) -> Vec<String> {
    let mut excerpts = Vec::new();
    for doc in documents {
        for sentence in split_sentences(&doc.text) {
            if terms.iter().any(|term| sentence.contains(term.as_str())) {
                excerpts.push(sentence);
                if excerpts.len() >= limit {
                    return excerpts;
                }
            }
        }
    }
    excerpts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_terms_ordering() {
        let vocab: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let terms = top_terms(&[0.1, 0.9, 0.5, 0.9], &vocab, 3);
        assert_eq!(terms, vec!["b", "d", "c"]);
    }

    #[test]
    fn test_excerpts_stop_at_limit() {
        let docs = vec![
            Document::new("a", "Solar panels work. Nothing here. More solar output."),
            Document::new("b", "Solar again."),
        ];
        let terms = vec!["solar".to_string()];
        let excerpts = find_excerpts(&docs, &terms, 2);
        // "Solar panels work." does not contain lowercase "solar"
        assert_eq!(excerpts, vec!["More solar output."]);
    }

    #[test]
    fn test_excerpts_substring_match() {
        let docs = vec![Document::new("a", "A taxonomy of birds. Birds fly. The tax rose.")];
        let excerpts = find_excerpts(&docs, &["tax".to_string()], 2);
        assert_eq!(excerpts, vec!["A taxonomy of birds.", "The tax rose."]);
    }
}
