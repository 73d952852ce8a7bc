// Document clustering — TF-IDF vectors partitioned by k-means.
//
// The cluster count is validated before any text is vectorized. Labels are
// stable for a fixed input and seed but carry no meaning across runs.

use serde::Serialize;
use tracing::info;

use crate::document::{texts, Document};
use crate::error::{AnalysisError, AnalysisResult};
use crate::text::resources::LinguisticResources;
use crate::vectorize::tfidf::TfIdfVectorizer;
use crate::vectorize::traits::Vectorizer;

use super::kmeans::KMeans;
use super::traits::Clusterer;

/// A document and the cluster it landed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterAssignment {
    pub identifier: String,
    pub label: usize,
}

/// Cluster labels for a collection, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterAssignments {
    pub num_clusters: usize,
    pub assignments: Vec<ClusterAssignment>,
}

impl ClusterAssignments {
    /// Label of the first document with this identifier.
    pub fn get(&self, identifier: &str) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.identifier == identifier)
            .map(|a| a.label)
    }

    /// Identifiers assigned to `label`, in document order.
    pub fn members(&self, label: usize) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.label == label)
            .map(|a| a.identifier.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Document clusterer over pluggable vectorization and clustering strategies.
pub struct DocumentClusterer<V = TfIdfVectorizer, C = KMeans> {
    vectorizer: V,
    clusterer: C,
}

impl DocumentClusterer {
    /// TF-IDF with English stopwords and no vocabulary cap, then seeded
    /// k-means with 10 restarts.
    pub fn new(resources: &LinguisticResources) -> Self {
        Self {
            vectorizer: TfIdfVectorizer::english(resources),
            clusterer: KMeans::default(),
        }
    }
}

impl<V: Vectorizer, C: Clusterer> DocumentClusterer<V, C> {
    pub fn with_strategies(vectorizer: V, clusterer: C) -> Self {
        Self {
            vectorizer,
            clusterer,
        }
    }

    pub fn cluster(
        &self,
        documents: &[Document],
        num_clusters: usize,
    ) -> AnalysisResult<ClusterAssignments> {
        if documents.is_empty() {
            return Err(AnalysisError::EmptyInput(
                "no documents to cluster".to_string(),
            ));
        }
        if num_clusters == 0 || num_clusters > documents.len() {
            return Err(AnalysisError::InvalidClusterCount {
                requested: num_clusters,
                documents: documents.len(),
            });
        }

        let matrix = self.vectorizer.fit_transform(&texts(documents))?;
        let labels = self.clusterer.fit_predict(&matrix.weights, num_clusters)?;

        info!(
            documents = documents.len(),
            clusters = num_clusters,
            vocabulary = matrix.vocabulary.len(),
            "Clustered documents"
        );

        Ok(ClusterAssignments {
            num_clusters,
            assignments: documents
                .iter()
                .zip(labels)
                .map(|(doc, label)| ClusterAssignment {
                    identifier: doc.identifier.clone(),
                    label,
                })
                .collect(),
        })
    }
}

/// Cluster with the default TF-IDF + k-means pipeline.
pub fn cluster(
    documents: &[Document],
    num_clusters: usize,
    resources: &LinguisticResources,
) -> AnalysisResult<ClusterAssignments> {
    DocumentClusterer::new(resources).cluster(documents, num_clusters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignments() -> ClusterAssignments {
        ClusterAssignments {
            num_clusters: 2,
            assignments: vec![
                ClusterAssignment {
                    identifier: "a.pdf".to_string(),
                    label: 1,
                },
                ClusterAssignment {
                    identifier: "b.pdf".to_string(),
                    label: 0,
                },
                ClusterAssignment {
                    identifier: "c.pdf".to_string(),
                    label: 1,
                },
            ],
        }
    }

    #[test]
    fn test_lookup_and_members() {
        let a = assignments();
        assert_eq!(a.get("b.pdf"), Some(0));
        assert_eq!(a.get("zzz.pdf"), None);
        assert_eq!(a.members(1), vec!["a.pdf", "c.pdf"]);
        assert_eq!(a.len(), 3);
    }
}
