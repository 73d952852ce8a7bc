// Unit tests for k-means and document clustering.
//
// Includes a counting vectorizer to check that an invalid cluster count is
// rejected before any vectorization work happens.

use std::cell::Cell;

use docscope::clustering::documents::{cluster, DocumentClusterer};
use docscope::clustering::kmeans::KMeans;
use docscope::clustering::traits::Clusterer;
use docscope::document::Document;
use docscope::error::{AnalysisError, AnalysisResult};
use docscope::text::resources::LinguisticResources;
use docscope::vectorize::matrix::Matrix;
use docscope::vectorize::traits::{TermMatrix, Vectorizer};

fn resources() -> LinguisticResources {
    LinguisticResources::from_sets(vec![(
        "english".to_string(),
        vec!["the".to_string(), "of".to_string(), "and".to_string()],
    )])
}

fn corpus() -> Vec<Document> {
    vec![
        Document::new("reactor-1.pdf", "reactor uranium coolant reactor"),
        Document::new("polar-1.pdf", "penguin krill glacier penguin"),
        Document::new("reactor-2.pdf", "uranium reactor turbine coolant"),
        Document::new("polar-2.pdf", "glacier iceberg penguin krill"),
    ]
}

/// Vectorizer that records how often it was called.
struct CountingVectorizer {
    calls: Cell<usize>,
}

impl Vectorizer for CountingVectorizer {
    fn fit_transform(&self, texts: &[&str]) -> AnalysisResult<TermMatrix> {
        self.calls.set(self.calls.get() + 1);
        Ok(TermMatrix {
            vocabulary: vec!["x".to_string()],
            weights: Matrix::filled(texts.len(), 1, 1.0),
        })
    }
}

// ============================================================
// KMeans
// ============================================================

#[test]
fn kmeans_separates_well_spaced_groups() {
    let matrix = Matrix::from_rows(vec![
        vec![0.0, 0.0],
        vec![0.1, 0.0],
        vec![10.0, 10.0],
        vec![10.1, 9.9],
        vec![0.0, 0.2],
    ]);
    let labels = KMeans::default().fit_predict(&matrix, 2).unwrap();
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[0], labels[4]);
    assert_eq!(labels[2], labels[3]);
    assert_ne!(labels[0], labels[2]);
}

#[test]
fn kmeans_labels_within_range() {
    let matrix = Matrix::from_rows(vec![
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 1.0],
        vec![0.5, 0.5],
    ]);
    let labels = KMeans::default().fit_predict(&matrix, 3).unwrap();
    assert_eq!(labels.len(), 4);
    assert!(labels.iter().all(|l| *l < 3));
}

#[test]
fn kmeans_same_seed_same_labels() {
    let matrix = Matrix::from_rows(vec![
        vec![0.3, 0.7],
        vec![0.9, 0.1],
        vec![0.4, 0.6],
        vec![0.8, 0.3],
        vec![0.5, 0.5],
    ]);
    let a = KMeans::default().fit_predict(&matrix, 2).unwrap();
    let b = KMeans::default().fit_predict(&matrix, 2).unwrap();
    assert_eq!(a, b);
}

#[test]
fn kmeans_rejects_more_clusters_than_rows() {
    let matrix = Matrix::from_rows(vec![vec![1.0], vec![2.0]]);
    let err = KMeans::default().fit_predict(&matrix, 3).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InvalidClusterCount {
            requested: 3,
            documents: 2
        }
    );
}

// ============================================================
// Document clustering
// ============================================================

#[test]
fn documents_cluster_by_vocabulary() {
    let result = cluster(&corpus(), 2, &resources()).unwrap();
    assert_eq!(result.len(), 4);
    assert_eq!(result.num_clusters, 2);

    let r1 = result.get("reactor-1.pdf").unwrap();
    let r2 = result.get("reactor-2.pdf").unwrap();
    let p1 = result.get("polar-1.pdf").unwrap();
    let p2 = result.get("polar-2.pdf").unwrap();
    assert_eq!(r1, r2);
    assert_eq!(p1, p2);
    assert_ne!(r1, p1);
}

#[test]
fn assignments_keep_document_order() {
    let docs = corpus();
    let result = cluster(&docs, 2, &resources()).unwrap();
    let ids: Vec<&str> = result
        .assignments
        .iter()
        .map(|a| a.identifier.as_str())
        .collect();
    let expected: Vec<&str> = docs.iter().map(|d| d.identifier.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn members_group_identifiers() {
    let result = cluster(&corpus(), 2, &resources()).unwrap();
    let label = result.get("polar-1.pdf").unwrap();
    assert_eq!(result.members(label), vec!["polar-1.pdf", "polar-2.pdf"]);
}

#[test]
fn clustering_is_reproducible() {
    let docs = corpus();
    let a = cluster(&docs, 2, &resources()).unwrap();
    let b = cluster(&docs, 2, &resources()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn too_many_clusters_fails_before_vectorizing() {
    let counter = CountingVectorizer {
        calls: Cell::new(0),
    };
    let docs = vec![Document::new("a", "one"), Document::new("b", "two")];

    let clusterer = DocumentClusterer::with_strategies(&counter, KMeans::default());
    let err = clusterer.cluster(&docs, 3).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InvalidClusterCount {
            requested: 3,
            documents: 2
        }
    );
    assert_eq!(counter.calls.get(), 0);

    clusterer.cluster(&docs, 2).unwrap();
    assert_eq!(counter.calls.get(), 1);
}

#[test]
fn empty_collection_fails() {
    let err = cluster(&[], 2, &resources()).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyInput(_)));
}

#[test]
fn stopword_only_collection_fails() {
    let docs = vec![Document::new("a", "the of"), Document::new("b", "and the")];
    let err = cluster(&docs, 2, &resources()).unwrap_err();
    assert!(matches!(err, AnalysisError::ModelFitting(_)));
}
