// Document clustering — k-means over TF-IDF vectors behind a Clusterer trait.

pub mod documents;
pub mod kmeans;
pub mod traits;
