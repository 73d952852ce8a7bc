// Vectorization — document-term matrices for topic modeling and clustering.

pub mod matrix;
pub mod tfidf;
pub mod traits;
