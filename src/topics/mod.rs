// Topic modeling — NMF over a TF-IDF matrix, with a swappable factorizer.

pub mod model;
pub mod nmf;
pub mod traits;
