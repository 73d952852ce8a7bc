// Clusterer trait — the seam between the document vectors and the
// partitioning algorithm.

use crate::error::AnalysisResult;
use crate::vectorize::matrix::Matrix;

/// Partitions the rows of a matrix into groups.
pub trait Clusterer {
    /// One label in `[0, num_clusters)` per row of `matrix`, in row order.
    ///
    /// Implementations must be reproducible for a fixed input.
    fn fit_predict(&self, matrix: &Matrix, num_clusters: usize) -> AnalysisResult<Vec<usize>>;
}
