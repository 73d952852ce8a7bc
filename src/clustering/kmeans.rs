// K-means with k-means++ seeding and restarts.
//
// A single seeded RNG drives all `n_init` restarts, so the whole run is
// reproducible. The restart with the lowest inertia (sum of squared
// distances to the nearest centroid) wins; on equal inertia the earlier
// restart is kept.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{AnalysisError, AnalysisResult};
use crate::vectorize::matrix::{squared_distance, Matrix};

use super::traits::Clusterer;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct KMeans {
    pub seed: u64,
    /// Independent k-means++ restarts
    pub n_init: usize,
    /// Lloyd iterations per restart
    pub max_iter: usize,
    /// Convergence threshold on centroid movement, relative to the mean
    /// per-feature variance of the data
    pub tol: f64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
        }
    }
}

/// Outcome of one restart.
struct Run {
    labels: Vec<usize>,
    inertia: f64,
    iterations: usize,
}

impl Clusterer for KMeans {
    fn fit_predict(&self, matrix: &Matrix, num_clusters: usize) -> AnalysisResult<Vec<usize>> {
        let n = matrix.rows();
        if num_clusters == 0 || num_clusters > n {
            return Err(AnalysisError::InvalidClusterCount {
                requested: num_clusters,
                documents: n,
            });
        }

        let points: Vec<&[f64]> = (0..n).map(|r| matrix.row(r)).collect();
        let tolerance = self.tol * mean_variance(&points);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<Run> = None;

        for restart in 0..self.n_init.max(1) {
            let centroids = kmeans_plus_plus(&points, num_clusters, &mut rng);
            let run = lloyd(&points, centroids, self.max_iter, tolerance);
            debug!(
                restart,
                inertia = run.inertia,
                iterations = run.iterations,
                "k-means restart finished"
            );
            if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
                best = Some(run);
            }
        }

        // n_init.max(1) guarantees at least one run
        Ok(best.map(|b| b.labels).unwrap_or_default())
    }
}

/// Average over features of the per-feature variance.
fn mean_variance(points: &[&[f64]]) -> f64 {
    let n = points.len() as f64;
    let dims = points.first().map_or(0, |p| p.len());
    if dims == 0 {
        return 0.0;
    }
    let total: f64 = (0..dims)
        .map(|d| {
            let mean = points.iter().map(|p| p[d]).sum::<f64>() / n;
            points.iter().map(|p| (p[d] - mean).powi(2)).sum::<f64>() / n
        })
        .sum();
    total / dims as f64
}

/// Greedy k-means++: each new centroid is the best of a few candidates
/// sampled proportionally to their squared distance from existing centroids.
fn kmeans_plus_plus(points: &[&[f64]], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let n = points.len();
    let local_trials = 2 + (k as f64).ln().floor() as usize;
    let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(k);

    let first = rng.random_range(0..n);
    centroids.push(points[first].to_vec());
    let mut closest: Vec<f64> = points
        .iter()
        .map(|p| squared_distance(p, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let potential: f64 = closest.iter().sum();

        let candidates: Vec<usize> = (0..local_trials)
            .map(|_| {
                if potential <= 0.0 {
                    rng.random_range(0..n)
                } else {
                    sample_weighted(&closest, potential, rng.random::<f64>())
                }
            })
            .collect();

        // Keep the candidate that lowers the total potential the most.
        let mut chosen: Option<(usize, Vec<f64>, f64)> = None;
        for candidate in candidates {
            let updated: Vec<f64> = points
                .iter()
                .zip(&closest)
                .map(|(p, &d)| d.min(squared_distance(p, points[candidate])))
                .collect();
            let candidate_potential: f64 = updated.iter().sum();
            if chosen
                .as_ref()
                .map_or(true, |(_, _, best)| candidate_potential < *best)
            {
                chosen = Some((candidate, updated, candidate_potential));
            }
        }

        if let Some((index, updated, _)) = chosen {
            centroids.push(points[index].to_vec());
            closest = updated;
        }
    }
    centroids
}

/// Index drawn with probability proportional to `weights[i]`.
fn sample_weighted(weights: &[f64], total: f64, unit: f64) -> usize {
    let target = unit * total;
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > target {
            return i;
        }
    }
    weights.len() - 1
}

/// Nearest centroid for each point (ties go to the lower index) and the
/// squared distance to it.
fn assign(points: &[&[f64]], centroids: &[Vec<f64>]) -> (Vec<usize>, Vec<f64>) {
    points
        .iter()
        .map(|p| {
            centroids
                .iter()
                .enumerate()
                .map(|(c, centroid)| (c, squared_distance(p, centroid)))
                .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
        })
        .unzip()
}

fn lloyd(points: &[&[f64]], mut centroids: Vec<Vec<f64>>, max_iter: usize, tolerance: f64) -> Run {
    let k = centroids.len();
    let dims = points.first().map_or(0, |p| p.len());
    let mut iterations = 0;

    for iter in 1..=max_iter {
        iterations = iter;
        let (labels, distances) = assign(points, &centroids);

        let mut sums = vec![vec![0.0; dims]; k];
        let mut counts = vec![0usize; k];
        for (p, &label) in points.iter().zip(&labels) {
            counts[label] += 1;
            for (s, x) in sums[label].iter_mut().zip(p.iter()) {
                *s += x;
            }
        }

        // Empty clusters take the points currently worst served.
        let mut far_first: Vec<usize> = (0..points.len()).collect();
        far_first.sort_by(|&a, &b| {
            distances[b]
                .partial_cmp(&distances[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut donors = far_first.into_iter();

        let mut shift = 0.0;
        for c in 0..k {
            let updated = if counts[c] > 0 {
                sums[c].iter().map(|s| s / counts[c] as f64).collect()
            } else {
                match donors.next() {
                    Some(i) => points[i].to_vec(),
                    None => centroids[c].clone(),
                }
            };
            shift += squared_distance(&centroids[c], &updated);
            centroids[c] = updated;
        }

        if shift <= tolerance {
            break;
        }
    }

    let (labels, distances) = assign(points, &centroids);
    Run {
        labels,
        inertia: distances.iter().sum(),
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Matrix {
        Matrix::from_rows(vec![
            vec![0.0, 0.1],
            vec![0.1, 0.0],
            vec![0.05, 0.05],
            vec![5.0, 5.1],
            vec![5.1, 5.0],
            vec![5.05, 4.95],
        ])
    }

    #[test]
    fn test_separates_blobs() {
        let labels = KMeans::default().fit_predict(&two_blobs(), 2).unwrap();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn test_reproducible() {
        let a = KMeans::default().fit_predict(&two_blobs(), 3).unwrap();
        let b = KMeans::default().fit_predict(&two_blobs(), 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_labels_in_range() {
        let labels = KMeans::default().fit_predict(&two_blobs(), 4).unwrap();
        assert_eq!(labels.len(), 6);
        assert!(labels.iter().all(|&l| l < 4));
    }

    #[test]
    fn test_k_equals_n_gives_distinct_labels() {
        let m = Matrix::from_rows(vec![vec![0.0], vec![10.0], vec![20.0]]);
        let mut labels = KMeans::default().fit_predict(&m, 3).unwrap();
        labels.sort();
        assert_eq!(labels, vec![0, 1, 2]);
    }

    #[test]
    fn test_identical_points() {
        let m = Matrix::from_rows(vec![vec![1.0, 1.0]; 4]);
        let labels = KMeans::default().fit_predict(&m, 2).unwrap();
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn test_invalid_counts() {
        let err = KMeans::default().fit_predict(&two_blobs(), 7).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidClusterCount {
                requested: 7,
                documents: 6
            }
        );
        assert!(KMeans::default().fit_predict(&two_blobs(), 0).is_err());
    }

    #[test]
    fn test_sample_weighted() {
        let w = [0.0, 1.0, 3.0];
        assert_eq!(sample_weighted(&w, 4.0, 0.0), 1);
        assert_eq!(sample_weighted(&w, 4.0, 0.5), 2);
        assert_eq!(sample_weighted(&w, 4.0, 0.999), 2);
    }
}
