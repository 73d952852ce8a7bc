// Non-negative matrix factorization.
//
// Initialization is NNDSVD-a (Boutsidis & Gallopoulos): the leading singular
// triplets of X are split into their positive and negative parts, the
// dominant part of each becomes a column of W and a row of H, and zeros are
// replaced by the mean of X so multiplicative updates can move them.
//
// The singular triplets come from a Jacobi eigendecomposition of the smaller
// Gram matrix (X·Xᵀ or Xᵀ·X). Everything is deterministic; there is no
// random state anywhere in the factorization.
//
// Updates are the Lee & Seung multiplicative rules for the Frobenius loss:
//
//   H ← H ∘ (Wᵀ X) / (Wᵀ W H)
//   W ← W ∘ (X Hᵀ) / (W H Hᵀ)

use tracing::debug;

use crate::error::{AnalysisError, AnalysisResult};
use crate::vectorize::matrix::{norm, Matrix};

use super::traits::{Factorization, TopicFactorizer};

/// Guards divisions in the update rules.
const EPSILON: f64 = 1e-10;
/// Values at or below this are treated as zero after initialization.
const ZERO_THRESHOLD: f64 = 1e-12;
/// Convergence is checked every this many iterations.
const CHECK_EVERY: usize = 10;

#[derive(Debug, Clone)]
pub struct NmfFactorizer {
    pub max_iter: usize,
    /// Stop when the error improvement relative to the initial error drops
    /// below this
    pub tol: f64,
}

impl Default for NmfFactorizer {
    fn default() -> Self {
        Self {
            max_iter: 200,
            tol: 1e-4,
        }
    }
}

impl TopicFactorizer for NmfFactorizer {
    fn factorize(&self, x: &Matrix, num_topics: usize) -> AnalysisResult<Factorization> {
        if num_topics == 0 {
            return Err(AnalysisError::ModelFitting(
                "number of topics must be at least 1".to_string(),
            ));
        }
        if num_topics > x.cols() {
            return Err(AnalysisError::ModelFitting(format!(
                "{num_topics} topics requested but the vocabulary has only {} terms",
                x.cols()
            )));
        }
        if x.values().iter().any(|v| *v < 0.0) {
            return Err(AnalysisError::ModelFitting(
                "term matrix has negative entries".to_string(),
            ));
        }
        if x.values().iter().all(|v| *v == 0.0) {
            return Err(AnalysisError::ModelFitting(
                "term matrix is all zeros".to_string(),
            ));
        }

        let (mut w, mut h) = nndsvda(x, num_topics);
        let initial_error = x.distance(&w.matmul(&h));
        let mut previous_error = initial_error;
        let mut error = initial_error;
        let mut iterations = 0;

        for iter in 1..=self.max_iter {
            iterations = iter;
            update_h(x, &w, &mut h);
            update_w(x, &mut w, &h);

            if iter % CHECK_EVERY == 0 {
                error = x.distance(&w.matmul(&h));
                if initial_error > 0.0 && (previous_error - error) / initial_error < self.tol {
                    break;
                }
                previous_error = error;
            }
        }
        if iterations % CHECK_EVERY != 0 {
            error = x.distance(&w.matmul(&h));
        }

        debug!(
            topics = num_topics,
            iterations,
            reconstruction_error = error,
            "NMF converged"
        );

        Ok(Factorization {
            document_topics: w,
            components: h,
            reconstruction_error: error,
            iterations,
        })
    }
}

fn update_h(x: &Matrix, w: &Matrix, h: &mut Matrix) {
    let wt = w.transpose();
    let numerator = wt.matmul(x);
    let denominator = wt.matmul(w).matmul(h);
    multiply_ratio(h, &numerator, &denominator);
}

fn update_w(x: &Matrix, w: &mut Matrix, h: &Matrix) {
    let ht = h.transpose();
    let numerator = x.matmul(&ht);
    let denominator = w.matmul(&h.matmul(&ht));
    multiply_ratio(w, &numerator, &denominator);
}

/// `target ← target ∘ numerator / (denominator + ε)`
fn multiply_ratio(target: &mut Matrix, numerator: &Matrix, denominator: &Matrix) {
    for ((t, n), d) in target
        .values_mut()
        .iter_mut()
        .zip(numerator.values())
        .zip(denominator.values())
    {
        *t *= n / (d + EPSILON);
    }
}

/// NNDSVD initialization with zeros filled by the mean of `x`.
fn nndsvda(x: &Matrix, k: usize) -> (Matrix, Matrix) {
    let (rows, cols) = (x.rows(), x.cols());
    let svd = truncated_svd(x, k);
    let mut w = Matrix::zeros(rows, k);
    let mut h = Matrix::zeros(k, cols);

    for j in 0..k {
        let (u, s, v) = (&svd.u[j], svd.s[j], &svd.v[j]);
        if s <= ZERO_THRESHOLD {
            continue;
        }

        let (wu, hv) = if j == 0 {
            let scale = s.sqrt();
            (
                u.iter().map(|e| scale * e.abs()).collect::<Vec<_>>(),
                v.iter().map(|e| scale * e.abs()).collect::<Vec<_>>(),
            )
        } else {
            let (up, un) = split_signs(u);
            let (vp, vn) = split_signs(v);
            let (up_norm, un_norm) = (norm(&up), norm(&un));
            let (vp_norm, vn_norm) = (norm(&vp), norm(&vn));
            let positive = up_norm * vp_norm;
            let negative = un_norm * vn_norm;

            let (a, a_norm, b, b_norm, sigma) = if positive > negative {
                (up, up_norm, vp, vp_norm, positive)
            } else {
                (un, un_norm, vn, vn_norm, negative)
            };
            if sigma <= ZERO_THRESHOLD {
                continue;
            }
            let scale = (s * sigma).sqrt();
            (
                a.iter().map(|e| scale * e / a_norm).collect(),
                b.iter().map(|e| scale * e / b_norm).collect(),
            )
        };

        for (r, value) in wu.into_iter().enumerate() {
            w.set(r, j, value);
        }
        h.row_mut(j).copy_from_slice(&hv);
    }

    let mean = x.mean();
    for value in w.values_mut().iter_mut().chain(h.values_mut().iter_mut()) {
        if *value <= ZERO_THRESHOLD {
            *value = mean;
        }
    }
    (w, h)
}

fn split_signs(v: &[f64]) -> (Vec<f64>, Vec<f64>) {
    (
        v.iter().map(|e| e.max(0.0)).collect(),
        v.iter().map(|e| (-e).max(0.0)).collect(),
    )
}

/// Leading singular triplets, largest first. Missing triplets (beyond the
/// rank of the matrix) are all-zero.
struct Svd {
    u: Vec<Vec<f64>>,
    s: Vec<f64>,
    v: Vec<Vec<f64>>,
}

fn truncated_svd(x: &Matrix, k: usize) -> Svd {
    let (rows, cols) = (x.rows(), x.cols());
    let xt = x.transpose();
    // Decompose whichever Gram matrix is smaller, then recover the other
    // side's singular vectors through X or Xᵀ.
    let small_is_rows = rows <= cols;
    let gram = if small_is_rows { x.matmul(&xt) } else { xt.matmul(x) };
    let (eigenvalues, eigenvectors) = symmetric_eigen(&gram);

    let mut svd = Svd {
        u: vec![vec![0.0; rows]; k],
        s: vec![0.0; k],
        v: vec![vec![0.0; cols]; k],
    };

    for j in 0..k.min(eigenvalues.len()) {
        let sigma = eigenvalues[j].max(0.0).sqrt();
        if sigma <= ZERO_THRESHOLD {
            continue;
        }
        let small = eigenvectors.column(j);
        let small_as_matrix = Matrix::from_rows(small.iter().map(|e| vec![*e]).collect());
        let projected = if small_is_rows {
            xt.matmul(&small_as_matrix)
        } else {
            x.matmul(&small_as_matrix)
        };
        let other: Vec<f64> = projected.column(0).into_iter().map(|e| e / sigma).collect();

        svd.s[j] = sigma;
        if small_is_rows {
            svd.u[j] = small;
            svd.v[j] = other;
        } else {
            svd.u[j] = other;
            svd.v[j] = small;
        }
    }
    svd
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Returns eigenvalues in descending order and the matching eigenvectors as
/// the columns of the second matrix.
fn symmetric_eigen(a: &Matrix) -> (Vec<f64>, Matrix) {
    let n = a.rows();
    let mut a = a.clone();
    let mut v = Matrix::zeros(n, n);
    for i in 0..n {
        v.set(i, i, 1.0);
    }

    for _sweep in 0..100 {
        let off_diagonal: f64 = (0..n)
            .flat_map(|p| (0..n).filter(move |&q| q != p).map(move |q| (p, q)))
            .map(|(p, q)| a.get(p, q).powi(2))
            .sum();
        if off_diagonal < 1e-22 {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a.get(p, q);
                if apq.abs() < 1e-300 {
                    continue;
                }
                let theta = (a.get(q, q) - a.get(p, p)) / (2.0 * apq);
                let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
                let t = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let (akp, akq) = (a.get(k, p), a.get(k, q));
                    a.set(k, p, c * akp - s * akq);
                    a.set(k, q, s * akp + c * akq);
                }
                for k in 0..n {
                    let (apk, aqk) = (a.get(p, k), a.get(q, k));
                    a.set(p, k, c * apk - s * aqk);
                    a.set(q, k, s * apk + c * aqk);
                }
                for k in 0..n {
                    let (vkp, vkq) = (v.get(k, p), v.get(k, q));
                    v.set(k, p, c * vkp - s * vkq);
                    v.set(k, q, s * vkp + c * vkq);
                }
            }
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        a.get(j, j)
            .partial_cmp(&a.get(i, i))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(i.cmp(&j))
    });

    let eigenvalues = order.iter().map(|&i| a.get(i, i)).collect();
    let mut vectors = Matrix::zeros(n, n);
    for (new_col, &old_col) in order.iter().enumerate() {
        for r in 0..n {
            vectors.set(r, new_col, v.get(r, old_col));
        }
    }
    (eigenvalues, vectors)
}
