// Seeded randomized truncated SVD (range-finder with power iterations).
//
// Sketch the column space with a seeded random test matrix, orthonormalize
// with QR, refine with a few power iterations, then take the exact SVD of
// the small projected matrix. The seed is the only source of randomness in
// the whole pipeline, so a fixed seed makes every downstream artifact
// reproducible.

use anyhow::Result;
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sprs::CsMat;

use super::{sparse_dense_mul, sparse_transpose_dense_mul};

/// Extra sketch columns beyond the requested rank.
const OVERSAMPLES: usize = 10;
/// QR-reorthonormalized power iterations to sharpen the spectrum.
const POWER_ITERATIONS: usize = 5;

/// A rank-k factorization A ≈ U · diag(S) · Vᵀ with S descending.
pub struct TruncatedSvd {
    /// Left singular vectors, one column per component (m × k).
    pub u: DMatrix<f64>,
    /// Singular values, descending and non-negative.
    pub singular_values: DVector<f64>,
    /// Right singular vectors, one row per component (k × n).
    pub vt: DMatrix<f64>,
}

impl TruncatedSvd {
    pub fn rank(&self) -> usize {
        self.singular_values.len()
    }

    /// The input rows projected into the component space: U · diag(S).
    pub fn transformed(&self) -> DMatrix<f64> {
        let mut out = self.u.clone();
        for j in 0..out.ncols() {
            let s = self.singular_values[j];
            for i in 0..out.nrows() {
                out[(i, j)] *= s;
            }
        }
        out
    }
}

/// Compute the top `k` singular components of a sparse matrix.
///
/// `k` is capped at the matrix's smaller dimension; callers that need an
/// exact component count must check `rank()` (or pre-validate the shape).
/// Fails on an empty matrix or `k == 0`.
pub fn truncated_svd(a: &CsMat<f64>, k: usize, seed: u64) -> Result<TruncatedSvd> {
    let (m, n) = (a.rows(), a.cols());
    if m == 0 || n == 0 {
        anyhow::bail!("Cannot decompose an empty {}x{} matrix", m, n);
    }
    if k == 0 {
        anyhow::bail!("Requested 0 SVD components");
    }
    let min_dim = m.min(n);
    let k_eff = k.min(min_dim);
    let sketch = (k_eff + OVERSAMPLES).min(min_dim);

    // Seeded test matrix; uniform in [-1, 1).
    let mut rng = StdRng::seed_from_u64(seed);
    let omega = DMatrix::from_fn(n, sketch, |_, _| rng.random::<f64>() * 2.0 - 1.0);

    let mut q = sparse_dense_mul(a, &omega).qr().q();
    for _ in 0..POWER_ITERATIONS {
        let w = sparse_transpose_dense_mul(a, &q).qr().q();
        q = sparse_dense_mul(a, &w).qr().q();
    }

    // Project to the small matrix B = Qᵀ·A and decompose it exactly.
    let b = sparse_transpose_dense_mul(a, &q).transpose();
    let svd = b.svd(true, true);
    let (u_b, vt_b) = match (svd.u, svd.v_t) {
        (Some(u), Some(vt)) => (u, vt),
        _ => anyhow::bail!("SVD of the projected matrix did not converge"),
    };

    let k_eff = k_eff.min(svd.singular_values.len());
    let u = (&q * &u_b).columns(0, k_eff).into_owned();
    let singular_values = svd.singular_values.rows(0, k_eff).into_owned();
    let vt = vt_b.rows(0, k_eff).into_owned();

    Ok(TruncatedSvd {
        u,
        singular_values,
        vt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::TriMat;

    fn dense_of(a: &CsMat<f64>) -> DMatrix<f64> {
        let mut out = DMatrix::zeros(a.rows(), a.cols());
        for (row_idx, row) in a.outer_iterator().enumerate() {
            for (&col, &val) in row.indices().iter().zip(row.data().iter()) {
                out[(row_idx, col)] = val;
            }
        }
        out
    }

    fn sample_matrix() -> CsMat<f64> {
        let mut tri = TriMat::new((4, 3));
        tri.add_triplet(0, 0, 2.0);
        tri.add_triplet(0, 1, 1.0);
        tri.add_triplet(1, 0, 1.0);
        tri.add_triplet(1, 2, 3.0);
        tri.add_triplet(2, 1, 4.0);
        tri.add_triplet(3, 2, 1.0);
        tri.add_triplet(3, 0, 0.5);
        tri.to_csr()
    }

    #[test]
    fn test_full_rank_reconstruction() {
        let a = sample_matrix();
        let svd = truncated_svd(&a, 3, 42).unwrap();
        assert_eq!(svd.rank(), 3);

        let reconstructed =
            &svd.u * DMatrix::from_diagonal(&svd.singular_values) * &svd.vt;
        let err = (dense_of(&a) - reconstructed).norm();
        assert!(err < 1e-8, "reconstruction error {err}");
    }

    #[test]
    fn test_singular_values_descending() {
        let svd = truncated_svd(&sample_matrix(), 3, 42).unwrap();
        for i in 1..svd.rank() {
            assert!(svd.singular_values[i - 1] >= svd.singular_values[i]);
            assert!(svd.singular_values[i] >= 0.0);
        }
    }

    #[test]
    fn test_u_columns_orthonormal() {
        let svd = truncated_svd(&sample_matrix(), 2, 42).unwrap();
        let gram = svd.u.transpose() * &svd.u;
        let identity = DMatrix::<f64>::identity(2, 2);
        assert!((gram - identity).norm() < 1e-8);
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = sample_matrix();
        let first = truncated_svd(&a, 2, 7).unwrap();
        let second = truncated_svd(&a, 2, 7).unwrap();
        assert_eq!(first.u, second.u);
        assert_eq!(first.singular_values, second.singular_values);
        assert_eq!(first.vt, second.vt);
    }

    #[test]
    fn test_component_count_capped_by_shape() {
        let svd = truncated_svd(&sample_matrix(), 50, 42).unwrap();
        assert_eq!(svd.rank(), 3);
    }

    #[test]
    fn test_transformed_shape() {
        let svd = truncated_svd(&sample_matrix(), 2, 42).unwrap();
        let projected = svd.transformed();
        assert_eq!(projected.nrows(), 4);
        assert_eq!(projected.ncols(), 2);
    }

    #[test]
    fn test_zero_components_rejected() {
        assert!(truncated_svd(&sample_matrix(), 0, 42).is_err());
    }
}
