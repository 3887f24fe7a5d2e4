// Shared numeric kernels — sparse/dense products and the seeded
// truncated SVD used by phrase embedding and topic-model initialization.

pub mod svd;

use nalgebra::DMatrix;
use sprs::CsMat;

/// Dense product of a sparse CSR matrix and a dense matrix: A · B.
pub fn sparse_dense_mul(a: &CsMat<f64>, b: &DMatrix<f64>) -> DMatrix<f64> {
    let mut out = DMatrix::zeros(a.rows(), b.ncols());
    for (row_idx, row) in a.outer_iterator().enumerate() {
        for (&col, &val) in row.indices().iter().zip(row.data().iter()) {
            for j in 0..b.ncols() {
                out[(row_idx, j)] += val * b[(col, j)];
            }
        }
    }
    out
}

/// Dense product of a sparse CSR matrix's transpose and a dense matrix:
/// Aᵀ · B, computed without materializing the transpose.
pub fn sparse_transpose_dense_mul(a: &CsMat<f64>, b: &DMatrix<f64>) -> DMatrix<f64> {
    let mut out = DMatrix::zeros(a.cols(), b.ncols());
    for (row_idx, row) in a.outer_iterator().enumerate() {
        for (&col, &val) in row.indices().iter().zip(row.data().iter()) {
            for j in 0..b.ncols() {
                out[(col, j)] += val * b[(row_idx, j)];
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::TriMat;

    fn small_matrix() -> CsMat<f64> {
        // [[1, 0, 2],
        //  [0, 3, 0]]
        let mut tri = TriMat::new((2, 3));
        tri.add_triplet(0, 0, 1.0);
        tri.add_triplet(0, 2, 2.0);
        tri.add_triplet(1, 1, 3.0);
        tri.to_csr()
    }

    #[test]
    fn test_sparse_dense_mul() {
        let a = small_matrix();
        let b = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let out = sparse_dense_mul(&a, &b);
        assert_eq!(out, DMatrix::from_row_slice(2, 2, &[3.0, 2.0, 0.0, 3.0]));
    }

    #[test]
    fn test_sparse_transpose_dense_mul() {
        let a = small_matrix();
        let b = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let out = sparse_transpose_dense_mul(&a, &b);
        assert_eq!(
            out,
            DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 9.0, 12.0, 2.0, 4.0])
        );
    }
}
