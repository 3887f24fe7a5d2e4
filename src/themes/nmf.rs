// Non-negative matrix factorization.
//
// V (documents × terms) ≈ W (documents × topics) · H (topics × terms),
// all entries non-negative. Initialization is NNDSVD — the truncated
// SVD's sign-split factors — which is fully deterministic given the
// seeded SVD, so a fixed seed reproduces the same topics. Multiplicative
// updates then refine both factors until the Frobenius error stops
// improving or the iteration cap is hit.

use anyhow::Result;
use nalgebra::DMatrix;
use sprs::CsMat;
use tracing::debug;

use crate::math::svd::truncated_svd;
use crate::math::{sparse_dense_mul, sparse_transpose_dense_mul};

const MAX_ITERATIONS: usize = 200;
/// Relative-improvement cutoff, checked every 10 iterations.
const TOLERANCE: f64 = 1e-4;
/// Keeps update denominators away from zero.
const EPSILON: f64 = 1e-10;
/// NNDSVD floor: multiplicative updates cannot move an exact zero, so
/// zero-split entries start at a small positive value instead.
const INIT_FLOOR: f64 = 1e-6;

/// A fitted factorization.
pub struct Nmf {
    /// Document-topic weights (documents × topics).
    pub w: DMatrix<f64>,
    /// Topic-term weights (topics × terms).
    pub h: DMatrix<f64>,
}

/// Factorize a non-negative sparse matrix into `n_topics` components.
///
/// Fails when `n_topics` exceeds the feasible rank min(documents,
/// terms) — a model squeezed past that would be meaningless, and the
/// initialization SVD could not supply enough components.
pub fn factorize(v: &CsMat<f64>, n_topics: usize, seed: u64) -> Result<Nmf> {
    let (n_docs, n_terms) = (v.rows(), v.cols());
    let feasible = n_docs.min(n_terms);
    if n_topics > feasible {
        anyhow::bail!(
            "Cannot fit {} topics over {} documents and {} terms — at most {} supported",
            n_topics,
            n_docs,
            n_terms,
            feasible
        );
    }

    let (mut w, mut h) = nndsvd_init(v, n_topics, seed)?;

    let norm_v_sq = sparse_frobenius_sq(v);
    let mut error_at_init = None;
    let mut previous_error = f64::INFINITY;

    for iteration in 0..MAX_ITERATIONS {
        // W update: W ∘ (V·Hᵀ) / (W·H·Hᵀ)
        let v_ht = sparse_dense_mul(v, &h.transpose());
        let h_ht = &h * h.transpose();
        let w_denominator = (&w * &h_ht).add_scalar(EPSILON);
        w = w.component_mul(&v_ht).component_div(&w_denominator);

        // H update: H ∘ (Wᵀ·V) / (Wᵀ·W·H)
        let wt_v = sparse_transpose_dense_mul(v, &w).transpose();
        let wt_w = w.transpose() * &w;
        let h_denominator = (&wt_w * &h).add_scalar(EPSILON);
        h = h.component_mul(&wt_v).component_div(&h_denominator);

        if (iteration + 1) % 10 == 0 {
            let error = reconstruction_error(v, norm_v_sq, &w, &h);
            match error_at_init {
                None => {
                    error_at_init = Some(error.max(EPSILON));
                    previous_error = error;
                }
                Some(initial) => {
                    if (previous_error - error) / initial < TOLERANCE {
                        debug!(iteration, error, "NMF converged");
                        break;
                    }
                    previous_error = error;
                }
            }
        }
    }

    Ok(Nmf { w, h })
}

/// NNDSVD initialization (Boutsidis & Gallopoulos).
///
/// Each singular triple is split into its positive and negative parts;
/// whichever part carries more mass seeds the corresponding W column
/// and H row. Exact zeros are floored so the updates can escape them.
fn nndsvd_init(v: &CsMat<f64>, k: usize, seed: u64) -> Result<(DMatrix<f64>, DMatrix<f64>)> {
    let svd = truncated_svd(v, k, seed)?;
    if svd.rank() < k {
        anyhow::bail!(
            "Initialization SVD produced only {} of {} requested components",
            svd.rank(),
            k
        );
    }

    let (m, n) = (v.rows(), v.cols());
    let mut w = DMatrix::zeros(m, k);
    let mut h = DMatrix::zeros(k, n);

    // Leading triple of a non-negative matrix is single-signed up to a
    // global flip; take magnitudes.
    let s0_sqrt = svd.singular_values[0].max(0.0).sqrt();
    for i in 0..m {
        w[(i, 0)] = s0_sqrt * svd.u[(i, 0)].abs();
    }
    for j in 0..n {
        h[(0, j)] = s0_sqrt * svd.vt[(0, j)].abs();
    }

    for c in 1..k {
        let u_col: Vec<f64> = (0..m).map(|i| svd.u[(i, c)]).collect();
        let v_row: Vec<f64> = (0..n).map(|j| svd.vt[(c, j)]).collect();

        let norm = |values: &[f64], positive: bool| -> f64 {
            values
                .iter()
                .map(|&x| if positive { x.max(0.0) } else { (-x).max(0.0) })
                .map(|x| x * x)
                .sum::<f64>()
                .sqrt()
        };
        let (u_pos, u_neg) = (norm(&u_col, true), norm(&u_col, false));
        let (v_pos, v_neg) = (norm(&v_row, true), norm(&v_row, false));

        let sigma = svd.singular_values[c].max(0.0);
        let positive_mass = u_pos * v_pos;
        let negative_mass = u_neg * v_neg;

        if positive_mass >= negative_mass && positive_mass > 0.0 {
            let scale = (sigma * positive_mass).sqrt();
            for i in 0..m {
                w[(i, c)] = scale * u_col[i].max(0.0) / u_pos;
            }
            for j in 0..n {
                h[(c, j)] = scale * v_row[j].max(0.0) / v_pos;
            }
        } else if negative_mass > 0.0 {
            let scale = (sigma * negative_mass).sqrt();
            for i in 0..m {
                w[(i, c)] = scale * (-u_col[i]).max(0.0) / u_neg;
            }
            for j in 0..n {
                h[(c, j)] = scale * (-v_row[j]).max(0.0) / v_neg;
            }
        }
    }

    for value in w.iter_mut() {
        if *value < INIT_FLOOR {
            *value = INIT_FLOOR;
        }
    }
    for value in h.iter_mut() {
        if *value < INIT_FLOOR {
            *value = INIT_FLOOR;
        }
    }

    Ok((w, h))
}

fn sparse_frobenius_sq(v: &CsMat<f64>) -> f64 {
    v.data().iter().map(|x| x * x).sum()
}

/// ||V - W·H||_F without materializing the dense product:
/// ||V||² - 2·⟨V, WH⟩ + tr((WᵀW)(HHᵀ)).
fn reconstruction_error(v: &CsMat<f64>, norm_v_sq: f64, w: &DMatrix<f64>, h: &DMatrix<f64>) -> f64 {
    let k = w.ncols();

    let mut cross = 0.0;
    for (row_idx, row) in v.outer_iterator().enumerate() {
        for (&col, &val) in row.indices().iter().zip(row.data().iter()) {
            let mut wh = 0.0;
            for c in 0..k {
                wh += w[(row_idx, c)] * h[(c, col)];
            }
            cross += val * wh;
        }
    }

    let wt_w = w.transpose() * w;
    let h_ht = h * h.transpose();
    let norm_wh_sq = (&wt_w * &h_ht).trace();

    (norm_v_sq - 2.0 * cross + norm_wh_sq).max(0.0).sqrt()
}
