// Phrase embeddings for clustering.
//
// Each phrase is vectorized as its own tiny document (TF-IDF over the
// phrase strings, no document-frequency filtering), reduced to a compact
// latent space with the seeded truncated SVD when the term space has
// more than one dimension, then L2-normalized so cosine geometry is
// well-behaved.

use anyhow::Result;
use nalgebra::DMatrix;

use crate::keywords::tfidf::{TfidfModel, TfidfOptions};
use crate::keywords::tokenizer::TermTokenizer;
use crate::math::svd::truncated_svd;

/// Cap on latent dimensions for phrase embeddings.
pub const MAX_EMBEDDING_COMPONENTS: usize = 50;

/// Embed phrases as L2-normalized dense vectors.
///
/// Fails when the phrase-level vocabulary is empty (every selected
/// phrase tokenized to nothing) — clustering garbage would be worse
/// than stopping. Phrases that individually tokenize to nothing embed
/// as zero vectors and sit at maximum cosine distance from everything.
pub fn embed_phrases(
    phrases: &[String],
    tokenizer: &TermTokenizer,
    seed: u64,
) -> Result<Vec<Vec<f64>>> {
    let model = TfidfModel::fit(phrases, tokenizer, &TfidfOptions::unfiltered())?;
    let dims = model.n_terms();

    let dense: DMatrix<f64> = if dims > 1 {
        let components = MAX_EMBEDDING_COMPONENTS.min(dims - 1);
        truncated_svd(model.matrix(), components, seed)?.transformed()
    } else {
        // One-dimensional term space: the raw weights are the embedding.
        let mut out = DMatrix::zeros(phrases.len(), 1);
        for (row_idx, row) in model.matrix().outer_iterator().enumerate() {
            for (&col, &val) in row.indices().iter().zip(row.data().iter()) {
                out[(row_idx, col)] = val;
            }
        }
        out
    };

    let mut vectors = Vec::with_capacity(dense.nrows());
    for i in 0..dense.nrows() {
        let mut vector: Vec<f64> = (0..dense.ncols()).map(|j| dense[(i, j)]).collect();
        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vectors.push(vector);
    }
    Ok(vectors)
}

/// Cosine distance between two vectors, in [0, 2].
///
/// A zero vector is at distance 1.0 from everything (no direction, no
/// agreement), which keeps stopword-only phrases in their own clusters.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    (1.0 - dot / (norm_a * norm_b)).clamp(0.0, 2.0)
}
