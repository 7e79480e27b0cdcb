//! Embedding similarity scoring.

/// Norm guard for zero embeddings.
pub const EPSILON: f32 = 1e-8;

/// Cosine similarity with an epsilon-guarded denominator:
///
/// ```text
/// sim(x, y) = (x · y) / ((‖x‖ + ε)(‖y‖ + ε))
/// ```
///
/// Symmetric and bounded in [-1, 1] (strictly inside, because of ε). A zero
/// vector scores 0 against everything instead of producing NaN.
pub fn cosine_similarity(x: &[f32], y: &[f32]) -> f32 {
    debug_assert_eq!(x.len(), y.len(), "embedding dimensions must match");

    let dot: f32 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let norm_x: f32 = x.iter().map(|a| a * a).sum::<f32>().sqrt();
    let norm_y: f32 = y.iter().map(|b| b * b).sum::<f32>().sqrt();

    dot / ((norm_x + EPSILON) * (norm_y + EPSILON))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_vectors_score_one() {
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![2.0, 4.0, 6.0];
        assert!((cosine_similarity(&x, &y) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn opposite_vectors_score_minus_one() {
        let x = vec![1.0, 0.0];
        let y = vec![-1.0, 0.0];
        assert!((cosine_similarity(&x, &y) + 1.0).abs() < 1e-5);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let x = vec![1.0, 0.0];
        let y = vec![0.0, 1.0];
        assert!(cosine_similarity(&x, &y).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_is_guarded() {
        let x = vec![0.0, 0.0, 0.0];
        let y = vec![3.0, -1.0, 2.0];
        let s = cosine_similarity(&x, &y);
        assert!(s.is_finite());
        assert_eq!(s, 0.0);
    }

    #[test]
    fn symmetric() {
        let x = vec![0.3, -1.2, 0.8];
        let y = vec![-0.5, 0.1, 2.0];
        assert_eq!(cosine_similarity(&x, &y), cosine_similarity(&y, &x));
    }
}
