use std::cmp::Ordering;

use num::Float;

use super::idf::TfIdfVector;

/// dot product
/// d(a, b) = Σ(a_i * b_i)
/// Merge-join over the sorted sparse terms; only matching axes
/// contribute.
///
/// # Panics
/// If the vectors were not built against the same global idf axes.
/// That is a programming error, never silently truncated or padded.
pub fn dot<N>(a: &TfIdfVector<N>, b: &TfIdfVector<N>) -> f64
where
    N: Float + Into<f64>,
{
    assert_eq!(
        a.dim(),
        b.dim(),
        "tf-idf vectors must share the same global idf axes"
    );
    let mut a_it = a.raw_iter().fuse();
    let mut b_it = b.raw_iter().fuse();
    let mut a_next = a_it.next();
    let mut b_next = b_it.next();
    let mut acc = 0_f64;
    while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
        match ia.cmp(&ib) {
            Ordering::Equal => {
                let (va, vb): (f64, f64) = (va.into(), vb.into());
                acc += va * vb;
                a_next = a_it.next();
                b_next = b_it.next();
            }
            Ordering::Less => a_next = a_it.next(),
            Ordering::Greater => b_next = b_it.next(),
        }
    }
    acc
}

/// squared Euclidean norm
/// ||a||^2 = d(a, a)
pub fn norm_sq<N>(a: &TfIdfVector<N>) -> f64
where
    N: Float + Into<f64>,
{
    a.raw_iter()
        .map(|(_, v)| {
            let v: f64 = v.into();
            v * v
        })
        .sum()
}

/// cosine similarity
/// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
///
/// Results:
/// - 0 for independent vectors (orthogonal)
/// - 1 for collinear vectors of positive coefficient
pub fn cosine_similarity<N>(a: &TfIdfVector<N>, b: &TfIdfVector<N>) -> f64
where
    N: Float + Into<f64>,
{
    cosine_with_norms(a, b, norm_sq(a), norm_sq(b))
}

/// Cosine similarity with both squared norms already known, so a memo
/// layer can avoid recomputing them per pair.
///
/// A zero norm on either side scores 0. That is a policy choice for
/// documents with no recognized tags, not a mathematical limit; it
/// keeps the division well-defined without an epsilon fudge.
pub fn cosine_with_norms<N>(
    a: &TfIdfVector<N>,
    b: &TfIdfVector<N>,
    norm_sq_a: f64,
    norm_sq_b: f64,
) -> f64
where
    N: Float + Into<f64>,
{
    if norm_sq_a == 0.0 || norm_sq_b == 0.0 {
        return 0.0;
    }
    dot(a, b) / (norm_sq_a * norm_sq_b).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::corpus::{TagSet, TagStats};
    use crate::similarity::idf::GlobalIdf;

    fn tag_set(tags: &[&str]) -> TagSet {
        tags.iter().map(|t| Box::<str>::from(*t)).collect()
    }

    fn vectors() -> (TfIdfVector, TfIdfVector, TfIdfVector) {
        let stats = TagStats::from_counts([("A", 2u64), ("B", 1), ("C", 1)], 3).unwrap();
        let idf: GlobalIdf = GlobalIdf::compute(&stats);
        (
            idf.vectorize(&tag_set(&["A", "B"])),
            idf.vectorize(&tag_set(&["A"])),
            idf.vectorize(&tag_set(&["C"])),
        )
    }

    #[test]
    fn dot_sums_matching_axes_only() {
        let (doc1, doc2, doc3) = vectors();
        let idf_a = (1.5f64).log10();
        assert!((dot(&doc1, &doc2) - idf_a * idf_a).abs() < 1e-12);
        assert_eq!(dot(&doc1, &doc3), 0.0);
        assert_eq!(dot(&doc2, &doc3), 0.0);
    }

    #[test]
    fn norm_sq_is_self_dot() {
        let (doc1, doc2, _) = vectors();
        assert!((norm_sq(&doc1) - dot(&doc1, &doc1)).abs() < 1e-12);
        assert!((norm_sq(&doc2) - dot(&doc2, &doc2)).abs() < 1e-12);
    }

    #[test]
    fn cosine_matches_the_worked_example() {
        let (doc1, doc2, doc3) = vectors();
        let idf_a = (1.5f64).log10();
        let idf_b = (3.0f64).log10();
        let expected = idf_a / (idf_a * idf_a + idf_b * idf_b).sqrt();

        assert!((cosine_similarity(&doc1, &doc2) - expected).abs() < 1e-12);
        assert!((cosine_similarity(&doc1, &doc2) - 0.346).abs() < 5e-4);
        assert_eq!(cosine_similarity(&doc1, &doc3), 0.0);
        assert_eq!(cosine_similarity(&doc2, &doc3), 0.0);
    }

    #[test]
    fn collinear_vectors_score_one() {
        let (doc1, _, _) = vectors();
        assert!((cosine_similarity(&doc1, &doc1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_vectors_score_zero_by_policy() {
        let stats = TagStats::from_counts([("A", 1u64)], 2).unwrap();
        let idf: GlobalIdf = GlobalIdf::compute(&stats);
        let zero = idf.vectorize(&tag_set(&[]));
        let other_zero = idf.vectorize(&tag_set(&["unknown"]));
        let nonzero = idf.vectorize(&tag_set(&["A"]));

        assert_eq!(cosine_similarity(&zero, &nonzero), 0.0);
        // even against another zero vector
        assert_eq!(cosine_similarity(&zero, &other_zero), 0.0);
    }

    #[test]
    #[should_panic(expected = "same global idf axes")]
    fn mismatched_axes_fail_loudly() {
        let stats_a = TagStats::from_counts([("A", 1u64)], 2).unwrap();
        let stats_b = TagStats::from_counts([("A", 1u64), ("B", 1)], 2).unwrap();
        let idf_a: GlobalIdf = GlobalIdf::compute(&stats_a);
        let idf_b: GlobalIdf = GlobalIdf::compute(&stats_b);
        let va = idf_a.vectorize(&tag_set(&["A"]));
        let vb = idf_b.vectorize(&tag_set(&["A"]));
        dot(&va, &vb);
    }
}
