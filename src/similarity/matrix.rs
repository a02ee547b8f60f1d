use std::collections::HashMap;

use ahash::RandomState;
use dashmap::DashMap;
use num::Float;
use rayon::prelude::*;

use super::compare;
use super::idf::TfIdfVector;

/// Run-scoped memo for pairwise cosine scores.
///
/// Documents with identical recognized-tag sets share one interned
/// vector id, so the cache is keyed by the canonical (low, high) id
/// pair and computing (A, B) and (B, A) hits the same entry. Squared
/// norms are computed once per distinct vector up front.
///
/// Entries are write-once per key and idempotent: two rayon workers
/// racing on the same pair compute the same value, so the duplicate
/// work is wasted but harmless. The cache lives for one matrix build
/// and is dropped with it.
struct CosineCache {
    /// squared norm per vector id
    norms: Vec<f64>,
    scores: DashMap<(u32, u32), f64, RandomState>,
}

impl CosineCache {
    fn new(norms: Vec<f64>) -> Self {
        Self {
            norms,
            scores: DashMap::with_hasher(RandomState::new()),
        }
    }

    fn score<N>(&self, id_a: u32, a: &TfIdfVector<N>, id_b: u32, b: &TfIdfVector<N>) -> f64
    where
        N: Float + Into<f64>,
    {
        let key = if id_a <= id_b {
            (id_a, id_b)
        } else {
            (id_b, id_a)
        };
        if let Some(hit) = self.scores.get(&key) {
            return *hit;
        }
        let value = compare::cosine_with_norms(
            a,
            b,
            self.norms[id_a as usize],
            self.norms[id_b as usize],
        );
        self.scores.insert(key, value);
        value
    }
}

/// Symmetric pairwise cosine scores over one corpus snapshot.
///
/// One dense row per document in corpus order; `get(a, b)` and
/// `get(b, a)` answer the same score. The self slot of each row is 0
/// and excluded from selection.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Number of documents covered.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Score of one document pair by corpus index.
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.rows[a][b]
    }

    /// Full row of one document, indexed by corpus order.
    pub fn row(&self, doc: usize) -> &[f64] {
        &self.rows[doc]
    }
}

/// Compute the cosine similarity of every unordered pair of distinct
/// documents exactly once and record it symmetrically.
///
/// n * (n - 1) / 2 pairs dominate the cost of the whole run; pairs are
/// independent once the vectors exist, so they are scored in parallel.
/// Each pair contributes one entry, written to both triangle slots
/// after the parallel pass.
pub fn build_similarity_matrix<N>(vectors: &[TfIdfVector<N>]) -> SimilarityMatrix
where
    N: Float + Into<f64> + Send + Sync,
{
    let n = vectors.len();

    // Intern vectors by their axis index set; equal tag subsets mean
    // equal vectors because all weights come from the shared global idf.
    let mut interned: HashMap<Vec<u32>, u32, RandomState> =
        HashMap::with_hasher(RandomState::new());
    let mut vec_ids: Vec<u32> = Vec::with_capacity(n);
    let mut representatives: Vec<usize> = Vec::new();
    for (doc, vector) in vectors.iter().enumerate() {
        let next_id = representatives.len() as u32;
        let id = *interned.entry(vector.axis_ids()).or_insert_with(|| {
            representatives.push(doc);
            next_id
        });
        vec_ids.push(id);
    }

    let norms: Vec<f64> = representatives
        .iter()
        .map(|&doc| compare::norm_sq(&vectors[doc]))
        .collect();
    let cache = CosineCache::new(norms);

    let cache = &cache;
    let vec_ids = &vec_ids;
    let representatives = &representatives;
    let pair_scores: Vec<(usize, usize, f64)> = (0..n)
        .into_par_iter()
        .flat_map_iter(move |i| {
            ((i + 1)..n).map(move |j| {
                let (id_a, id_b) = (vec_ids[i], vec_ids[j]);
                // score through the representatives so both orders of a
                // pair feed the cache identical operands
                let score = cache.score(
                    id_a,
                    &vectors[representatives[id_a as usize]],
                    id_b,
                    &vectors[representatives[id_b as usize]],
                );
                (i, j, score)
            })
        })
        .collect();

    let mut rows = vec![vec![0.0; n]; n];
    for (i, j, score) in pair_scores {
        rows[i][j] = score;
        rows[j][i] = score;
    }
    SimilarityMatrix { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::corpus::{TagSet, TagStats};
    use crate::similarity::idf::GlobalIdf;

    fn tag_set(tags: &[&str]) -> TagSet {
        tags.iter().map(|t| Box::<str>::from(*t)).collect()
    }

    fn build(docs: &[&[&str]]) -> SimilarityMatrix {
        let sets: Vec<TagSet> = docs.iter().map(|tags| tag_set(tags)).collect();
        let stats = TagStats::from_documents(sets.iter());
        let idf: GlobalIdf = GlobalIdf::compute(&stats);
        let vectors: Vec<_> = sets.iter().map(|tags| idf.vectorize(tags)).collect();
        build_similarity_matrix(&vectors)
    }

    #[test]
    fn matrix_is_symmetric_and_bounded() {
        let matrix = build(&[
            &["a", "b"],
            &["a"],
            &["c"],
            &["a", "b", "c"],
            &["b", "c"],
        ]);
        for i in 0..matrix.len() {
            for j in 0..matrix.len() {
                let score = matrix.get(i, j);
                assert_eq!(score, matrix.get(j, i), "asymmetry at ({i}, {j})");
                assert!((0.0..=1.0).contains(&score), "score {score} out of bounds");
            }
        }
    }

    #[test]
    fn identical_tag_sets_score_one() {
        let matrix = build(&[&["a", "b"], &["a", "b"], &["c"]]);
        assert!((matrix.get(0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_documents_score_zero_everywhere() {
        let matrix = build(&[&["a"], &[], &[], &["a", "b"]]);
        for other in [0, 2, 3] {
            assert_eq!(matrix.get(1, other), 0.0);
        }
    }

    #[test]
    fn worked_example_scores() {
        let matrix = build(&[&["A", "B"], &["A"], &["C"]]);
        assert!((matrix.get(0, 1) - 0.346).abs() < 5e-4);
        assert_eq!(matrix.get(0, 2), 0.0);
        assert_eq!(matrix.get(1, 2), 0.0);
    }

    #[test]
    fn empty_and_single_document_corpora() {
        let matrix = build_similarity_matrix::<f64>(&[]);
        assert!(matrix.is_empty());

        let matrix = build(&[&["a"]]);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.get(0, 0), 0.0);
    }

    #[test]
    fn matches_the_unmemoized_computation() {
        let docs: &[&[&str]] = &[
            &["a", "b"],
            &["a"],
            &["a", "b"],
            &["b", "c"],
            &["a"],
        ];
        let sets: Vec<TagSet> = docs.iter().map(|tags| tag_set(tags)).collect();
        let stats = TagStats::from_documents(sets.iter());
        let idf: GlobalIdf = GlobalIdf::compute(&stats);
        let vectors: Vec<_> = sets.iter().map(|tags| idf.vectorize(tags)).collect();
        let matrix = build_similarity_matrix(&vectors);

        for i in 0..vectors.len() {
            for j in (i + 1)..vectors.len() {
                let direct = compare::cosine_similarity(&vectors[i], &vectors[j]);
                assert_eq!(matrix.get(i, j), direct, "divergence at ({i}, {j})");
            }
        }
    }
}
