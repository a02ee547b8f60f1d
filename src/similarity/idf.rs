use indexmap::IndexMap;
use num::Float;
use serde::Serialize;

use super::corpus::{TagSet, TagStats};

/// Shared coordinate axes of one run: one (tag, idf) pair per distinct
/// tag, in frequency-table order.
///
/// Every vector of the run is laid out against these axes, so the order
/// must not change between `vectorize` calls; it is frozen at
/// construction.
///
/// idf formula:
///
/// ```text
/// idf = log10(|D| / df)
/// ```
///
/// - |D|: number of documents in the corpus
/// - df: number of documents carrying the tag
///
/// df >= 1 for every tabled tag, so idf is finite and non-negative;
/// it is 0 exactly when a tag appears on every document.
#[derive(Debug, Clone)]
pub struct GlobalIdf<N = f64>
where
    N: Float,
{
    /// axis index per tag, insertion order = axis order
    axes: IndexMap<Box<str>, u32>,
    /// idf weight per axis, not sparse because it is fully filled
    weights: Vec<N>,
}

impl<N> GlobalIdf<N>
where
    N: Float,
{
    /// Compute the idf of every tag in the table.
    ///
    /// Only meaningful for a non-empty corpus; callers skip
    /// vectorization entirely when `|D| = 0`.
    pub fn compute(stats: &TagStats) -> Self {
        debug_assert!(!stats.is_empty(), "idf is undefined for an empty corpus");
        let doc_count = stats.doc_count() as f64;
        let mut axes = IndexMap::with_capacity(stats.tag_count());
        let mut weights = Vec::with_capacity(stats.tag_count());
        for (tag, freq) in stats.iter() {
            let idf = (doc_count / freq as f64).log10();
            axes.insert(Box::<str>::from(tag), weights.len() as u32);
            weights.push(N::from(idf).unwrap_or_else(N::zero));
        }
        Self { axes, weights }
    }

    /// Number of axes (distinct tags of the corpus).
    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    /// idf weight of one tag, `None` if the tag is not in the vocabulary.
    pub fn idf(&self, tag: &str) -> Option<N> {
        self.axes.get(tag).map(|&axis| self.weights[axis as usize])
    }

    /// Axis tags in axis order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(AsRef::as_ref)
    }

    /// Turn a document's tag set into its TF-IDF vector.
    ///
    /// Binary term frequency: coordinate i carries the idf of axis i if
    /// the document has that tag, else exactly zero. Exact zeros matter
    /// because the all-zero vector is detected by equality downstream.
    /// Tags outside the vocabulary are ignored.
    ///
    /// Pure function of (tag set, axes); the same inputs always yield
    /// the same vector.
    pub fn vectorize(&self, tags: &TagSet) -> TfIdfVector<N> {
        let mut terms: Vec<(u32, N)> = tags
            .iter()
            .filter_map(|tag| {
                let tag: &str = tag;
                self.axes
                    .get(tag)
                    .map(|&axis| (axis, self.weights[axis as usize]))
            })
            .collect();
        terms.sort_unstable_by_key(|&(axis, _)| axis);
        TfIdfVector {
            dim: self.weights.len(),
            terms,
        }
    }
}

/// TF-IDF vector of one document.
///
/// Conceptually dense with one coordinate per axis of the global idf
/// vector; stored sparse as sorted (axis, weight) pairs since most
/// documents carry few tags. Absent coordinates are exactly zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TfIdfVector<N = f64>
where
    N: Float,
{
    /// Axis count of the run's global idf vector.
    dim: usize,
    /// Non-zero coordinates, strictly ascending by axis.
    terms: Vec<(u32, N)>,
}

impl<N> TfIdfVector<N>
where
    N: Float,
{
    /// Length of the conceptual dense vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Whether every coordinate is zero (document with no recognized
    /// tags).
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate the non-zero coordinates as (axis, weight).
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.terms.iter().map(|&(axis, w)| (axis as usize, w))
    }

    /// Axis index set of the non-zero coordinates. Two vectors of one
    /// run are equal exactly when these match, since all weights come
    /// from the shared global idf vector.
    pub(crate) fn axis_ids(&self) -> Vec<u32> {
        self.terms.iter().map(|&(axis, _)| axis).collect()
    }

    /// Materialize the dense form, zeros included.
    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.dim];
        for &(axis, w) in &self.terms {
            dense[axis as usize] = w;
        }
        dense
    }
}
