pub mod compare;
pub mod corpus;
pub mod idf;
pub mod matrix;
pub mod scoring;

use std::hash::Hash;
use std::marker::PhantomData;

use indexmap::IndexMap;
use num::Float;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SimilarityConfig;
use crate::error::SimilarityError;

use self::corpus::{TagSet, TagStats};
use self::idf::{GlobalIdf, TfIdfVector};
use self::matrix::build_similarity_matrix;
use self::scoring::{select_top_k, Neighbor};

/// In-memory corpus of tagged documents plus the run configuration.
///
/// `SimilarityEngine<K, N>` has the following generic parameters:
/// - `K`: document key type (e.g. String, usize)
/// - `N`: vector scalar type (f32 or f64)
///
/// Documents are held in insertion order; that order is the
/// deterministic total order of the corpus, used for tie-breaking and
/// for canonicalizing unordered pairs. A `compute` call processes the
/// corpus as a fixed snapshot and returns a fresh [`SimilarityReport`];
/// nothing is carried across runs.
#[derive(Debug, Clone)]
pub struct SimilarityEngine<K = String, N = f64>
where
    K: Clone + Eq + Hash,
    N: Float + Into<f64> + Send + Sync,
{
    docs: IndexMap<K, TagSet>,
    config: SimilarityConfig,
    _scalar: PhantomData<N>,
}

impl<K, N> Default for SimilarityEngine<K, N>
where
    K: Clone + Eq + Hash,
    N: Float + Into<f64> + Send + Sync,
{
    fn default() -> Self {
        Self::new(SimilarityConfig::default())
    }
}

impl<K, N> SimilarityEngine<K, N>
where
    K: Clone + Eq + Hash,
    N: Float + Into<f64> + Send + Sync,
{
    /// Create an engine with the given run configuration.
    pub fn new(config: SimilarityConfig) -> Self {
        Self {
            docs: IndexMap::new(),
            config,
            _scalar: PhantomData,
        }
    }

    /// Insert one document with its tag names.
    ///
    /// Duplicate tags collapse into a set. Re-adding an existing key
    /// replaces its tags without moving the document in corpus order.
    pub fn add_doc<T>(&mut self, key: K, tags: &[T])
    where
        T: AsRef<str>,
    {
        let set: TagSet = tags.iter().map(|t| Box::<str>::from(t.as_ref())).collect();
        self.docs.insert(key, set);
    }

    /// Number of documents in the corpus.
    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    /// Check if a document with the given key exists.
    pub fn contains_doc(&self, key: &K) -> bool {
        self.docs.contains_key(key)
    }

    /// Run the full pipeline, deriving the tag statistics by scanning
    /// the corpus.
    pub fn compute(&self) -> Result<SimilarityReport<K, N>, SimilarityError> {
        let stats = TagStats::from_documents(self.docs.values());
        self.run(&stats)
    }

    /// Run the full pipeline against a pre-aggregated frequency table
    /// (for collaborators that already maintain a tag -> documents
    /// index). The table is validated at construction; tags of the
    /// corpus missing from it simply weigh nothing.
    pub fn compute_with_stats(
        &self,
        stats: &TagStats,
    ) -> Result<SimilarityReport<K, N>, SimilarityError> {
        self.run(stats)
    }

    /// statistics -> global idf -> vectors -> pairwise matrix -> top-K
    fn run(&self, stats: &TagStats) -> Result<SimilarityReport<K, N>, SimilarityError> {
        self.config.validate()?;

        info!(
            documents = self.docs.len(),
            tags = stats.tag_count(),
            "similar documents computation in progress"
        );

        if stats.is_empty() || self.docs.is_empty() {
            info!("similar documents computation done (empty corpus)");
            return Ok(SimilarityReport::empty());
        }

        let global_idf = GlobalIdf::<N>::compute(stats);
        let vectors: Vec<TfIdfVector<N>> = self
            .docs
            .values()
            .map(|tags| global_idf.vectorize(tags))
            .collect();

        let matrix = build_similarity_matrix(&vectors);

        let keys: Vec<&K> = self.docs.keys().collect();
        let mut neighbors: IndexMap<K, Vec<Neighbor<K>>> = IndexMap::new();
        for (doc, &key) in keys.iter().enumerate() {
            let picked = select_top_k(
                matrix.row(doc),
                doc,
                self.config.max_count,
                self.config.min_score,
            );
            debug!(document = doc, neighbors = ?picked, "ranked neighbors");
            if picked.is_empty() {
                // no qualifying neighbor: the document stays absent
                // from the report rather than mapping to an empty list
                continue;
            }
            let ranked = picked
                .into_iter()
                .map(|(other, score)| Neighbor {
                    key: keys[other].clone(),
                    score,
                })
                .collect();
            neighbors.insert(key.clone(), ranked);
        }

        let vector_table = self
            .docs
            .keys()
            .cloned()
            .zip(vectors.into_iter())
            .collect();

        info!("similar documents computation done");
        Ok(SimilarityReport {
            neighbors,
            vectors: vector_table,
        })
    }
}

/// Side-table output of one similarity run.
///
/// Owned by the engine's caller: a mapping from document key to its
/// ranked neighbors, plus the TF-IDF vectors the scores were derived
/// from, for the collaborator to merge into its own document
/// representation. Documents with no qualifying neighbor are absent
/// from the neighbor map; absence and "empty list" both mean "no
/// similar documents", and absence is the contract.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityReport<K, N = f64>
where
    K: Eq + Hash,
    N: Float,
{
    neighbors: IndexMap<K, Vec<Neighbor<K>>>,
    vectors: IndexMap<K, TfIdfVector<N>>,
}

impl<K, N> SimilarityReport<K, N>
where
    K: Eq + Hash,
    N: Float,
{
    fn empty() -> Self {
        Self {
            neighbors: IndexMap::new(),
            vectors: IndexMap::new(),
        }
    }

    /// Ranked neighbors of one document; `None` when it has none.
    pub fn neighbors_of(&self, key: &K) -> Option<&[Neighbor<K>]> {
        self.neighbors.get(key).map(Vec::as_slice)
    }

    /// TF-IDF vector of one document from this run.
    pub fn vector_of(&self, key: &K) -> Option<&TfIdfVector<N>> {
        self.vectors.get(key)
    }

    /// Iterate documents that have neighbors, in corpus order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[Neighbor<K>])> {
        self.neighbors.iter().map(|(key, list)| (key, list.as_slice()))
    }

    /// Number of documents with at least one reported neighbor.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
