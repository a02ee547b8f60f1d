/// This crate is a similar-document engine over categorical tag sets,
/// built on a binary TF-IDF weighting and cosine similarity.
///
/// Given a fixed corpus of documents, each carrying a set of tag names,
/// it computes for every document a ranked list of the most similar
/// other documents: tag overlap weighted by corpus-wide tag rarity.
/// The whole computation is one in-memory batch pass; there is no
/// persistence and no cross-run state.
pub mod config;
pub mod error;
pub mod similarity;

/// Similarity Engine
/// The top-level struct of this crate. It holds the corpus of tagged
/// documents (in insertion order, which is the deterministic total
/// order of the run) and the run configuration, and produces a
/// [`SimilarityReport`] per `compute` call.
///
/// `SimilarityEngine<K, N>` has the following generic parameters:
/// - `K`: document key type (e.g. String, usize)
/// - `N`: vector scalar type (f32 or f64)
///
/// The pipeline is strictly forward: corpus tag statistics, then the
/// global idf vector, then per-document TF-IDF vectors, then the
/// pairwise cosine matrix, then per-document top-K selection.
pub use similarity::SimilarityEngine;

/// Similarity Report
/// Side-table output of one run: document key -> ranked neighbors,
/// plus the TF-IDF vectors the scores were derived from. Documents
/// with no qualifying neighbor are absent rather than mapped to an
/// empty list.
pub use similarity::SimilarityReport;

/// Corpus Tag Statistics
/// Document frequency of every tag across one corpus snapshot, plus
/// the total document count. Built once per run (by scanning the
/// corpus, or from a collaborator's pre-aggregated table, validated)
/// and read-only thereafter. Its table order fixes the axes of every
/// vector in the run.
pub use similarity::corpus::TagStats;

/// Global IDF Vector and per-document TF-IDF vectors
/// `GlobalIdf` carries one (tag, idf) axis per distinct tag, with
/// idf = log10(|D| / df); `vectorize` lays a document's tag set out
/// against those axes with binary term frequency. `TfIdfVector` is the
/// sparse result, absent coordinates being exactly zero.
pub use similarity::idf::{GlobalIdf, TfIdfVector};

/// Similarity Matrix
/// Symmetric pairwise cosine scores over the corpus, one row per
/// document in corpus order, queryable from either side of a pair.
pub use similarity::matrix::{build_similarity_matrix, SimilarityMatrix};

/// Neighbor
/// One ranked entry of a document's similarity result: the other
/// document's key and the cosine score in [0, 1].
pub use similarity::scoring::Neighbor;

/// Run configuration: `max_count` (default 2) caps the neighbors
/// reported per document, `min_score` (default 0.0001) is the
/// exclusive score bound they must clear.
pub use config::SimilarityConfig;

/// Upfront rejection of malformed configuration or corpus data; the
/// computation itself has no recoverable error paths.
pub use error::SimilarityError;
