use thiserror::Error;

/// Upfront rejections of malformed configuration or corpus data.
///
/// Every variant is reported before any similarity work begins; the
/// computation itself is deterministic and pure and has no recoverable
/// error paths. Violated internal preconditions (such as comparing
/// vectors built from different axis sets) panic instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    /// `max_count` limits the neighbors reported per document and must
    /// allow at least one.
    #[error("max_count must be at least 1")]
    InvalidMaxCount,

    /// `min_score` is an exclusive lower bound on cosine scores and
    /// must lie in `[0, 1)`.
    #[error("min_score {0} is out of range, expected a value in [0, 1)")]
    InvalidMinScore(f64),

    /// A supplied frequency table listed a tag no document carries.
    /// A tag only exists in the table because at least one document
    /// carries it, so a zero count is ill-formed collaborator data.
    #[error("tag {tag:?} has document frequency 0, expected at least 1")]
    ZeroTagFrequency { tag: String },

    /// A supplied frequency table claims more documents carry a tag
    /// than the corpus holds, which would yield a negative idf.
    #[error("tag {tag:?} has document frequency {freq} but the corpus only has {doc_count} documents")]
    TagFrequencyExceedsCorpus {
        tag: String,
        freq: u64,
        doc_count: u64,
    },
}
