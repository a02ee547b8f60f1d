use indexmap::{IndexMap, IndexSet};

use crate::error::SimilarityError;

/// Tag names of one document. Insertion order is preserved but
/// irrelevant; membership is what matters.
pub type TagSet = IndexSet<Box<str>>;

/// Document frequency of every tag across one corpus snapshot.
///
/// Built once per run and read-only thereafter. The insertion order of
/// the table is the axis order of the global idf vector, so it must
/// stay fixed for the whole run; `IndexMap` guarantees that.
#[derive(Debug, Clone, Default)]
pub struct TagStats {
    doc_count: u64,
    doc_freq: IndexMap<Box<str>, u64>,
}

impl TagStats {
    /// Scan a corpus of tag sets and count, per tag, the number of
    /// documents carrying it.
    pub fn from_documents<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a TagSet>,
    {
        let mut doc_count = 0u64;
        let mut doc_freq: IndexMap<Box<str>, u64> = IndexMap::new();
        for tags in docs {
            doc_count += 1;
            // a TagSet holds each tag once, so this counts documents
            for tag in tags {
                *doc_freq.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        Self {
            doc_count,
            doc_freq,
        }
    }

    /// Accept a pre-aggregated tag -> document-count table from the
    /// collaborator, avoiding a full corpus scan.
    ///
    /// Fails fast on ill-formed data: a listed tag with frequency 0,
    /// or a frequency exceeding the document count.
    pub fn from_counts<I, T>(counts: I, doc_count: u64) -> Result<Self, SimilarityError>
    where
        I: IntoIterator<Item = (T, u64)>,
        T: AsRef<str>,
    {
        let mut doc_freq = IndexMap::new();
        for (tag, freq) in counts {
            let tag = tag.as_ref();
            if freq == 0 {
                return Err(SimilarityError::ZeroTagFrequency { tag: tag.into() });
            }
            if freq > doc_count {
                return Err(SimilarityError::TagFrequencyExceedsCorpus {
                    tag: tag.into(),
                    freq,
                    doc_count,
                });
            }
            doc_freq.insert(Box::<str>::from(tag), freq);
        }
        Ok(Self {
            doc_count,
            doc_freq,
        })
    }

    /// Total number of documents in the corpus snapshot.
    pub fn doc_count(&self) -> u64 {
        self.doc_count
    }

    /// Number of distinct tags seen across the corpus.
    pub fn tag_count(&self) -> usize {
        self.doc_freq.len()
    }

    /// Document frequency of one tag, 0 if unseen.
    pub fn freq(&self, tag: &str) -> u64 {
        self.doc_freq.get(tag).copied().unwrap_or(0)
    }

    /// Iterate tags with their frequencies in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.doc_freq.iter().map(|(tag, &freq)| (tag.as_ref(), freq))
    }

    pub fn is_empty(&self) -> bool {
        self.doc_count == 0
    }
}
