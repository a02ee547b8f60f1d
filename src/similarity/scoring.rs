use serde::Serialize;

/// One ranked entry of a document's similarity result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor<K> {
    /// Key of the similar document.
    pub key: K,
    /// Cosine similarity in [0, 1].
    pub score: f64,
}

/// Select the reported neighbors of one document from its matrix row.
///
/// Candidates are every other document, ranked by descending score with
/// ties broken by ascending corpus index so the output is deterministic
/// across runs. The ranking is truncated to `max_count` first and THEN
/// filtered to scores strictly above `min_score`: "the N most similar,
/// but only if they clear the bar". Filtering first would let
/// candidates beyond the top-N cut slip in when many tie at the
/// threshold, which changes observable results.
pub fn select_top_k(
    row: &[f64],
    doc: usize,
    max_count: usize,
    min_score: f64,
) -> Vec<(usize, f64)> {
    let mut candidates: Vec<(usize, f64)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(other, _)| other != doc)
        .collect();
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    candidates.truncate(max_count);
    candidates.retain(|&(_, score)| score > min_score);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_descending_score() {
        let row = [0.0, 0.2, 0.9, 0.5];
        let picked = select_top_k(&row, 0, 10, 0.0);
        assert_eq!(picked, vec![(2, 0.9), (3, 0.5), (1, 0.2)]);
    }

    #[test]
    fn never_reports_the_document_itself() {
        // self slot carries the highest value; it must still be skipped
        let row = [1.0, 0.3, 0.1];
        let picked = select_top_k(&row, 0, 10, 0.0);
        assert!(picked.iter().all(|&(other, _)| other != 0));
    }

    #[test]
    fn truncates_to_max_count_then_filters_by_score() {
        let row = [0.0, 0.5, 0.5, 0.4];
        // the third-ranked 0.4 falls to the truncation even though it
        // clears the bar
        let picked = select_top_k(&row, 0, 2, 0.3);
        assert_eq!(picked, vec![(1, 0.5), (2, 0.5)]);

        // a bar above every candidate empties the result entirely
        let picked = select_top_k(&row, 0, 2, 0.6);
        assert!(picked.is_empty());
    }

    #[test]
    fn ties_break_by_corpus_order() {
        let row = [0.7, 0.0, 0.7, 0.7, 0.7];
        let picked = select_top_k(&row, 1, 3, 0.0);
        assert_eq!(picked, vec![(0, 0.7), (2, 0.7), (3, 0.7)]);
    }

    #[test]
    fn respects_max_count_and_exclusive_min_score() {
        let row = [0.0, 0.3, 0.2, 0.1];
        let picked = select_top_k(&row, 0, 2, 0.2);
        // 0.2 does not clear the exclusive bound
        assert_eq!(picked, vec![(1, 0.3)]);
        assert!(picked.len() <= 2);
    }

    #[test]
    fn empty_row_has_no_candidates() {
        let picked = select_top_k(&[0.0], 0, 2, 0.0);
        assert!(picked.is_empty());
    }
}
