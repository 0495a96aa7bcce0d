use crate::document::{DocId, DocumentStatus};
use crate::execution::ExecutionPolicy;
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::{BTreeMap, BTreeSet};

/// Term frequency of one word in each document that contains it.
pub type Postings = BTreeMap<DocId, f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct DocMeta {
    /// Distinct non-stop words of the document, kept to reverse its postings on removal.
    pub words: BTreeSet<String>,
    pub status: DocumentStatus,
    pub rating: i32,
}

/// Word → postings, plus the per-document table and the live ids in insertion order.
///
/// Each posting list sits behind its own lock so that a parallel removal can
/// erase one document from many words at once. Everything else is mutated
/// through `&mut self` only.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_document_freqs: BTreeMap<String, RwLock<Postings>>,
    documents: BTreeMap<DocId, DocMeta>,
    document_ids: Vec<DocId>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index an already validated document. `words` must be stop-word free;
    /// every occurrence adds `1 / words.len()` to the word's term frequency.
    pub fn insert(&mut self, id: DocId, words: &[&str], status: DocumentStatus, rating: i32) {
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                let postings = self.word_to_document_freqs.entry((*word).to_string()).or_default();
                *postings.get_mut().entry(id).or_insert(0.0) += inv_word_count;
            }
        }
        let meta = DocMeta {
            words: words.iter().map(|word| (*word).to_string()).collect(),
            status,
            rating,
        };
        self.documents.insert(id, meta);
        self.document_ids.push(id);
    }

    /// Purge a document from every structure. Returns its metadata, or `None` if it was not live.
    pub fn remove(&mut self, policy: ExecutionPolicy, id: DocId) -> Option<DocMeta> {
        let meta = self.documents.remove(&id)?;

        let index = &self.word_to_document_freqs;
        policy.for_each(&meta.words, |word: &String| {
            if let Some(postings) = index.get(word) {
                postings.write().remove(&id);
            }
        });

        for word in &meta.words {
            let drained = self
                .word_to_document_freqs
                .get_mut(word)
                .is_some_and(|postings| postings.get_mut().is_empty());
            if drained {
                self.word_to_document_freqs.remove(word);
            }
        }
        self.document_ids.retain(|&live| live != id);
        Some(meta)
    }

    pub fn contains_document(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn document(&self, id: DocId) -> Option<&DocMeta> {
        self.documents.get(&id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Live ids in insertion order.
    pub fn document_ids(&self) -> std::iter::Copied<std::slice::Iter<'_, DocId>> {
        self.document_ids.iter().copied()
    }

    pub fn document_id_at(&self, index: usize) -> Option<DocId> {
        self.document_ids.get(index).copied()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.word_to_document_freqs.contains_key(word)
    }

    pub fn postings(&self, word: &str) -> Option<RwLockReadGuard<'_, Postings>> {
        self.word_to_document_freqs.get(word).map(|postings| postings.read())
    }

    pub fn word_in_document(&self, word: &str, id: DocId) -> bool {
        self.postings(word).is_some_and(|postings| postings.contains_key(&id))
    }

    /// `ln(live documents / documents containing word)`, or zero for unknown words.
    pub fn inverse_document_freq(&self, word: &str) -> f64 {
        self.postings(word)
            .map(|postings| compute_inverse_document_freq(self.document_count(), postings.len()))
            .unwrap_or(0.0)
    }

    /// Current IDF of each distinct word of a document; empty for ids that are not live.
    pub fn word_frequencies(&self, id: DocId) -> BTreeMap<String, f64> {
        self.documents
            .get(&id)
            .map(|meta| {
                meta.words
                    .iter()
                    .map(|word| (word.clone(), self.inverse_document_freq(word)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub fn compute_inverse_document_freq(document_count: usize, document_freq: usize) -> f64 {
    if document_freq == 0 {
        return 0.0;
    }
    (document_count as f64 / document_freq as f64).ln()
}

/// Arithmetic mean truncated toward zero; zero for no ratings.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        index.insert(1, &["funny", "pet", "nasty", "rat"], DocumentStatus::Actual, 5);
        index.insert(2, &["funny", "pet", "curly", "hair"], DocumentStatus::Actual, 3);
        index.insert(3, &["rat", "rat", "pet", "rat"], DocumentStatus::Banned, 0);
        index
    }

    #[test]
    fn term_frequencies_sum_to_one() {
        let index = sample();
        for id in index.document_ids() {
            let total: f64 = index
                .document(id)
                .unwrap()
                .words
                .iter()
                .map(|w| index.postings(w).unwrap()[&id])
                .sum();
            assert!((total - 1.0).abs() < 1e-9, "doc {id} sums to {total}");
        }
        assert!((index.postings("rat").unwrap()[&3] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn remove_reverses_postings() {
        let mut index = sample();
        let meta = index.remove(ExecutionPolicy::Sequential, 2).unwrap();
        assert_eq!(meta.rating, 3);
        assert!(!index.contains_document(2));
        assert!(!index.contains_word("curly"));
        assert!(!index.contains_word("hair"));
        assert!(!index.word_in_document("funny", 2));
        assert!(index.word_in_document("funny", 1));
        assert_eq!(index.document_ids().collect::<Vec<_>>(), vec![1, 3]);
        assert!(index.remove(ExecutionPolicy::Sequential, 2).is_none());
    }

    #[test]
    fn parallel_remove_matches_sequential() {
        let mut seq = sample();
        let mut par = sample();
        seq.remove(ExecutionPolicy::Sequential, 1);
        par.remove(ExecutionPolicy::Parallel, 1);
        for word in ["funny", "pet", "nasty", "rat", "curly", "hair"] {
            assert_eq!(seq.contains_word(word), par.contains_word(word));
            assert_eq!(seq.postings(word).map(|p| p.clone()), par.postings(word).map(|p| p.clone()));
        }
        assert_eq!(seq.document_ids().collect::<Vec<_>>(), par.document_ids().collect::<Vec<_>>());
    }

    #[test]
    fn inverse_document_freq_uses_live_count() {
        let mut index = sample();
        assert!((index.inverse_document_freq("pet") - 0.0).abs() < 1e-12);
        assert!((index.inverse_document_freq("rat") - (3.0f64 / 2.0).ln()).abs() < 1e-12);
        assert_eq!(index.inverse_document_freq("dog"), 0.0);
        index.remove(ExecutionPolicy::Sequential, 3);
        assert!((index.inverse_document_freq("rat") - 2.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn word_frequencies_for_unknown_id_is_empty() {
        let index = sample();
        assert!(index.word_frequencies(42).is_empty());
        let freqs = index.word_frequencies(3);
        assert_eq!(freqs.keys().collect::<Vec<_>>(), vec!["pet", "rat"]);
    }

    #[test]
    fn empty_document_is_tracked() {
        let mut index = InvertedIndex::new();
        index.insert(9, &[], DocumentStatus::Actual, 0);
        assert_eq!(index.document_count(), 1);
        assert!(index.word_frequencies(9).is_empty());
        assert_eq!(index.document_id_at(0), Some(9));
        assert_eq!(index.document_id_at(1), None);
    }

    #[test]
    fn average_rating_truncates_toward_zero() {
        assert_eq!(compute_average_rating(&[]), 0);
        assert_eq!(compute_average_rating(&[7, 2, 7]), 5);
        assert_eq!(compute_average_rating(&[5, -12, 2, 1]), -1);
        assert_eq!(compute_average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }
}
