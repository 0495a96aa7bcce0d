//! TF-IDF relevance over the inverted index.

use crate::concurrent_map::ConcurrentMap;
use crate::document::{DocId, Document, DocumentStatus};
use crate::execution::ExecutionPolicy;
use crate::index::{compute_inverse_document_freq, InvertedIndex};
use crate::query::Query;
use std::collections::BTreeMap;

/// Filter applied to every candidate posting before it contributes relevance.
pub trait DocumentPredicate: Sync {
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
{
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(id, status, rating)
    }
}

/// Feed `tf * idf` of every posting of `word` that passes the predicate into `add`.
fn plus_word_contributions<P>(index: &InvertedIndex, word: &str, predicate: &P, mut add: impl FnMut(DocId, f64))
where
    P: DocumentPredicate + ?Sized,
{
    let Some(postings) = index.postings(word) else {
        return;
    };
    let idf = compute_inverse_document_freq(index.document_count(), postings.len());
    for (&id, &term_freq) in postings.iter() {
        let Some(meta) = index.document(id) else {
            continue;
        };
        if predicate.matches(id, meta.status, meta.rating) {
            add(id, term_freq * idf);
        }
    }
}

fn minus_word_exclusions(index: &InvertedIndex, word: &str, mut exclude: impl FnMut(DocId)) {
    if let Some(postings) = index.postings(word) {
        postings.keys().for_each(|&id| exclude(id));
    }
}

/// Accumulate relevance of every document matching the query.
///
/// Minus-words exclude a document regardless of the predicate. The parallel
/// path accumulates into a sharded map with `bucket_count` buckets; plus-words
/// are fully merged before any minus-word is applied.
pub fn find_all_documents<P>(
    index: &InvertedIndex,
    policy: ExecutionPolicy,
    query: &Query,
    predicate: &P,
    bucket_count: usize,
) -> Vec<Document>
where
    P: DocumentPredicate + ?Sized,
{
    let document_to_relevance = match policy {
        ExecutionPolicy::Sequential => {
            let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
            for word in &query.plus_words {
                plus_word_contributions(index, word, predicate, |id, value| {
                    *relevance.entry(id).or_insert(0.0) += value;
                });
            }
            for word in &query.minus_words {
                minus_word_exclusions(index, word, |id| {
                    relevance.remove(&id);
                });
            }
            relevance
        }
        ExecutionPolicy::Parallel => {
            let relevance: ConcurrentMap<DocId, f64> = ConcurrentMap::new(bucket_count);
            policy.for_each(&query.plus_words, |word: &String| {
                plus_word_contributions(index, word, predicate, |id, value| {
                    *relevance.access(id) += value;
                });
            });
            policy.for_each(&query.minus_words, |word: &String| {
                minus_word_exclusions(index, word, |id| {
                    relevance.erase(&id);
                });
            });
            relevance.build_ordinary_map()
        }
    };

    document_to_relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            index.document(id).map(|meta| Document::new(id, relevance, meta.rating))
        })
        .collect()
}
