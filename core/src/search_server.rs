use crate::concurrent_map::DEFAULT_BUCKET_COUNT;
use crate::config::{SearchConfig, MAX_RESULT_DOCUMENT_COUNT};
use crate::document::{DocId, Document, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::execution::ExecutionPolicy;
use crate::index::{compute_average_rating, InvertedIndex};
use crate::query::{parse_query, Query};
use crate::ranking::select_top;
use crate::scoring::{find_all_documents, DocumentPredicate};
use crate::tokenizer::{is_valid_word, make_unique_non_empty_words, split_into_words};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory TF-IDF search over short documents.
///
/// Mutations take `&mut self`, so every add or remove is atomic with respect
/// to readers. Queries take `&self` and may run from many threads at once.
#[derive(Debug)]
pub struct SearchServer {
    stop_words: BTreeSet<String>,
    index: InvertedIndex,
    bucket_count: usize,
}

impl Default for SearchServer {
    fn default() -> Self {
        Self {
            stop_words: BTreeSet::new(),
            index: InvertedIndex::new(),
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}

impl SearchServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine ignoring the given stop words. Empty strings and
    /// duplicates are dropped; a stop word with control characters is an error.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = make_unique_non_empty_words(stop_words);
        if let Some(invalid) = stop_words.iter().find(|word| !is_valid_word(word)) {
            return Err(SearchError::InvalidWord(invalid.clone()));
        }
        Ok(Self { stop_words, ..Self::default() })
    }

    /// Stop words separated by spaces, e.g. `"and in with"`.
    pub fn with_stop_words_text(text: &str) -> Result<Self> {
        Self::with_stop_words(split_into_words(text))
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let mut server = Self::with_stop_words(config.stop_words.iter().flat_map(|s| split_into_words(s)))?;
        server.bucket_count = config.bucket_count.max(1);
        Ok(server)
    }

    pub fn stop_words(&self) -> &BTreeSet<String> {
        &self.stop_words
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Live document ids in the order they were added.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.index.document_ids()
    }

    pub fn document_id_at(&self, position: usize) -> Option<DocId> {
        self.index.document_id_at(position)
    }

    pub fn contains_document(&self, id: DocId) -> bool {
        self.index.contains_document(id)
    }

    /// Inverse document frequency of each distinct word of the document.
    /// Empty for ids that are not live.
    pub fn get_word_frequencies(&self, id: DocId) -> BTreeMap<String, f64> {
        self.index.word_frequencies(id)
    }

    /// Validation runs to completion before the index is touched, so a failed
    /// add leaves no trace.
    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if self.index.contains_document(id) {
            return Err(SearchError::DuplicateId(id));
        }
        if id < 0 {
            return Err(SearchError::InvalidId(id));
        }

        let words: Vec<&str> = split_into_words(text)
            .filter(|word| !self.stop_words.contains(*word))
            .collect();
        if let Some(invalid) = words.iter().find(|word| !is_valid_word(word)) {
            return Err(SearchError::InvalidWord((*invalid).to_string()));
        }

        let rating = compute_average_rating(ratings);
        self.index.insert(id, &words, status, rating);
        tracing::debug!(id, words = words.len(), rating, "added document");
        Ok(())
    }

    /// Removing an id that is not live is a no-op.
    pub fn remove_document(&mut self, id: DocId) {
        self.remove_document_with(ExecutionPolicy::Sequential, id);
    }

    /// With `Parallel`, the document's postings are erased concurrently, one
    /// word per task; the document table is updated afterwards by this thread alone.
    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, id: DocId) {
        match self.index.remove(policy, id) {
            Some(meta) => tracing::debug!(id, words = meta.words.len(), ?policy, "removed document"),
            None => tracing::debug!(id, "remove of unknown document ignored"),
        }
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, status_filter(status))
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    pub fn find_top_documents_by_status_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(policy, raw_query, status_filter(status))
    }

    /// At most `MAX_RESULT_DOCUMENT_COUNT` hits, best first.
    pub fn find_top_documents_with<P>(&self, policy: ExecutionPolicy, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        let query = self.parse_query(raw_query)?;
        let matched = find_all_documents(&self.index, policy, &query, &predicate, self.bucket_count);
        Ok(select_top(matched, MAX_RESULT_DOCUMENT_COUNT))
    }

    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// Plus-words of the query found in the document, in lexicographic order,
    /// with the document's status. Any minus-word found in the document empties the list.
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let meta = self.index.document(id).ok_or(SearchError::UnknownId(id))?;
        let query = self.parse_query(raw_query)?;

        let index = &self.index;
        if policy.any(&query.minus_words, |word: &String| index.word_in_document(word, id)) {
            return Ok((Vec::new(), meta.status));
        }
        let matched = policy.filter_map(&query.plus_words, |word: &String| {
            index.word_in_document(word, id).then(|| word.clone())
        });
        Ok((matched, meta.status))
    }

    fn parse_query(&self, raw_query: &str) -> Result<Query> {
        parse_query(raw_query, &self.stop_words)
    }
}

fn status_filter(wanted: DocumentStatus) -> impl Fn(DocId, DocumentStatus, i32) -> bool + Sync {
    move |_, status, _| status == wanted
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.index.document_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> SearchServer {
        let mut server = SearchServer::with_stop_words_text("and with").unwrap();
        server.add_document(1, "funny pet and nasty rat", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
        server.add_document(2, "funny pet with curly hair", DocumentStatus::Actual, &[1, 2]).unwrap();
        server.add_document(3, "big cat nasty hair", DocumentStatus::Actual, &[1, 2, 8]).unwrap();
        server
    }

    #[test]
    fn stop_words_are_not_indexed() {
        let server = server();
        assert!(server.find_top_documents("with").unwrap().is_empty());
        assert!(server.find_top_documents("and").unwrap().is_empty());
    }

    #[test]
    fn curly_dog_finds_document_two() {
        let server = server();
        let found = server.find_top_documents("curly dog").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
        assert!(found[0].relevance > 0.0);
        assert_eq!(found[0].rating, 1);
    }

    #[test]
    fn duplicate_id_leaves_index_unchanged() {
        let mut server = server();
        let err = server.add_document(1, "curly dog", DocumentStatus::Actual, &[]).unwrap_err();
        assert!(matches!(err, SearchError::DuplicateId(1)));
        assert_eq!(server.document_count(), 3);
        assert!(server.find_top_documents("dog").unwrap().is_empty());
    }

    #[test]
    fn negative_id_rejected() {
        let mut server = server();
        let err = server.add_document(-1, "dog", DocumentStatus::Actual, &[]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidId(-1)));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn invalid_word_rejected_before_mutation() {
        let mut server = server();
        let err = server
            .add_document(4, "good dog bad\u{2}word", DocumentStatus::Actual, &[])
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidWord(_)));
        assert_eq!(server.document_count(), 3);
        assert!(server.find_top_documents("good").unwrap().is_empty());
        assert!(server.add_document(4, "good dog", DocumentStatus::Actual, &[]).is_ok());
    }

    #[test]
    fn invalid_stop_words_rejected() {
        let err = SearchServer::with_stop_words(["fine", "bro\u{7}ken"]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidWord(_)));
    }

    #[test]
    fn match_document_reports_plus_words() {
        let server = server();
        let (words, status) = server.match_document("nasty rat curly", 1).unwrap();
        assert_eq!(words, vec!["nasty", "rat"]);
        assert_eq!(status, DocumentStatus::Actual);
    }

    #[test]
    fn match_document_minus_word_clears() {
        let server = server();
        for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
            let (words, _) = server.match_document_with(policy, "nasty rat -funny", 1).unwrap();
            assert!(words.is_empty());
        }
    }

    #[test]
    fn match_unknown_id_fails() {
        let server = server();
        let err = server.match_document("nasty", 42).unwrap_err();
        assert!(matches!(err, SearchError::UnknownId(42)));
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut server = server();
        server.remove_document(1000);
        assert_eq!(server.document_count(), 3);
    }

    #[test]
    fn iterates_ids_in_insertion_order() {
        let mut server = server();
        server.remove_document_with(ExecutionPolicy::Parallel, 2);
        let ids: Vec<DocId> = (&server).into_iter().collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(server.document_id_at(1), Some(3));
    }

    #[test]
    fn from_config_uses_stop_words_and_buckets() {
        let config = SearchConfig { stop_words: vec!["and with".into()], bucket_count: 0 };
        let server = SearchServer::from_config(&config).unwrap();
        assert_eq!(server.stop_words().len(), 2);
        assert_eq!(server.bucket_count, 1);
    }
}
