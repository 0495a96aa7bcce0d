use crate::document::DocId;
use crate::search_server::SearchServer;
use std::collections::{BTreeSet, HashSet};

/// Remove every document whose set of words equals that of an earlier live
/// document. Word counts and order are ignored. Returns the removed ids in
/// the order they were found.
pub fn remove_duplicates(search_server: &mut SearchServer) -> Vec<DocId> {
    let mut seen: HashSet<BTreeSet<String>> = HashSet::new();
    let mut duplicates = Vec::new();

    for id in search_server.document_ids() {
        let words: BTreeSet<String> = search_server.get_word_frequencies(id).into_keys().collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        tracing::info!(id, "found duplicate document");
        search_server.remove_document(id);
    }
    duplicates
}
