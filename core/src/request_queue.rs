use crate::document::{Document, DocumentStatus};
use crate::error::Result;
use crate::scoring::DocumentPredicate;
use crate::search_server::SearchServer;
use std::collections::VecDeque;

/// Number of most recent requests the queue remembers (one day of minutes).
pub const REQUEST_WINDOW: usize = 1440;

/// Runs searches and tracks how many of the recent ones came back empty.
pub struct RequestQueue<'a> {
    search_server: &'a SearchServer,
    requests: VecDeque<bool>,
    no_result_count: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(search_server: &'a SearchServer) -> Self {
        Self {
            search_server,
            requests: VecDeque::with_capacity(REQUEST_WINDOW + 1),
            no_result_count: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let found = self.search_server.find_top_documents(raw_query)?;
        self.record(found.is_empty());
        Ok(found)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        let found = self.search_server.find_top_documents_by_status(raw_query, status)?;
        self.record(found.is_empty());
        Ok(found)
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        let found = self.search_server.find_top_documents_by(raw_query, predicate)?;
        self.record(found.is_empty());
        Ok(found)
    }

    /// Empty results among the last `REQUEST_WINDOW` recorded requests.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    fn record(&mut self, is_empty: bool) {
        if is_empty {
            self.no_result_count += 1;
        }
        self.requests.push_back(is_empty);
        if self.requests.len() > REQUEST_WINDOW && self.requests.pop_front() == Some(true) {
            self.no_result_count -= 1;
        }
    }
}
