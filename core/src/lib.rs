pub mod concurrent_map;
pub mod config;
pub mod document;
pub mod error;
pub mod execution;
pub mod index;
pub mod loader;
pub mod log_duration;
pub mod paginator;
pub mod process_queries;
pub mod query;
pub mod ranking;
pub mod remove_duplicates;
pub mod request_queue;
pub mod scoring;
pub mod search_server;
pub mod tokenizer;

pub use concurrent_map::{ConcurrentMap, DEFAULT_BUCKET_COUNT};
pub use config::{SearchConfig, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use document::{DocId, Document, DocumentStatus};
pub use error::{ErrorKind, Result, SearchError};
pub use execution::ExecutionPolicy;
pub use log_duration::LogDuration;
pub use paginator::{paginate, Paginator};
pub use process_queries::{process_queries, process_queries_joined};
pub use remove_duplicates::remove_duplicates;
pub use request_queue::{RequestQueue, REQUEST_WINDOW};
pub use scoring::DocumentPredicate;
pub use search_server::SearchServer;
