use crate::document::DocId;
use thiserror::Error;

/// Every way an engine operation can fail.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("negative document id: {0}")]
    InvalidId(DocId),

    #[error("document id already in use: {0}")]
    DuplicateId(DocId),

    #[error("invalid word: [{0}]")]
    InvalidWord(String),

    #[error("malformed minus-word in query: [{0}]")]
    InvalidQuery(String),

    #[error("unknown document id: {0}")]
    UnknownId(DocId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Coarse classification callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    UnknownId,
    Input,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::InvalidId(_)
            | SearchError::DuplicateId(_)
            | SearchError::InvalidWord(_)
            | SearchError::InvalidQuery(_) => ErrorKind::InvalidArgument,
            SearchError::UnknownId(_) => ErrorKind::UnknownId,
            SearchError::Io(_) | SearchError::Json(_) => ErrorKind::Input,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}
