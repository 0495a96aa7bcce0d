use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

/// A parsed query. Both sets are stop-word free and iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(token: &str) -> Result<QueryWord<'_>> {
    if !is_valid_word(token) {
        return Err(SearchError::InvalidWord(token.to_string()));
    }
    match token.strip_prefix('-') {
        Some(rest) if rest.is_empty() || rest.starts_with('-') => {
            Err(SearchError::InvalidQuery(token.to_string()))
        }
        Some(rest) => Ok(QueryWord { data: rest, is_minus: true }),
        None => Ok(QueryWord { data: token, is_minus: false }),
    }
}

/// Parse raw query text. A token starting with `-` is a minus-word; `-` alone
/// and `--word` are rejected. Every token is validated before stop words are dropped.
pub fn parse_query(text: &str, stop_words: &BTreeSet<String>) -> Result<Query> {
    let mut query = Query::default();
    for token in split_into_words(text) {
        let word = parse_query_word(token)?;
        if stop_words.contains(word.data) {
            continue;
        }
        let target = if word.is_minus { &mut query.minus_words } else { &mut query.plus_words };
        target.insert(word.data.to_string());
    }
    tracing::trace!(plus = query.plus_words.len(), minus = query.minus_words.len(), "parsed query");
    Ok(query)
}
