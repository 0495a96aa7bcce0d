use crate::document::Document;
use crate::error::Result;
use crate::search_server::SearchServer;
use rayon::prelude::*;

/// Answer independent queries in parallel. Results come back in query order;
/// if any query is malformed the error of the first such query is returned.
pub fn process_queries<S>(search_server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    let answers: Vec<Result<Vec<Document>>> = queries
        .par_iter()
        .map(|query| search_server.find_top_documents(query.as_ref()))
        .collect();
    answers.into_iter().collect()
}

/// Like `process_queries`, flattened into one list.
pub fn process_queries_joined<S>(search_server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(search_server, queries)?.into_iter().flatten().collect())
}
