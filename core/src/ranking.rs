use crate::config::RELEVANCE_EPSILON;
use crate::document::Document;

/// `lhs` ranks ahead of `rhs`: higher relevance first, and when relevance is
/// within `RELEVANCE_EPSILON`, higher rating first.
pub fn ranks_before(lhs: &Document, rhs: &Document) -> bool {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        lhs.rating > rhs.rating
    } else {
        lhs.relevance > rhs.relevance
    }
}

/// Keep the best `limit` documents in rank order. Documents that compare
/// equal keep their input order.
// The epsilon comparison is not transitive, so this must not go through `sort_by`.
pub fn select_top<I>(documents: I, limit: usize) -> Vec<Document>
where
    I: IntoIterator<Item = Document>,
{
    let mut top: Vec<Document> = Vec::with_capacity(limit + 1);
    if limit == 0 {
        return top;
    }
    for document in documents {
        let position = top
            .iter()
            .position(|kept| ranks_before(&document, kept))
            .unwrap_or(top.len());
        if position < limit {
            top.insert(position, document);
            top.truncate(limit);
        }
    }
    top
}
