use std::collections::BTreeSet;

/// Split text into words on ASCII spaces. Runs of spaces never produce empty words.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid when it holds no control characters (code points below 0x20).
///
/// Every byte of a multi-byte UTF-8 sequence is >= 0x80, so checking bytes is enough.
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < b' ')
}

/// Collect words into an ordered set, dropping empty strings and duplicates.
pub fn make_unique_non_empty_words<I, S>(words: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .filter_map(|word| {
            let word = word.as_ref();
            (!word.is_empty()).then(|| word.to_string())
        })
        .collect()
}
