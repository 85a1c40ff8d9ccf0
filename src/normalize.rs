//! Company-name normalization for domain guessing and relevance matching.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip diacritics via canonical decomposition, dropping combining marks
/// ("Açúcar" → "Acucar").
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Compact form used for domain guesses and domain matching: lowercased,
/// diacritic-free, with whitespace, `&`, and `-` removed.
pub fn compact_name(name: &str) -> String {
    strip_diacritics(&name.to_lowercase())
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '&' && *c != '-')
        .collect()
}

/// ASCII-alphanumeric-only form used to synthesize a suggestion hostname.
pub fn alnum_name(name: &str) -> String {
    strip_diacritics(&name.to_lowercase())
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Lowercase with each whitespace run replaced by a single hyphen, for
/// hyphenated domain-guess variants of multi-word names.
pub fn hyphenated_name(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}
