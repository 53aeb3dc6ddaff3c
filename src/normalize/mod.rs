//! Canonicalization of question text.
//!
//! Both the literal and the semantic matching paths compare on the same
//! canonical form, so diacritics and punctuation never cause spurious
//! mismatches between a user's question and a stored one.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Punctuation removed during canonicalization.
///
/// Matches the inverted Spanish marks alongside the ASCII set, since the
/// corpus questions are written with both.
const STRIPPED_PUNCTUATION: &[char] = &['?', '¡', '!', '.', ',', '¿'];

/// Canonicalizes text for matching and embedding.
///
/// Lower-cases, decomposes accented characters (NFD) and drops their
/// combining marks, removes the fixed punctuation set, and trims surrounding
/// whitespace. Lower-casing runs first: a handful of characters (e.g.
/// U+0130, Latin capital I with dot above) lower-case *into* a base letter
/// plus combining mark, and stripping marks afterwards keeps the function
/// idempotent.
///
/// Pure and infallible: `normalize(normalize(x)) == normalize(x)` for all x.
pub fn normalize(text: &str) -> String {
    let lowered = to_lowercase_cow(text);

    lowered
        .nfd()
        .filter(|c| !is_combining_mark(*c) && !STRIPPED_PUNCTUATION.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Lower-case with a fast path for text that is already lower-case ASCII.
fn to_lowercase_cow(text: &str) -> Cow<'_, str> {
    if text
        .chars()
        .all(|c| !c.is_uppercase() && c.is_ascii())
    {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.to_lowercase())
    }
}
