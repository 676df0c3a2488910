//! Slug derivation for display names.
//!
//! Slugs are lowercase ASCII alphanumerics joined by single hyphens, with no
//! leading or trailing hyphen. Non-ASCII letters are transliterated first, so
//! "Crème Brûlée" becomes "creme-brulee".

use deunicode::deunicode;

/// Derive a URL-safe slug from a display name.
///
/// - `&` and `@` are spelled out as "and" / "at"
/// - quotes and apostrophes are dropped ("John's" -> "johns")
/// - every other run of non-alphanumeric characters collapses into one hyphen
///
/// The result may be empty when the input has no letters or digits.
pub fn slugify(text: &str) -> String {
    let mut substituted = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => substituted.push_str(" and "),
            '@' => substituted.push_str(" at "),
            '\'' | '"' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' => {}
            _ => substituted.push(c),
        }
    }

    let ascii = deunicode(&substituted);

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
