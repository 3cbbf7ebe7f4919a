//! Backslash escape handling for spec keys.
//!
//! Any of the special characters `@ * & $ # [ ] .` can appear as plain text in a key
//! by prefixing it with `\`. Each raw key yields two derived strings:
//!
//! - the **inspection form**, with both the escapes and the escaped characters removed,
//!   used only to decide which kind of path element a key is;
//! - the **literal form**, with the escapes removed but the escaped characters kept,
//!   stored as the path element's value.
//!
//! ```rust
//! use shiftr_spec::escape::normalize;
//!
//! let (inspect, literal) = normalize("rating-\\&pants");
//! assert_eq!(inspect, "rating-pants");
//! assert_eq!(literal, "rating-&pants");
//! ```

use std::borrow::Cow;

/// Drops every escape and the character it escapes.
///
/// `\@pants` becomes `pants`, `rating-\&pants` becomes `rating-pants` and
/// `rating\\pants` becomes `ratingpants`. A trailing lone backslash is dropped.
pub fn remove_escaped_values(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_was_escape = false;

    for ch in key.chars() {
        if ch == '\\' {
            prev_was_escape = !prev_was_escape;
        } else {
            if !prev_was_escape {
                out.push(ch);
            }
            prev_was_escape = false;
        }
    }

    out
}

/// Drops the escapes but keeps the characters they escape.
///
/// `\@pants` becomes `@pants`, `rating-\&pants` becomes `rating-&pants` and
/// `rating\\pants` becomes `rating\pants`. A trailing lone backslash is dropped.
pub fn remove_escape_chars(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_was_escape = false;

    for ch in key.chars() {
        if ch == '\\' {
            if prev_was_escape {
                out.push(ch);
            }
            prev_was_escape = !prev_was_escape;
        } else {
            out.push(ch);
            prev_was_escape = false;
        }
    }

    out
}

/// Returns `(inspection_form, literal_form)` for a raw key.
///
/// Keys without a backslash are returned unchanged, borrowed, for both forms.
pub fn normalize(key: &str) -> (Cow<'_, str>, Cow<'_, str>) {
    if key.contains('\\') {
        (
            Cow::Owned(remove_escaped_values(key)),
            Cow::Owned(remove_escape_chars(key)),
        )
    } else {
        (Cow::Borrowed(key), Cow::Borrowed(key))
    }
}
