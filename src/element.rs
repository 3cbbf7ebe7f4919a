//! Path elements and the single-key classifier.
//!
//! Every key of a spec mapping, and every segment of an output path, is one
//! [`PathElement`]. The variant is picked by inspecting the key's escape-stripped
//! inspection form in a fixed order; the first rule that fires wins.
//!
//! ```rust
//! use shiftr_spec::{parse_single_key, ElementKind};
//!
//! assert_eq!(parse_single_key("rating-*").unwrap().kind(), ElementKind::StarSingle);
//! assert_eq!(parse_single_key("&(1)").unwrap().kind(), ElementKind::Amp);
//! assert_eq!(parse_single_key("\\@pants").unwrap().raw_key(), "@pants");
//! ```

use crate::escape;
use crate::transpose::TransposeExpr;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// The parsed, typed form of one path segment.
///
/// Every variant except [`PathElement::Transpose`] stores the key's literal form
/// (escapes removed, escaped characters kept). A transpose keeps the raw key so its
/// own escapes survive into the sub-path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key")]
pub enum PathElement {
    /// `@`: the current input node itself.
    At(String),
    /// `*`: every key at this level.
    StarAll(String),
    /// A wildcard with exactly one `*`, e.g. `rating-*`.
    StarSingle(String),
    /// A wildcard with exactly two `*`, e.g. `*-*`.
    StarDouble(String),
    /// A wildcard with three or more `*`.
    StarRegex(String),
    /// An array index or index expression, e.g. `[2]` or `[&1]`.
    Array(String),
    /// Matches on the key or ordinal rather than the value, e.g. `$` or `$1`.
    Dollar(String),
    /// A backreference to a previously matched segment, e.g. `&` or `&(1,1)`.
    Amp(String),
    /// A computed literal value or index, e.g. `#2` or `#value`.
    Hash(String),
    /// A multi-value reference, e.g. `@(1,id)`.
    Transpose(TransposeExpr),
    /// Matches its own text exactly.
    Literal(String),
}

/// Fieldless tag naming a [`PathElement`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ElementKind {
    At,
    StarAll,
    StarSingle,
    StarDouble,
    StarRegex,
    Array,
    Dollar,
    Amp,
    Hash,
    Transpose,
    Literal,
}

impl ElementKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ElementKind::At => "At",
            ElementKind::StarAll => "StarAll",
            ElementKind::StarSingle => "StarSingle",
            ElementKind::StarDouble => "StarDouble",
            ElementKind::StarRegex => "StarRegex",
            ElementKind::Array => "Array",
            ElementKind::Dollar => "Dollar",
            ElementKind::Amp => "Amp",
            ElementKind::Hash => "Hash",
            ElementKind::Transpose => "Transpose",
            ElementKind::Literal => "Literal",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PathElement {
    /// The stored key text.
    pub fn raw_key(&self) -> &str {
        match self {
            PathElement::At(key)
            | PathElement::StarAll(key)
            | PathElement::StarSingle(key)
            | PathElement::StarDouble(key)
            | PathElement::StarRegex(key)
            | PathElement::Array(key)
            | PathElement::Dollar(key)
            | PathElement::Amp(key)
            | PathElement::Hash(key)
            | PathElement::Literal(key) => key,
            PathElement::Transpose(expr) => expr.raw_key(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            PathElement::At(_) => ElementKind::At,
            PathElement::StarAll(_) => ElementKind::StarAll,
            PathElement::StarSingle(_) => ElementKind::StarSingle,
            PathElement::StarDouble(_) => ElementKind::StarDouble,
            PathElement::StarRegex(_) => ElementKind::StarRegex,
            PathElement::Array(_) => ElementKind::Array,
            PathElement::Dollar(_) => ElementKind::Dollar,
            PathElement::Amp(_) => ElementKind::Amp,
            PathElement::Hash(_) => ElementKind::Hash,
            PathElement::Transpose(_) => ElementKind::Transpose,
            PathElement::Literal(_) => ElementKind::Literal,
        }
    }

    /// For an `Array` element whose brackets hold only digits, the index text.
    ///
    /// ```rust
    /// use shiftr_spec::parse_single_key;
    ///
    /// assert_eq!(parse_single_key("[2]").unwrap().literal_index(), Some("2"));
    /// assert_eq!(parse_single_key("[&1]").unwrap().literal_index(), None);
    /// ```
    pub fn literal_index(&self) -> Option<&str> {
        let PathElement::Array(key) = self else {
            return None;
        };
        let inner = key.strip_prefix('[')?.strip_suffix(']')?;
        if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
            Some(inner)
        } else {
            None
        }
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw_key())
    }
}

/// Classifies one raw key, handling its backslash escapes first.
pub fn parse_single_key(key: &str) -> Result<PathElement> {
    let (inspect, literal) = escape::normalize(key);
    let element = classify(&inspect, &literal, key)?;
    crate::macros::trace!(key, kind = %element.kind(), "classified spec key");
    Ok(element)
}

/// Picks the path element variant for a key.
///
/// `inspect` decides the variant, `literal` is stored, and `orig_key` is used for
/// transpose parsing and error messages.
pub fn classify(inspect: &str, literal: &str, orig_key: &str) -> Result<PathElement> {
    let literal = literal.to_string();

    if inspect == "@" {
        return Ok(PathElement::At(literal));
    }
    if inspect == "*" {
        return Ok(PathElement::StarAll(literal));
    }
    if inspect.starts_with('[') {
        check_single_brackets(inspect, orig_key)?;
        return Ok(PathElement::Array(literal));
    }
    if inspect.starts_with('@') || inspect.contains("@(") {
        return TransposeExpr::parse(orig_key).map(PathElement::Transpose);
    }
    if inspect.contains('@') {
        return Err(Error::invalid_key(
            orig_key,
            "can not have an @ other than at the front",
        ));
    }
    if inspect.contains('$') {
        return Ok(PathElement::Dollar(literal));
    }
    if inspect.contains('[') {
        check_single_brackets(inspect, orig_key)?;
        return Ok(PathElement::Array(literal));
    }
    if inspect.contains('&') {
        if inspect.contains('*') {
            return Err(Error::invalid_key(orig_key, "can't mix * with &"));
        }
        return Ok(PathElement::Amp(literal));
    }
    if inspect.contains('*') {
        return Ok(match inspect.matches('*').count() {
            1 => PathElement::StarSingle(literal),
            2 => PathElement::StarDouble(literal),
            _ => PathElement::StarRegex(literal),
        });
    }
    if inspect.contains('#') {
        return Ok(PathElement::Hash(literal));
    }

    Ok(PathElement::Literal(literal))
}

fn check_single_brackets(inspect: &str, orig_key: &str) -> Result<()> {
    if inspect.matches('[').count() != 1 || inspect.matches(']').count() != 1 {
        return Err(Error::invalid_key(orig_key, "has too many [] references"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(key: &str) -> ElementKind {
        parse_single_key(key).unwrap().kind()
    }

    #[test]
    fn test_single_character_keys() {
        assert_eq!(kind_of("@"), ElementKind::At);
        assert_eq!(kind_of("*"), ElementKind::StarAll);
        assert_eq!(kind_of("$"), ElementKind::Dollar);
        assert_eq!(kind_of("&"), ElementKind::Amp);
        assert_eq!(kind_of("#"), ElementKind::Hash);
    }

    #[test]
    fn test_star_counts() {
        assert_eq!(kind_of("rating-*"), ElementKind::StarSingle);
        assert_eq!(kind_of("*-*"), ElementKind::StarDouble);
        assert_eq!(kind_of("a*b*c*"), ElementKind::StarRegex);
    }

    #[test]
    fn test_dollar_wins_over_brackets() {
        assert_eq!(kind_of("$[1]"), ElementKind::Dollar);
        assert_eq!(kind_of("$[[1]"), ElementKind::Dollar);
    }

    #[test]
    fn test_embedded_brackets() {
        assert_eq!(kind_of("foo[&1]"), ElementKind::Array);
        assert!(matches!(
            parse_single_key("foo[1]]"),
            Err(Error::InvalidKeySyntax { .. })
        ));
        assert!(matches!(
            parse_single_key("[1][2]"),
            Err(Error::InvalidKeySyntax { .. })
        ));
    }

    #[test]
    fn test_escaped_specials_are_literal() {
        let element = parse_single_key("rating-\\*").unwrap();
        assert_eq!(element, PathElement::Literal("rating-*".to_string()));

        let element = parse_single_key("\\[2\\]").unwrap();
        assert_eq!(element, PathElement::Literal("[2]".to_string()));

        let element = parse_single_key("a\\@b").unwrap();
        assert_eq!(element, PathElement::Literal("a@b".to_string()));
    }

    #[test]
    fn test_transpose_anywhere_via_paren_opener() {
        assert!(matches!(
            parse_single_key("foo@(1)"),
            Err(Error::InvalidKeySyntax { .. })
        ));
        assert_eq!(kind_of("@(1,id)"), ElementKind::Transpose);
        assert_eq!(kind_of("@id"), ElementKind::Transpose);
    }

    #[test]
    fn test_transpose_keeps_escapes() {
        let element = parse_single_key("@(a\\.b)").unwrap();
        assert_eq!(element.raw_key(), "@(a\\.b)");
    }

    #[test]
    fn test_serialize_shape() {
        let element = parse_single_key("&(1,1)").unwrap();
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "Amp", "key": "&(1,1)" }));
    }
}
