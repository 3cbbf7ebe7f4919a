//! Dot-notation output path parsing.
//!
//! The right-hand side of a spec line is a dot-separated output path such as
//! `data[2].&(1,1)` or `rating.@(1,id).value`. Parsing runs in three passes:
//!
//! 1. [`fix_leading_bracket_sugar`] rewrites `data[2]` to `data.[2]` so `.` is the only
//!    segment separator;
//! 2. [`parse_dot_notation`] splits the string into raw key tokens, honoring `\` escapes
//!    and reading `@` transposes with [`parse_at_path_element`];
//! 3. every token is classified with [`parse_single_key`].
//!
//! ```rust
//! use shiftr_spec::{parse_dot_notation_rhs, ElementKind};
//!
//! let path = parse_dot_notation_rhs("data[2].&(1,1)").unwrap();
//! let kinds: Vec<_> = path.iter().map(|e| e.kind()).collect();
//! assert_eq!(kinds, vec![ElementKind::Literal, ElementKind::Array, ElementKind::Amp]);
//! ```

use crate::element::{parse_single_key, PathElement};
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::ops::Deref;

/// An ordered sequence of path elements parsed from one output path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPath {
    raw: String,
    elements: Vec<PathElement>,
}

impl OutputPath {
    /// The dot-notation text this path was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<PathElement> {
        self.elements
    }
}

impl Deref for OutputPath {
    type Target = [PathElement];

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<'a> IntoIterator for &'a OutputPath {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for OutputPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Read position over an immutable path string, owned by one parse call.
struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { input, position: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }
}

/// Inserts a `.` before every `[` that is not already preceded by `.`, `@` or an
/// escaping `\`.
///
/// ```rust
/// use shiftr_spec::dot_notation::fix_leading_bracket_sugar;
///
/// assert_eq!(fix_leading_bracket_sugar("data[2].&(1,1)"), "data.[2].&(1,1)");
/// assert_eq!(fix_leading_bracket_sugar("data\\[2\\]"), "data\\[2\\]");
/// ```
pub fn fix_leading_bracket_sugar(dot_notation: &str) -> String {
    let mut chars = dot_notation.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(dot_notation.len() + 4);
    out.push(first);

    let mut prev = first;
    for curr in chars {
        if curr == '[' && !matches!(prev, '\\' | '@' | '.') {
            out.push('.');
        }
        out.push(curr);
        prev = curr;
    }

    out
}

/// Reads a transpose expression from the text right after an unescaped `@`.
///
/// Returns the canonical parenthesized expression and the unconsumed rest of the
/// input. `dot_notation` is the whole path, used in error messages.
///
/// ```rust
/// use shiftr_spec::dot_notation::parse_at_path_element;
///
/// assert_eq!(parse_at_path_element("(a.b)", "@(a.b)").unwrap(), ("(a.b)".to_string(), ""));
/// assert_eq!(parse_at_path_element("a.b", "@a.b").unwrap(), ("(a)".to_string(), "b"));
/// ```
pub fn parse_at_path_element<'a>(rest: &'a str, dot_notation: &str) -> Result<(String, &'a str)> {
    let mut cursor = Cursor::new(rest);
    let expr = read_transpose(&mut cursor, dot_notation, false)?;
    Ok((expr, cursor.rest()))
}

// `in_index` is set when the '@' sits inside an unclosed '[', as in "[@1]"
fn read_transpose(cursor: &mut Cursor<'_>, dot_notation: &str, in_index: bool) -> Result<String> {
    match cursor.peek_char() {
        None => Ok(String::new()),
        Some('.') => Err(Error::empty_transpose(dot_notation)),
        Some(']') if in_index => Err(Error::empty_transpose(dot_notation)),
        Some('(') => read_parenthesized(cursor, dot_notation),
        Some(_) => Ok(read_bare(cursor, in_index)),
    }
}

// "@(a.b.[&2])": everything up to and including the matching ')'
fn read_parenthesized(cursor: &mut Cursor<'_>, dot_notation: &str) -> Result<String> {
    let mut expr = String::new();
    if let Some(open) = cursor.next_char() {
        expr.push(open);
    }

    let mut depth = 1usize;
    while let Some(ch) = cursor.next_char() {
        match ch {
            '(' => {
                return Err(Error::mismatched_parens(
                    dot_notation,
                    "too many open parens '('",
                ))
            }
            ')' => depth -= 1,
            _ => {}
        }
        expr.push(ch);

        if depth == 0 {
            return Ok(expr);
        }
    }

    Err(Error::mismatched_parens(
        dot_notation,
        "mismatched parentheses in '@()'",
    ))
}

// "@abc.def" reads "abc", consumes the '.', and leaves "def".
// Inside an index "@1].url" reads "1" and leaves "].url".
fn read_bare(cursor: &mut Cursor<'_>, in_index: bool) -> String {
    let mut inner = String::new();
    let mut escaped = false;

    while let Some(ch) = cursor.peek_char() {
        if ch == ']' && in_index && !escaped {
            break;
        }
        cursor.next_char();
        if ch == '.' && !escaped {
            break;
        }
        escaped = ch == '\\' && !escaped;
        inner.push(ch);
    }

    format!("({inner})")
}

/// Splits a bracket-normalized dot-notation path into raw key tokens.
///
/// Escapes other than `\.` and `\\` are kept as written so the classifier can
/// interpret them later.
///
/// ```rust
/// use shiftr_spec::dot_notation::parse_dot_notation;
///
/// assert_eq!(parse_dot_notation("a.b.c").unwrap(), vec!["a", "b", "c"]);
/// assert_eq!(parse_dot_notation("a\\.b.c").unwrap(), vec!["a.b", "c"]);
/// assert_eq!(parse_dot_notation("@a.b").unwrap(), vec!["@(a)", "b"]);
/// ```
pub fn parse_dot_notation(dot_notation: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut cursor = Cursor::new(dot_notation);
    let mut token = String::new();
    let mut prev_is_escape = false;

    while let Some(ch) = cursor.next_char() {
        let curr_is_escape = ch == '\\' && !prev_is_escape;

        if prev_is_escape && ch != '.' && ch != '\\' {
            token.push('\\');
            token.push(ch);
        } else if ch == '@' {
            // "[@(1,id)]": the transpose sits inside an index, keep reading to the ']'
            let inside_open_bracket = token.contains('[') && !token.contains(']');

            token.push('@');
            token.push_str(&read_transpose(&mut cursor, dot_notation, inside_open_bracket)?);
            if !inside_open_bracket {
                tokens.push(std::mem::take(&mut token));
            }
        } else if ch == '.' {
            if prev_is_escape {
                token.push('.');
            } else if !token.is_empty() {
                tokens.push(std::mem::take(&mut token));
            }
        } else if !curr_is_escape {
            token.push(ch);
        }

        prev_is_escape = curr_is_escape;
    }

    if !token.is_empty() {
        tokens.push(token);
    }
    Ok(tokens)
}

/// Parses a right-hand-side output path into its ordered path elements.
///
/// A bare `@` segment is rejected; it only makes sense on the left-hand side.
pub fn parse_dot_notation_rhs(dot_notation: &str) -> Result<OutputPath> {
    let fixed = fix_leading_bracket_sugar(dot_notation);
    let tokens = parse_dot_notation(&fixed)?;

    let mut elements = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let element = parse_single_key(token)?;
        if matches!(element, PathElement::At(_)) {
            return Err(Error::self_reference(dot_notation));
        }
        elements.push(element);
    }

    Ok(OutputPath {
        raw: dot_notation.to_string(),
        elements,
    })
}
