//! Transpose key grammar.
//!
//! A transpose key pulls a value from elsewhere in the matched input instead of
//! naming a literal key. Accepted shapes:
//!
//! | Key | Up level | Sub-path |
//! |-----|----------|----------|
//! | `@3` | 3 | none |
//! | `@foo` | 0 | `foo` |
//! | `@(foo.bar)` | 0 | `foo.bar` |
//! | `@(2,foo.bar)` | 2 | `foo.bar` |
//!
//! ```rust
//! use shiftr_spec::TransposeExpr;
//!
//! let expr = TransposeExpr::parse("@(2,foo.bar)").unwrap();
//! assert_eq!(expr.up_level(), 2);
//! assert_eq!(expr.sub_path(), Some("foo.bar"));
//! ```

use crate::{Error, Result};
use serde::Serialize;

/// A parsed `@` transpose reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransposeExpr {
    raw_key: String,
    up_level: usize,
    sub_path: Option<String>,
}

impl TransposeExpr {
    /// Parses a key starting with `@`. The raw key keeps its escapes.
    pub fn parse(key: &str) -> Result<Self> {
        if key.chars().count() < 2 {
            return Err(Error::invalid_key(
                key,
                "'Transpose Input' key '@' can not be empty or of length 1",
            ));
        }
        let Some(meat) = key.strip_prefix('@') else {
            return Err(Error::invalid_key(
                key,
                "'Transpose Input' key must start with an '@'",
            ));
        };

        if meat.contains('@') {
            return Err(Error::invalid_key(
                key,
                "@ path element can not contain a nested @",
            ));
        }
        if meat.contains('*') || meat.contains("[]") {
            return Err(Error::invalid_key(
                key,
                "'Transpose Input' can not contain expansion wildcards (* and [])",
            ));
        }

        let meat = if let Some(inner) = meat.strip_prefix('(') {
            inner.strip_suffix(')').ok_or_else(|| {
                Error::mismatched_parens(key, "@ path element that starts with '(' must end with ')'")
            })?
        } else {
            meat
        };

        if meat.is_empty() {
            return Err(Error::empty_transpose(key));
        }

        let (up_level, sub_path) = Self::split_up_level(key, meat)?;
        Ok(TransposeExpr {
            raw_key: key.to_string(),
            up_level,
            sub_path,
        })
    }

    // "2,foo.bar" -> (2, Some("foo.bar")), "3" -> (3, None), "foo" -> (0, Some("foo"))
    fn split_up_level(key: &str, meat: &str) -> Result<(usize, Option<String>)> {
        if meat.starts_with(',') {
            return Err(Error::invalid_key(
                key,
                "@ path element can not start with ',', an up level must come first",
            ));
        }
        if !meat.starts_with(|c: char| c.is_ascii_digit()) {
            return Ok((0, Some(meat.to_string())));
        }

        let (digits, rest) = match meat.split_once(',') {
            Some((digits, rest)) => (digits, Some(rest.to_string())),
            None => (meat, None),
        };

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::invalid_key(
                key,
                "@ path element with non/mixed numeric key is not valid",
            ));
        }
        let up_level = digits.parse::<usize>().map_err(|_| {
            Error::invalid_key(key, "@ path element up level is out of range")
        })?;
        if rest.as_deref() == Some("") {
            return Err(Error::empty_transpose(key));
        }

        Ok((up_level, rest))
    }

    /// The key as written, escapes included.
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    /// How many levels up the walked path the reference starts.
    pub fn up_level(&self) -> usize {
        self.up_level
    }

    /// The dot-notation path read from the referenced level, if any.
    pub fn sub_path(&self) -> Option<&str> {
        self.sub_path.as_deref()
    }
}
