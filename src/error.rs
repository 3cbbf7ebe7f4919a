//! Error types for spec key classification, path parsing and tree building.
//!
//! Every failure names the offending key or dot-notation path together with the
//! rule it broke, so a caller can report exactly which spec line is wrong.
//!
//! ## Error Categories
//!
//! - **Key Syntax**: a single key matches no grammar, or matches one with a bad shape
//!   (wrong bracket count, `*` mixed with `&`, a stray `@`)
//! - **Parentheses**: a transpose `@(...)` never closes, or opens twice
//! - **Self Reference**: a bare `@` segment inside an output path
//! - **Empty Transpose**: an `@` immediately followed by a `.` separator
//! - **Spec Shape**: a right-hand side that is neither a path, a list of paths, nor a mapping
//!
//! None of these are transient. Spec loading is all-or-nothing, so the first error
//! aborts the whole build.
//!
//! ## Examples
//!
//! ```rust
//! use shiftr_spec::{parse_single_key, Error};
//!
//! let result = parse_single_key("a&*b");
//! assert!(matches!(result, Err(Error::InvalidKeySyntax { .. })));
//!
//! if let Err(err) = result {
//!     assert!(err.to_string().contains("a&*b"));
//! }
//! ```

use thiserror::Error;

/// Represents all possible errors raised while parsing spec keys and output paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A key matches none of the recognized grammars, or matches one with invalid structure.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKeySyntax { key: String, reason: String },

    /// A transpose expression's parentheses never balance, or nest.
    #[error("Unable to parse dot notation '{path}': {reason}")]
    MismatchedParentheses { path: String, reason: String },

    /// A bare `@` appears as a segment of an output path.
    #[error("'.@.' is not valid in an output path: {path}")]
    SelfReferenceNotAllowed { path: String },

    /// A transpose marker has nothing to reference.
    #[error("Empty transpose expression in '{path}'")]
    EmptyTransposeExpression { path: String },

    /// A spec line whose right-hand side has an unsupported shape.
    #[error("Invalid spec at key '{key}': {reason}")]
    InvalidSpec { key: String, reason: String },

    /// The spec mapping nests deeper than the configured limit.
    #[error("Spec nesting under key '{key}' exceeds the maximum depth of {max_depth}")]
    DepthLimitExceeded { key: String, max_depth: usize },
}

impl Error {
    /// Creates an invalid key error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shiftr_spec::Error;
    ///
    /// let err = Error::invalid_key("a@b", "can not have an @ other than at the front");
    /// assert!(err.to_string().contains("a@b"));
    /// ```
    pub fn invalid_key(key: &str, reason: &str) -> Self {
        Error::InvalidKeySyntax {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a parentheses error for a dot-notation path.
    pub fn mismatched_parens(path: &str, reason: &str) -> Self {
        Error::MismatchedParentheses {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a self-reference error for an output path containing a bare `@`.
    pub fn self_reference(path: &str) -> Self {
        Error::SelfReferenceNotAllowed {
            path: path.to_string(),
        }
    }

    /// Creates an empty transpose error.
    pub fn empty_transpose(path: &str) -> Self {
        Error::EmptyTransposeExpression {
            path: path.to_string(),
        }
    }

    /// Creates an invalid spec error for a right-hand side with the wrong shape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shiftr_spec::Error;
    ///
    /// let err = Error::invalid_spec("rating", "right-hand side must be a string, array or object");
    /// assert!(err.to_string().contains("rating"));
    /// ```
    pub fn invalid_spec(key: &str, reason: &str) -> Self {
        Error::InvalidSpec {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a depth limit error.
    pub fn depth_limit(key: &str, max_depth: usize) -> Self {
        Error::DepthLimitExceeded {
            key: key.to_string(),
            max_depth,
        }
    }

    /// Returns the key or path the error refers to.
    pub fn subject(&self) -> &str {
        match self {
            Error::InvalidKeySyntax { key, .. }
            | Error::InvalidSpec { key, .. }
            | Error::DepthLimitExceeded { key, .. } => key,
            Error::MismatchedParentheses { path, .. }
            | Error::SelfReferenceNotAllowed { path }
            | Error::EmptyTransposeExpression { path } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_subject() {
        let err = Error::mismatched_parens("@(a.b", "mismatched parentheses");
        assert_eq!(
            err.to_string(),
            "Unable to parse dot notation '@(a.b': mismatched parentheses"
        );
        assert_eq!(err.subject(), "@(a.b");

        let err = Error::depth_limit("deep", 3);
        assert!(err.to_string().contains("maximum depth of 3"));
        assert_eq!(err.subject(), "deep");
    }
}
