//! # shiftr_spec
//!
//! Parser for the keys and output paths of shift-style JSON-to-JSON transformation specs.
//!
//! ## What is a shift spec?
//!
//! A shift spec is a JSON mapping that mirrors the shape of the input document. Each
//! key is a small pattern expression saying which input keys it matches, and each
//! leaf value is a dot-notation path saying where the matched data is written:
//!
//! ```text
//! {
//!   "rating": {
//!     "primary": { "value": "Rating" },
//!     "*": { "value": "SecondaryRatings.&1.Value" }
//!   }
//! }
//! ```
//!
//! This crate is the front end: it turns every key into a typed [`PathElement`], every
//! output path into an [`OutputPath`], and the whole mapping into an immutable
//! [`ShiftrSpec`] tree. Walking the tree against input data is driven through
//! [`SpecNode::apply`] with a caller-supplied [`Executor`].
//!
//! ## Key Features
//!
//! - **Exact Classification**: Every key maps to exactly one element kind, or an error
//! - **Escapes**: `\` lets `@ * & $ # [ ] .` appear as plain text
//! - **Bracket Sugar**: `data[2]` in an output path reads as `data.[2]`
//! - **Transposes**: `@a.b` and `@(a).b` parse to the same elements
//! - **All-or-Nothing Loading**: The first invalid key or path aborts the build
//! - **No Unsafe Code**: Trees are immutable after construction and `Send + Sync`
//!
//! ## Quick Start
//!
//! ```rust
//! use shiftr_spec::{parse_single_key, parse_dot_notation_rhs, ElementKind, PathElement};
//!
//! assert_eq!(parse_single_key("rating-*").unwrap().kind(), ElementKind::StarSingle);
//!
//! let path = parse_dot_notation_rhs("data[2].&(1,1)").unwrap();
//! assert_eq!(path[1], PathElement::Array("[2]".to_string()));
//! assert_eq!(path[2], PathElement::Amp("&(1,1)".to_string()));
//! ```
//!
//! ### Building a Spec Tree
//!
//! ```rust
//! use shiftr_spec::ShiftrSpec;
//! use serde_json::json;
//!
//! let spec = ShiftrSpec::new(&json!({
//!     "rating": {
//!         "primary": { "value": "Rating" },
//!         "*": { "value": "SecondaryRatings.&1.Value" }
//!     }
//! })).unwrap();
//!
//! let rating = spec.root().literal_child("rating").unwrap();
//! assert_eq!(rating.as_composite().unwrap().len(), 2);
//! ```
//!
//! ## Logging
//!
//! Enable the `tracing` feature to get `tracing` events from key classification and
//! tree building.
//!
//! ## Grammar
//!
//! See the [`grammar`] module for the full key and path grammar.

pub mod dot_notation;
pub mod element;
pub mod error;
pub mod escape;
pub mod grammar;
mod macros;
pub mod options;
pub mod transpose;
pub mod tree;

pub use dot_notation::{parse_dot_notation_rhs, OutputPath};
pub use element::{parse_single_key, ElementKind, PathElement};
pub use error::{Error, Result};
pub use options::SpecOptions;
pub use transpose::TransposeExpr;
pub use tree::{
    CompositeSpec, Executor, LeafSpec, MatchedElement, ShiftrSpec, SpecNode, WalkedPath,
};
