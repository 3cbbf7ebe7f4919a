//! Configuration options for spec-tree building.
//!
//! ## Examples
//!
//! ```rust
//! use shiftr_spec::{ShiftrSpec, SpecOptions};
//! use serde_json::json;
//!
//! let options = SpecOptions::new().with_max_depth(8).with_root_key("top");
//! let spec = ShiftrSpec::with_options(&json!({ "rating": "rating" }), options).unwrap();
//! assert_eq!(spec.root().raw_key(), "top");
//! ```

/// Default nesting limit for spec mappings.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration options for building a spec tree.
///
/// # Examples
///
/// ```rust
/// use shiftr_spec::SpecOptions;
///
/// let options = SpecOptions::new();
/// assert_eq!(options.max_depth, 64);
/// assert_eq!(options.root_key, "root");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecOptions {
    /// How many mapping levels below the root a spec may nest.
    pub max_depth: usize,
    /// Key given to the synthetic root node.
    pub root_key: String,
}

impl Default for SpecOptions {
    fn default() -> Self {
        SpecOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            root_key: "root".to_string(),
        }
    }
}

impl SpecOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the nesting limit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shiftr_spec::SpecOptions;
    ///
    /// let options = SpecOptions::new().with_max_depth(4);
    /// assert_eq!(options.max_depth, 4);
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the root node's key. It is matched as a literal.
    #[must_use]
    pub fn with_root_key(mut self, root_key: impl Into<String>) -> Self {
        self.root_key = root_key.into();
        self
    }
}
