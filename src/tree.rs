//! Spec trees: the immutable, parsed form of a whole spec mapping.
//!
//! A spec mapping becomes a tree of [`SpecNode`]s that mirrors its nesting:
//!
//! ```text
//! {
//!   "rating-*": {          Composite, StarSingle
//!     "&(1)": {            Composite, Amp
//!       "value": "Rating-&1.value"    Leaf, Literal, one output path
//!     }
//!   }
//! }
//! ```
//!
//! The tree is built once and never mutated, so it can be shared across threads
//! without locking. Walking it against input data happens through
//! [`SpecNode::apply`]; how each element kind matches a key and how output paths
//! are written is supplied by the caller's [`Executor`].

use crate::dot_notation::{parse_dot_notation_rhs, OutputPath};
use crate::element::{parse_single_key, ElementKind, PathElement};
use crate::options::SpecOptions;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// One input key matched by a path element, as recorded on the walked path.
///
/// `sub_keys` holds what the element captured; for a wildcard like `rating-*`
/// matched against `rating-quality`, that would be `["quality"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchedElement {
    raw_key: String,
    sub_keys: Vec<String>,
}

impl MatchedElement {
    pub fn new(raw_key: impl Into<String>) -> Self {
        MatchedElement {
            raw_key: raw_key.into(),
            sub_keys: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sub_keys(mut self, sub_keys: Vec<String>) -> Self {
        self.sub_keys = sub_keys;
        self
    }

    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    pub fn sub_keys(&self) -> &[String] {
        &self.sub_keys
    }

    /// Index 0 is the whole matched key, 1.. are the captures.
    pub fn sub_key(&self, index: usize) -> Option<&str> {
        if index == 0 {
            Some(&self.raw_key)
        } else {
            self.sub_keys.get(index - 1).map(String::as_str)
        }
    }
}

/// Stack of elements matched so far during a tree walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkedPath(Vec<MatchedElement>);

impl WalkedPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: MatchedElement) {
        self.0.push(element);
    }

    pub fn pop(&mut self) -> Option<MatchedElement> {
        self.0.pop()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The element `up_level` steps from the top; 0 is the most recent.
    pub fn element_from_end(&self, up_level: usize) -> Option<&MatchedElement> {
        let index = self.0.len().checked_sub(up_level)?.checked_sub(1)?;
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchedElement> {
        self.0.iter()
    }
}

/// The matching and writing behavior a tree walk needs from its caller.
pub trait Executor {
    /// Matches `element` against `input_key`, returning what it captured.
    fn match_key(
        &self,
        element: &PathElement,
        input_key: &str,
        walked_path: &WalkedPath,
    ) -> Option<MatchedElement>;

    /// Writes `input` to every output path of `leaf`.
    fn write(
        &self,
        leaf: &LeafSpec,
        input: &Value,
        walked_path: &WalkedPath,
        output: &mut Map<String, Value>,
    );
}

/// A spec line whose right-hand side is one or more output paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafSpec {
    raw_key: String,
    element: PathElement,
    output_paths: Vec<OutputPath>,
}

impl LeafSpec {
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    pub fn element(&self) -> &PathElement {
        &self.element
    }

    pub fn output_paths(&self) -> &[OutputPath] {
        &self.output_paths
    }

    /// Returns true when this leaf claimed `input_key`.
    pub fn apply<E: Executor + ?Sized>(
        &self,
        executor: &E,
        input_key: &str,
        input: &Value,
        walked_path: &mut WalkedPath,
        output: &mut Map<String, Value>,
    ) -> bool {
        let Some(matched) = executor.match_key(&self.element, input_key, walked_path) else {
            return false;
        };

        walked_path.push(matched);
        executor.write(self, input, walked_path, output);
        walked_path.pop();
        true
    }
}

/// A spec line whose right-hand side is a nested mapping of child spec lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeSpec {
    raw_key: String,
    element: PathElement,
    // Keyed by the text an input key must equal exactly.
    literal_children: IndexMap<String, SpecNode>,
    // Highest priority first.
    computed_children: Vec<SpecNode>,
}

impl CompositeSpec {
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    pub fn element(&self) -> &PathElement {
        &self.element
    }

    /// Children matched by exact key lookup, with the key they answer to.
    pub fn literal_children(&self) -> impl Iterator<Item = (&str, &SpecNode)> {
        self.literal_children.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn literal_child(&self, key: &str) -> Option<&SpecNode> {
        self.literal_children.get(key)
    }

    /// Children that need their element evaluated, in the order they are tried.
    pub fn computed_children(&self) -> &[SpecNode] {
        &self.computed_children
    }

    pub fn len(&self) -> usize {
        self.literal_children.len() + self.computed_children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Matches this node's own element, then hands every entry of `input` to
    /// the children. Object entries are keyed by name, array entries by index,
    /// and a scalar is offered as its own key with a null value.
    ///
    /// Returns true when this node claimed `input_key`.
    pub fn apply<E: Executor + ?Sized>(
        &self,
        executor: &E,
        input_key: &str,
        input: &Value,
        walked_path: &mut WalkedPath,
        output: &mut Map<String, Value>,
    ) -> bool {
        let Some(matched) = executor.match_key(&self.element, input_key, walked_path) else {
            return false;
        };

        walked_path.push(matched);
        match input {
            Value::Object(entries) => {
                for (key, value) in entries {
                    self.apply_children(executor, key, value, walked_path, output);
                }
            }
            Value::Array(items) => {
                for (index, value) in items.iter().enumerate() {
                    self.apply_children(executor, &index.to_string(), value, walked_path, output);
                }
            }
            Value::String(s) => {
                self.apply_children(executor, s, &Value::Null, walked_path, output);
            }
            Value::Number(n) => {
                self.apply_children(executor, &n.to_string(), &Value::Null, walked_path, output);
            }
            Value::Bool(b) => {
                self.apply_children(executor, &b.to_string(), &Value::Null, walked_path, output);
            }
            Value::Null => {}
        }
        walked_path.pop();
        true
    }

    // At most one child claims a key: the exact literal first, then computed
    // children in priority order.
    fn apply_children<E: Executor + ?Sized>(
        &self,
        executor: &E,
        input_key: &str,
        input: &Value,
        walked_path: &mut WalkedPath,
        output: &mut Map<String, Value>,
    ) -> bool {
        if let Some(child) = self.literal_children.get(input_key) {
            if child.apply(executor, input_key, input, walked_path, output) {
                return true;
            }
        }

        self.computed_children
            .iter()
            .any(|child| child.apply(executor, input_key, input, walked_path, output))
    }
}

/// One node of a spec tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node")]
pub enum SpecNode {
    Leaf(LeafSpec),
    Composite(CompositeSpec),
}

impl SpecNode {
    /// Builds the node for one spec line from its key and right-hand side.
    ///
    /// A string or array of strings makes a leaf; a mapping makes a composite.
    ///
    /// ```rust
    /// use shiftr_spec::{SpecNode, SpecOptions};
    /// use serde_json::json;
    ///
    /// let node = SpecNode::build("rating", &json!(["a.b", "c"]), &SpecOptions::default()).unwrap();
    /// assert_eq!(node.as_leaf().unwrap().output_paths().len(), 2);
    /// ```
    pub fn build(key: &str, rhs: &Value, options: &SpecOptions) -> Result<Self> {
        Self::build_at_depth(key, rhs, options, 0)
    }

    fn build_at_depth(key: &str, rhs: &Value, options: &SpecOptions, depth: usize) -> Result<Self> {
        let element = parse_single_key(key)?;

        match rhs {
            Value::Object(children) => {
                if depth > options.max_depth {
                    return Err(Error::depth_limit(key, options.max_depth));
                }
                build_composite(key.to_string(), element, children, options, depth).map(SpecNode::Composite)
            }
            Value::String(path) => {
                let output_paths = vec![parse_dot_notation_rhs(path)?];
                Ok(SpecNode::Leaf(build_leaf(key, element, output_paths)))
            }
            Value::Array(paths) => {
                if paths.is_empty() {
                    return Err(Error::invalid_spec(key, "list of output paths is empty"));
                }
                let output_paths = paths
                    .iter()
                    .map(|path| match path {
                        Value::String(path) => parse_dot_notation_rhs(path),
                        _ => Err(Error::invalid_spec(key, "output path list must only hold strings")),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(SpecNode::Leaf(build_leaf(key, element, output_paths)))
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => Err(Error::invalid_spec(
                key,
                "right-hand side must be a string, array of strings or object",
            )),
        }
    }

    pub fn raw_key(&self) -> &str {
        match self {
            SpecNode::Leaf(leaf) => leaf.raw_key(),
            SpecNode::Composite(composite) => composite.raw_key(),
        }
    }

    pub fn element(&self) -> &PathElement {
        match self {
            SpecNode::Leaf(leaf) => leaf.element(),
            SpecNode::Composite(composite) => composite.element(),
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafSpec> {
        match self {
            SpecNode::Leaf(leaf) => Some(leaf),
            SpecNode::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeSpec> {
        match self {
            SpecNode::Composite(composite) => Some(composite),
            SpecNode::Leaf(_) => None,
        }
    }

    /// Applies this node to one input entry.
    ///
    /// Returns true when the node claimed `input_key`; sibling nodes must then
    /// leave that key alone.
    pub fn apply<E: Executor + ?Sized>(
        &self,
        executor: &E,
        input_key: &str,
        input: &Value,
        walked_path: &mut WalkedPath,
        output: &mut Map<String, Value>,
    ) -> bool {
        match self {
            SpecNode::Leaf(leaf) => leaf.apply(executor, input_key, input, walked_path, output),
            SpecNode::Composite(composite) => {
                composite.apply(executor, input_key, input, walked_path, output)
            }
        }
    }
}

fn build_leaf(key: &str, element: PathElement, output_paths: Vec<OutputPath>) -> LeafSpec {
    crate::macros::trace!(key, paths = output_paths.len(), "built leaf spec");
    LeafSpec {
        raw_key: key.to_string(),
        element,
        output_paths,
    }
}

fn build_composite(
    raw_key: String,
    element: PathElement,
    children: &Map<String, Value>,
    options: &SpecOptions,
    depth: usize,
) -> Result<CompositeSpec> {
    let mut literal_children = IndexMap::new();
    let mut computed_children = Vec::new();

    for (child_key, child_rhs) in children {
        let child = SpecNode::build_at_depth(child_key, child_rhs, options, depth + 1)?;

        let lookup_key = match child.element() {
            PathElement::Literal(text) => Some(text.clone()),
            element => element.literal_index().map(str::to_string),
        };
        match lookup_key {
            Some(lookup_key) => {
                if literal_children.contains_key(&lookup_key) {
                    return Err(Error::invalid_spec(
                        child_key,
                        &format!("duplicate literal key '{lookup_key}' under '{raw_key}'"),
                    ));
                }
                literal_children.insert(lookup_key, child);
            }
            None => computed_children.push(child),
        }
    }

    computed_children.sort_by_key(|child| priority(child.element().kind()));

    crate::macros::debug!(
        key = %raw_key,
        literal = literal_children.len(),
        computed = computed_children.len(),
        "built composite spec"
    );
    Ok(CompositeSpec {
        raw_key,
        element,
        literal_children,
        computed_children,
    })
}

// Lower runs first.
fn priority(kind: ElementKind) -> u8 {
    match kind {
        ElementKind::Amp => 0,
        ElementKind::Transpose => 1,
        ElementKind::Dollar => 2,
        ElementKind::Hash => 3,
        ElementKind::Array => 4,
        ElementKind::StarRegex => 5,
        ElementKind::StarDouble => 6,
        ElementKind::StarSingle => 7,
        ElementKind::StarAll => 8,
        ElementKind::At => 9,
        ElementKind::Literal => 10,
    }
}

/// A complete, validated spec: a composite root over the top-level mapping.
///
/// ```rust
/// use shiftr_spec::ShiftrSpec;
/// use serde_json::json;
///
/// let spec = ShiftrSpec::new(&json!({
///     "rating-*": { "&(1)": { "value": "Rating-&1.value" } }
/// })).unwrap();
/// assert_eq!(spec.root().computed_children().len(), 1);
///
/// assert!(ShiftrSpec::new(&json!({ "a@b": "x" })).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftrSpec {
    root: CompositeSpec,
}

impl ShiftrSpec {
    pub fn new(spec: &Value) -> Result<Self> {
        Self::with_options(spec, SpecOptions::default())
    }

    pub fn with_options(spec: &Value, options: SpecOptions) -> Result<Self> {
        let Value::Object(children) = spec else {
            return Err(Error::invalid_spec(&options.root_key, "spec must be a JSON object"));
        };
        if children.is_empty() {
            return Err(Error::invalid_spec(&options.root_key, "spec must not be empty"));
        }

        let element = PathElement::Literal(options.root_key.clone());
        let root = build_composite(options.root_key.clone(), element, children, &options, 0)?;
        Ok(ShiftrSpec { root })
    }

    pub fn root(&self) -> &CompositeSpec {
        &self.root
    }

    /// Runs the whole tree over `input`, starting with an empty walked path.
    pub fn apply<E: Executor + ?Sized>(
        &self,
        executor: &E,
        input: &Value,
        output: &mut Map<String, Value>,
    ) -> bool {
        let mut walked_path = WalkedPath::new();
        self.root
            .apply(executor, &self.root.raw_key, input, &mut walked_path, output)
    }
}
