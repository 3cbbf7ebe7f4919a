use serde_json::{json, Map, Value};
use shiftr_spec::{
    ElementKind, Error, Executor, LeafSpec, MatchedElement, PathElement, ShiftrSpec, SpecNode,
    SpecOptions, WalkedPath,
};
use std::cell::RefCell;

/// Matches literals, `*` and `prefix-*` keys; writes each claimed value under the
/// leaf's first output path and records which leaves ran.
#[derive(Default)]
struct RecordingExecutor {
    writes: RefCell<Vec<String>>,
}

impl Executor for RecordingExecutor {
    fn match_key(
        &self,
        element: &PathElement,
        input_key: &str,
        _walked_path: &WalkedPath,
    ) -> Option<MatchedElement> {
        match element {
            PathElement::Literal(key) if key == input_key => Some(MatchedElement::new(input_key)),
            PathElement::Array(_) if element.literal_index() == Some(input_key) => {
                Some(MatchedElement::new(input_key))
            }
            PathElement::StarAll(_) => Some(MatchedElement::new(input_key)),
            PathElement::StarSingle(pattern) => {
                let prefix = pattern.strip_suffix('*')?;
                let rest = input_key.strip_prefix(prefix)?;
                Some(MatchedElement::new(input_key).with_sub_keys(vec![rest.to_string()]))
            }
            _ => None,
        }
    }

    fn write(
        &self,
        leaf: &LeafSpec,
        input: &Value,
        walked_path: &WalkedPath,
        output: &mut Map<String, Value>,
    ) {
        let keys: Vec<&str> = walked_path.iter().map(MatchedElement::raw_key).collect();
        self.writes
            .borrow_mut()
            .push(format!("{} <- {}", leaf.raw_key(), keys.join("/")));
        for path in leaf.output_paths() {
            output.insert(path.raw().to_string(), input.clone());
        }
    }
}

#[test]
fn test_leaf_and_composite_shapes() {
    let spec = ShiftrSpec::new(&json!({
        "rating": {
            "primary": { "value": "Rating" },
            "*": { "value": ["SecondaryRatings.&1.Value", "All[]"] }
        }
    }))
    .unwrap();

    let rating = spec.root().literal_child("rating").unwrap();
    let rating = rating.as_composite().expect("rating is a mapping");
    assert_eq!(rating.element().kind(), ElementKind::Literal);

    let star = &rating.computed_children()[0];
    let star = star.as_composite().unwrap();
    let value = star.literal_child("value").unwrap().as_leaf().unwrap();
    assert_eq!(value.output_paths().len(), 2);
    assert_eq!(value.output_paths()[0].raw(), "SecondaryRatings.&1.Value");
    assert_eq!(value.output_paths()[0].len(), 3);
}

#[test]
fn test_invalid_rhs_shapes() {
    for rhs in [json!(null), json!(3), json!(true), json!([]), json!(["ok", 1])] {
        let result = ShiftrSpec::new(&json!({ "rating": rhs }));
        match result {
            Err(Error::InvalidSpec { key, .. }) => assert_eq!(key, "rating"),
            other => panic!("Expected InvalidSpec, got {:?}", other),
        }
    }

    assert!(matches!(
        ShiftrSpec::new(&json!({})),
        Err(Error::InvalidSpec { .. })
    ));
    assert!(matches!(
        ShiftrSpec::new(&json!("rating")),
        Err(Error::InvalidSpec { .. })
    ));
}

#[test]
fn test_literal_child_claims_before_wildcard() {
    let spec = ShiftrSpec::new(&json!({
        "rating": {
            "primary": "Primary",
            "*": "Other.&"
        }
    }))
    .unwrap();

    let executor = RecordingExecutor::default();
    let mut output = Map::new();
    let input = json!({ "rating": { "primary": 5, "quality": 3 } });
    assert!(spec.apply(&executor, &input, &mut output));

    assert_eq!(
        *executor.writes.borrow(),
        vec![
            "primary <- root/rating/primary".to_string(),
            "* <- root/rating/quality".to_string(),
        ]
    );
    assert_eq!(output.get("Primary"), Some(&json!(5)));
    assert_eq!(output.get("Other.&"), Some(&json!(3)));
}

#[test]
fn test_at_most_one_computed_sibling_claims() {
    let spec = ShiftrSpec::new(&json!({
        "rating-*": "Single",
        "*": "All"
    }))
    .unwrap();

    let executor = RecordingExecutor::default();
    let mut output = Map::new();
    spec.apply(
        &executor,
        &json!({ "rating-quality": 1, "other": 2 }),
        &mut output,
    );

    assert_eq!(
        *executor.writes.borrow(),
        vec![
            "rating-* <- root/rating-quality".to_string(),
            "* <- root/other".to_string(),
        ]
    );
}

#[test]
fn test_array_input_uses_indices() {
    let spec = ShiftrSpec::new(&json!({ "[1]": "Second" })).unwrap();

    let executor = RecordingExecutor::default();
    let mut output = Map::new();
    spec.apply(&executor, &json!(["a", "b", "c"]), &mut output);

    assert_eq!(output.get("Second"), Some(&json!("b")));
    assert_eq!(executor.writes.borrow().len(), 1);
}

#[test]
fn test_scalar_input_is_offered_as_key() {
    let spec = ShiftrSpec::new(&json!({ "rating": { "5": "Five" } })).unwrap();

    let executor = RecordingExecutor::default();
    let mut output = Map::new();
    spec.apply(&executor, &json!({ "rating": 5 }), &mut output);

    assert_eq!(output.get("Five"), Some(&Value::Null));
}

#[test]
fn test_unmatched_node_does_not_claim() {
    let node = SpecNode::build("rating", &json!("Rating"), &SpecOptions::default()).unwrap();
    let executor = RecordingExecutor::default();
    let mut walked_path = WalkedPath::new();
    let mut output = Map::new();

    assert!(!node.apply(&executor, "quality", &json!(1), &mut walked_path, &mut output));
    assert!(node.apply(&executor, "rating", &json!(1), &mut walked_path, &mut output));
    assert!(walked_path.is_empty());
}

#[test]
fn test_computed_children_priority() {
    let spec = ShiftrSpec::new(&json!({
        "*": "a",
        "*-*": "b",
        "rating-*": "c",
        "$": "d",
        "&1": "e",
        "#x": "f",
        "@": "g",
        "@(1,id)": "h",
        "[&0]": "i",
        "a*b*c*": "j"
    }))
    .unwrap();

    let kinds: Vec<_> = spec
        .root()
        .computed_children()
        .iter()
        .map(|child| child.element().kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Amp,
            ElementKind::Transpose,
            ElementKind::Dollar,
            ElementKind::Hash,
            ElementKind::Array,
            ElementKind::StarRegex,
            ElementKind::StarDouble,
            ElementKind::StarSingle,
            ElementKind::StarAll,
            ElementKind::At,
        ]
    );
}

#[test]
fn test_shared_across_threads() {
    let spec = std::sync::Arc::new(
        ShiftrSpec::new(&json!({ "rating": { "value": "Rating" } })).unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let spec = std::sync::Arc::clone(&spec);
            std::thread::spawn(move || spec.root().len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}
