use shiftr_spec::dot_notation::{fix_leading_bracket_sugar, parse_at_path_element, parse_dot_notation};
use shiftr_spec::{parse_dot_notation_rhs, ElementKind, Error, PathElement};

fn kinds(path: &str) -> Vec<ElementKind> {
    parse_dot_notation_rhs(path)
        .unwrap()
        .iter()
        .map(PathElement::kind)
        .collect()
}

#[test]
fn test_bracket_sugar_inserts_separator() {
    assert_eq!(fix_leading_bracket_sugar("data[2].&(1,1)"), "data.[2].&(1,1)");
    assert_eq!(fix_leading_bracket_sugar("photos[&1].url"), "photos.[&1].url");
    assert_eq!(fix_leading_bracket_sugar("a\\[b"), "a\\[b");
}

#[test]
fn test_plain_path_splits_on_dots() {
    assert_eq!(parse_dot_notation("a.b.c").unwrap(), vec!["a", "b", "c"]);
    assert_eq!(parse_dot_notation("a").unwrap(), vec!["a"]);
}

#[test]
fn test_rhs_with_array_and_backreference() {
    let path = parse_dot_notation_rhs("data[2].&(1,1)").unwrap();
    assert_eq!(
        path.elements(),
        &[
            PathElement::Literal("data".to_string()),
            PathElement::Array("[2]".to_string()),
            PathElement::Amp("&(1,1)".to_string()),
        ]
    );
    assert_eq!(path.raw(), "data[2].&(1,1)");
}

#[test]
fn test_transpose_sub_parser() {
    assert_eq!(
        parse_at_path_element("(a.b)", "@(a.b)").unwrap(),
        ("(a.b)".to_string(), "")
    );
    assert_eq!(
        parse_at_path_element("a.b", "@a.b").unwrap(),
        ("(a)".to_string(), "b")
    );
}

#[test]
fn test_bare_and_parenthesized_transposes_agree() {
    assert_eq!(parse_dot_notation("@a.b").unwrap(), vec!["@(a)", "b"]);
    assert_eq!(parse_dot_notation("@(a).b").unwrap(), vec!["@(a)", "b"]);
    assert_eq!(parse_dot_notation("x.@(a.b).c").unwrap(), vec!["x", "@(a.b)", "c"]);
    assert_eq!(parse_dot_notation("x.@abc").unwrap(), vec!["x", "@(abc)"]);
}

#[test]
fn test_transpose_elements_in_path() {
    let path = parse_dot_notation_rhs("rating.@(1,id).value").unwrap();
    assert_eq!(
        kinds("rating.@(1,id).value"),
        vec![ElementKind::Literal, ElementKind::Transpose, ElementKind::Literal]
    );
    match &path[1] {
        PathElement::Transpose(expr) => {
            assert_eq!(expr.up_level(), 1);
            assert_eq!(expr.sub_path(), Some("id"));
        }
        other => panic!("Expected transpose, got {:?}", other),
    }
}

#[test]
fn test_transpose_inside_index_is_not_flushed() {
    assert_eq!(
        parse_dot_notation("photos.[@(1,id)].url").unwrap(),
        vec!["photos", "[@(1,id)]", "url"]
    );
    assert_eq!(
        kinds("photos[@(1,id)].url"),
        vec![ElementKind::Literal, ElementKind::Array, ElementKind::Literal]
    );
}

#[test]
fn test_bare_transpose_inside_index_ends_at_bracket() {
    let path = parse_dot_notation_rhs("photos[@1].url").unwrap();
    assert_eq!(
        path.elements(),
        &[
            PathElement::Literal("photos".to_string()),
            PathElement::Array("[@(1)]".to_string()),
            PathElement::Literal("url".to_string()),
        ]
    );
    assert_eq!(
        parse_dot_notation("photos.[@1].url").unwrap(),
        parse_dot_notation("photos.[@(1)].url").unwrap()
    );
}

#[test]
fn test_escaped_dot_stays_in_segment() {
    assert_eq!(parse_dot_notation("a\\.b.c").unwrap(), vec!["a.b", "c"]);
    let path = parse_dot_notation_rhs("a\\.b.c").unwrap();
    assert_eq!(path[0], PathElement::Literal("a.b".to_string()));
}

#[test]
fn test_escaped_specials_in_path() {
    let path = parse_dot_notation_rhs("\\@pants.rating-\\&x").unwrap();
    assert_eq!(
        path.elements(),
        &[
            PathElement::Literal("@pants".to_string()),
            PathElement::Literal("rating-&x".to_string()),
        ]
    );
}

#[test]
fn test_self_reference_rejected() {
    for path in ["@", "a.@", "a.b.@"] {
        match parse_dot_notation_rhs(path) {
            Err(Error::SelfReferenceNotAllowed { path: reported }) => assert_eq!(reported, path),
            other => panic!("Expected SelfReferenceNotAllowed for {:?}, got {:?}", path, other),
        }
    }
}

#[test]
fn test_transpose_followed_by_separator_rejected() {
    assert!(matches!(
        parse_dot_notation_rhs("a.@.b"),
        Err(Error::EmptyTransposeExpression { .. })
    ));
}

#[test]
fn test_unbalanced_parens_rejected() {
    assert!(matches!(
        parse_dot_notation_rhs("@(a.b"),
        Err(Error::MismatchedParentheses { .. })
    ));
    assert!(matches!(
        parse_dot_notation_rhs("x.@(a(b)).c"),
        Err(Error::MismatchedParentheses { .. })
    ));
}

#[test]
fn test_invalid_segment_fails_whole_path() {
    assert!(matches!(
        parse_dot_notation_rhs("ok.a&*b.ok"),
        Err(Error::InvalidKeySyntax { .. })
    ));
}

#[test]
fn test_empty_path() {
    assert!(parse_dot_notation_rhs("").unwrap().is_empty());
}
