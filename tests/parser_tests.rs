// tests/parser_tests.rs

use ae::{parse, parse_source, tokenize, ErrorType, Expr, ExprType, Location, Value};

// A helper to tokenize and parse a program that is expected to be valid.
fn program(source: &str) -> Vec<Expr> {
    parse(tokenize(source).unwrap()).unwrap()
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name))
        .unwrap()
}

#[test]
fn test_def_with_url_field() {
    let items = program(r#"def A { "x": Url "http://e"}"#);
    assert_eq!(items.len(), 1);

    if let Expr::Def { name, value, .. } = &items[0] {
        assert_eq!(name, "A");
        if let Expr::Format { entries, .. } = value.as_ref() {
            assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["x"]);
            let url = entries.get("x").and_then(Value::as_expr).unwrap();
            assert!(matches!(url, Expr::Url { literal, .. } if literal == "http://e"));
        } else {
            panic!("Expected a format object");
        }
    } else {
        panic!("Expected a definition");
    }
}

#[test]
fn test_route_to_defined_name() {
    let items = program(r#"def A {"x":"y"} route "/a" A"#);
    assert_eq!(items[1].kind(), ExprType::Route);
    if let Expr::Route { value, .. } = &items[1] {
        assert!(matches!(value.as_ref(), Expr::LoadDef { name, .. } if name == "A"));
    }
}

#[test]
fn test_route_to_undefined_name_fails_at_name() {
    let err = parse(tokenize(r#"route "/a" A"#).unwrap()).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Scope);
    assert_eq!(err.location(), Some(Location { line: 1, col: 12 }));
    assert_eq!(err.to_string(), "unknown name `A`");
}

#[test]
fn test_bad_status_code_fails_before_format() {
    let err = parse(tokenize(r#"response "/a" 20X {"x":"y"}"#).unwrap()).unwrap_err();
    assert_eq!(err.to_string(), "status code must be a 3-digit number");
    assert_eq!(err.offending_text(), Some("20X"));
}

#[test]
fn test_self_reference_fails() {
    let err = parse(tokenize("def A A").unwrap()).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Scope);
}

#[test]
fn test_format_preserves_insertion_order() {
    let items = program(r#"def A { "zeta": "1", "alpha": "2", "mid": "3" }"#);
    let Expr::Def { value, .. } = &items[0] else {
        panic!("Expected a definition");
    };
    let Expr::Format { entries, .. } = value.as_ref() else {
        panic!("Expected a format object");
    };
    assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_empty_format_fails() {
    assert!(parse(tokenize("def A {}").unwrap()).is_err());
}

#[test]
fn test_duplicate_keys_last_write_wins() {
    let items = program(r#"def A { "k": "a", "k": Url "b" }"#);
    let Expr::Def { value, .. } = &items[0] else {
        panic!("Expected a definition");
    };
    let Expr::Format { entries, .. } = value.as_ref() else {
        panic!("Expected a format object");
    };
    assert_eq!(entries.len(), 1);
    assert!(matches!(entries.get("k"), Some(Value::Expr(e)) if e.kind() == ExprType::Url));
}

#[test]
fn test_independent_parses_are_equal() {
    let tokens = tokenize(&fixture("petstore.ae")).unwrap();
    assert_eq!(parse(tokens.clone()).unwrap(), parse(tokens).unwrap());
}

#[test]
fn test_fixture_shapes() {
    let items = program(&fixture("petstore.ae"));
    let kinds: Vec<_> = items.iter().map(Expr::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ExprType::Def,
            ExprType::Def,
            ExprType::Route,
            ExprType::Route,
            ExprType::Response,
            ExprType::Response,
        ]
    );
    assert!(matches!(&items[5], Expr::Response { status: 404, path, .. } if path == "/pets/{id}"));
    assert_eq!(items[2].location(), Location { line: 10, col: 1 });
}

#[test]
fn test_pretty_tree() {
    let items = program(r#"route "/pets" ArrayOf { "id": "int" }"#);
    assert_eq!(
        items[0].pretty(),
        "ROUTE \"/pets\"\n  ARRAY_OF\n    FORMAT\n      \"id\":\n        \"int\"\n"
    );
}

#[test]
fn test_parse_source_attaches_named_source() {
    let source = fixture("unknown_name.ae");
    let err = parse_source("unknown_name.ae", &source).unwrap_err();
    assert_eq!(err.location(), Some(Location { line: 3, col: 17 }));
    assert_eq!(err.offending_text(), Some("Owner"));
    assert_eq!(err.source_text(), Some(source.as_str()));
}

#[test]
fn test_parse_source_reports_lex_errors_with_source() {
    let err = parse_source("bad.ae", r#"def A { "\x": "y" }"#).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Lex);
    assert_eq!(err.location(), Some(Location { line: 1, col: 11 }));
    assert!(err.source_text().is_some());
}
