// tests/error_tests.rs

use gqt_lang::{ErrorKind, Location, ParseError, parse};
use indoc::indoc;

fn error(src: &str) -> ParseError {
    match parse(src) {
        Ok(operation) => panic!("Expected error, parsed {:?}", operation),
        Err(e) => e,
    }
}

fn at(offset: usize, column: usize) -> Location {
    Location::new(offset, 1, column)
}

// ============================================================================
// Token-level errors
// ============================================================================

#[test]
fn test_empty_document() {
    let e = error("");
    assert_eq!(e.kind, ErrorKind::UnexpectedEof("operation kind"));
    assert_eq!(e.location, at(0, 1));

    let e = error("  # nothing here\n");
    assert_eq!(e.kind, ErrorKind::UnexpectedEof("operation kind"));
    assert_eq!(e.location, Location::new(17, 2, 1));
}

#[test]
fn test_unknown_operation_kind() {
    let e = error("fragment { a }");
    assert_eq!(e.kind, ErrorKind::UnexpectedToken("operation kind"));
    assert_eq!(e.location, at(0, 1));

    assert!(error("queries { a }").kind.is_unexpected());
}

#[test]
fn test_missing_selection_set() {
    let e = error("query");
    assert_eq!(e.kind, ErrorKind::UnexpectedEof("selection set"));
    assert_eq!(e.location, at(5, 6));

    let e = error("query a");
    assert_eq!(e.kind, ErrorKind::UnexpectedToken("selection set"));
    assert_eq!(e.location, at(6, 7));
}

#[test]
fn test_unterminated_selection_set() {
    let e = error("query {");
    assert_eq!(e.kind, ErrorKind::UnexpectedEof("selection"));
    assert_eq!(e.location, at(7, 8));

    let e = error("query { a(x: 1) ");
    assert_eq!(e.kind, ErrorKind::UnexpectedEof("selection"));
}

#[test]
fn test_trailing_input() {
    let e = error("query { a } b");
    assert_eq!(e.kind, ErrorKind::UnexpectedToken("end of file"));
    assert_eq!(e.location, at(12, 13));

    assert!(parse("query { a }  # trailing comment\n").is_ok());
}

#[test]
fn test_missing_separator() {
    let e = error("query { a(x: 1 y: 2) }");
    assert_eq!(e.kind, ErrorKind::UnexpectedToken("',' or ')'"));
    assert_eq!(e.location, at(15, 16));
}

#[test]
fn test_inline_fragment_without_on() {
    let e = error("query { ... User { a } }");
    assert_eq!(e.kind, ErrorKind::UnexpectedToken("keyword 'on'"));
    assert_eq!(e.location, at(11, 12));

    let e = error("query { ...");
    assert_eq!(e.kind, ErrorKind::UnexpectedEof("keyword 'on'"));
    assert_eq!(e.location, at(11, 12));
}

#[test]
fn test_missing_value() {
    let e = error("query { a(x: ) }");
    assert_eq!(e.kind, ErrorKind::UnexpectedToken("value"));
    assert_eq!(e.location, at(13, 14));
}

#[test]
fn test_constraint_prefix_inside_parentheses() {
    let e = error("query { a(x: (< 3)) }");
    assert_eq!(e.kind, ErrorKind::UnexpectedToken("value"));
    assert_eq!(e.location, at(14, 15));
}

#[test]
fn test_object_field_requires_colon() {
    let e = error("query { a(x: {y}) }");
    assert_eq!(e.kind, ErrorKind::UnexpectedToken("':'"));
    assert_eq!(e.location, at(15, 16));
}

#[test]
fn test_unterminated_string() {
    let e = error(r#"query { a(x: "abc"#);
    assert_eq!(e.kind, ErrorKind::UnexpectedEof("end of string"));

    let e = error("query { a(x: \"ab\ncd\") }");
    assert_eq!(e.kind, ErrorKind::UnexpectedToken("end of string"));
    assert_eq!(e.location, at(16, 17));
}

// ============================================================================
// Empty containers
// ============================================================================

#[test]
fn test_empty_selection_set() {
    let e = error("query { a { } }");
    assert_eq!(e.kind, ErrorKind::EmptySelectionSet);
    assert_eq!(e.location, at(10, 11));
    assert!(!e.kind.is_unexpected());
}

#[test]
fn test_empty_argument_list() {
    let e = error("query { a() }");
    assert_eq!(e.kind, ErrorKind::EmptyArgumentList);
    assert_eq!(e.location, at(9, 10));
}

#[test]
fn test_empty_object() {
    let e = error("query { a(x: {}) }");
    assert_eq!(e.kind, ErrorKind::EmptyObject);
    assert_eq!(e.location, at(13, 14));
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_invalid_number() {
    let e = error("query { a(x: 1.) }");
    assert_eq!(e.kind, ErrorKind::InvalidNumber);
    assert_eq!(e.location, at(13, 14));
    assert_eq!(e.end, Some(at(15, 16)));

    assert_eq!(error("query { a(x: 12abc) }").kind, ErrorKind::InvalidNumber);
}

#[test]
fn test_invalid_escape() {
    let e = error(r#"query { a(x: "a\qb") }"#);
    assert_eq!(e.kind, ErrorKind::InvalidEscape);
    assert_eq!(e.location, at(15, 16));

    let e = error(r#"query { a(x: "\u12") }"#);
    assert_eq!(e.kind, ErrorKind::InvalidEscape);
}

#[test]
fn test_invalid_utf8_in_string() {
    let e = match parse(b"query { a(x: \"a\xff\xfe\") }".as_slice()) {
        Ok(operation) => panic!("Expected error, parsed {:?}", operation),
        Err(e) => e,
    };
    assert_eq!(e.kind, ErrorKind::InvalidUtf8);
    assert_eq!(e.location, at(15, 16));

    // a truncated multi-byte sequence
    assert!(matches!(
        parse(b"query { a(x: \"\xc3\") }".as_slice()),
        Err(ParseError { kind: ErrorKind::InvalidUtf8, .. })
    ));
}

#[test]
fn test_max_limit() {
    let e = error("query { max 0 { a } }");
    assert_eq!(e.kind, ErrorKind::InvalidMaxLimit);
    assert_eq!(e.location, at(12, 13));

    assert_eq!(error("query { max 1x { a } }").kind, ErrorKind::InvalidNumber);
}

// ============================================================================
// Nesting
// ============================================================================

#[test]
fn test_deep_parentheses() {
    let src = format!("query {{ a(x: {}1{}) }}", "(".repeat(1000), ")".repeat(1000));
    let e = error(&src);
    assert_eq!(e.kind, ErrorKind::NestingTooDeep);
    // the selection set and argument list take two levels
    assert_eq!(e.location, at(75, 76));
    assert_eq!(src.as_bytes()[75], b'(');
}

#[test]
fn test_deep_selection_sets() {
    let src = format!("query{}{}", " { a".repeat(1000), " }".repeat(1000));
    let e = error(&src);
    assert_eq!(e.kind, ErrorKind::NestingTooDeep);
    assert_eq!(e.location, at(262, 263));
}

#[test]
fn test_deep_arrays_objects_and_prefixes() {
    let arrays = format!("query {{ a(x: {}1{}) }}", "[".repeat(1000), "]".repeat(1000));
    assert_eq!(error(&arrays).kind, ErrorKind::NestingTooDeep);

    let objects = format!("query {{ a(x: {}1{}) }}", "{y: ".repeat(1000), "}".repeat(1000));
    assert_eq!(error(&objects).kind, ErrorKind::NestingTooDeep);

    let nots = format!("query {{ a(x: {}true) }}", "!".repeat(100_000));
    assert_eq!(error(&nots).kind, ErrorKind::NestingTooDeep);
}

#[test]
fn test_long_operator_chain() {
    let src = format!("query {{ a(x: 1{}) }}", " + 1".repeat(1000));
    let e = error(&src);
    assert_eq!(e.kind, ErrorKind::NestingTooDeep);
    assert_eq!(e.location, at(263, 264));
    assert_eq!(src.as_bytes()[263], b'+');
}

#[test]
fn test_nesting_within_limit() {
    let src = format!("query {{ a(x: {}1{}) }}", "(".repeat(20), ")".repeat(20));
    assert!(parse(&src).is_ok());

    let src = format!("query {{ a(x: 1{}, y: [{}]) }}", " * 2".repeat(60), "1, ".repeat(500));
    assert!(parse(&src).is_ok());

    // depth is released after each sibling
    let siblings = format!("query {{ {} }}", "a(x: ((((1)))), y: [[[2]]]) ".repeat(100));
    assert!(parse(&siblings).is_ok());
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_redeclared_argument() {
    let e = error("query { a(x: 1, x: 2) }");
    assert_eq!(e.kind, ErrorKind::RedeclaredArgument("x".to_string()));
    assert_eq!(e.location, at(16, 17));
}

#[test]
fn test_redeclared_object_field() {
    let e = error("query { a(x: {y: 1, y: 2}) }");
    assert_eq!(e.kind, ErrorKind::RedeclaredObjectField("y".to_string()));
    assert_eq!(e.location, at(20, 21));
}

#[test]
fn test_redeclared_variable() {
    let e = error("query { a(x=$v: 1) b(y=$v: 2) }");
    assert_eq!(e.kind, ErrorKind::RedeclaredVariable("v".to_string()));
    assert_eq!(e.location, at(23, 24));
}

#[test]
fn test_undefined_variable() {
    let e = error("query { a(x: $v) }");
    assert_eq!(e.kind, ErrorKind::UndefinedVariable("v".to_string()));
    assert_eq!(e.location, at(13, 14));
}

#[test]
fn test_undefined_variable_in_nested_expression() {
    let src = indoc! {"
        query {
          a(x=$a: 1) {
            b(y: [... > $a + $b])
          }
        }
    "};
    let e = error(src);
    assert_eq!(e.kind, ErrorKind::UndefinedVariable("b".to_string()));
    assert_eq!((e.location.line, e.location.column), (3, 22));
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn test_error_display() {
    assert_eq!(error("query { a { } }").to_string(), "1:11: empty selection set");
    assert_eq!(
        error("query {").to_string(),
        "1:8: unexpected end of file, expected selection"
    );
    assert_eq!(
        error("query { a(x: $v) }").to_string(),
        "1:14: undefined variable $v"
    );
}
