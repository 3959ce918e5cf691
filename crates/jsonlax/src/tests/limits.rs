use crate::{DEFAULT_MAX_NESTING, ErrorKind, ParserOptions, parse, parse_with};

fn nested_arrays(depth: usize) -> String {
    let mut s = String::new();
    s.push_str(&"[".repeat(depth));
    s.push_str("\"too deep\"");
    s.push_str(&"]".repeat(depth));
    s
}

fn with_limit(max_nesting: Option<usize>) -> ParserOptions {
    ParserOptions { max_nesting, ..ParserOptions::default() }
}

#[test]
fn test_default_limit_is_100() {
    assert_eq!(DEFAULT_MAX_NESTING, 100);
    assert!(parse(&nested_arrays(100)).is_ok());
    let err = parse(&nested_arrays(101)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
}

#[test]
fn test_explicit_limits() {
    let too_deep = nested_arrays(101);
    assert_eq!(
        parse_with(&too_deep, with_limit(Some(100))).unwrap_err().kind(),
        ErrorKind::NestingTooDeep
    );
    let ok = parse_with(&too_deep, with_limit(Some(101))).unwrap();

    // disabling the limit, by either spelling, admits the same structure
    assert_eq!(parse_with(&too_deep, with_limit(None)), Ok(ok.clone()));
    assert_eq!(parse_with(&too_deep, with_limit(Some(0))), Ok(ok));
}

#[test]
fn test_structure_identical_across_permitting_limits() {
    let input = nested_arrays(50);
    let strict = parse_with(&input, with_limit(Some(50))).unwrap();
    let loose = parse_with(&input, with_limit(Some(1000))).unwrap();
    let unlimited = parse_with(&input, with_limit(None)).unwrap();
    assert_eq!(strict, loose);
    assert_eq!(loose, unlimited);
}

#[test]
fn test_objects_count_toward_depth() {
    let input = "{\"a\":{\"b\":{\"c\":1}}}";
    assert!(parse_with(input, with_limit(Some(3))).is_ok());
    assert_eq!(
        parse_with(input, with_limit(Some(2))).unwrap_err().kind(),
        ErrorKind::NestingTooDeep
    );
}

#[test]
fn test_nesting_error_is_not_a_syntax_error() {
    let err = parse(&nested_arrays(101)).unwrap_err();
    assert_ne!(err.kind(), ErrorKind::Syntax);
    assert!(err.to_string().contains("nesting of 101 is too deep"), "{err}");
}

#[test]
fn test_guard_survives_deep_input_when_disabled() {
    // descent is iterative, so parse depth is bounded by memory rather than
    // the native call stack
    let deep = nested_arrays(10_000);
    assert!(parse_with(&deep, with_limit(None)).is_ok());
}
