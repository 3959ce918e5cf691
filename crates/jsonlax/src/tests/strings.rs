use rstest::rstest;

use super::{seq, text};
use crate::{ErrorKind, Source, Value, parse};

#[test]
fn test_simple_escapes() {
    assert_eq!(
        parse("[\"\\\"\\b\\n\\r\\t\\u0000\\u001f\"]"),
        Ok(seq(vec![text("\"\u{8}\n\r\t\0\u{1f}")]))
    );
    assert_eq!(parse("[\"\\\\\"]"), Ok(seq(vec![text("\\")])));
    assert_eq!(parse("[\"\\\"\"]"), Ok(seq(vec![text("\"")])));
    assert_eq!(parse("[\"\\/\"]"), Ok(seq(vec![text("/")])));
    assert_eq!(parse("[\"/\"]"), Ok(seq(vec![text("/")])));
    assert_eq!(parse("[\"\\f\"]"), Ok(seq(vec![text("\u{c}")])));
}

#[test]
fn test_backslash_fixtures() {
    assert_eq!(
        parse("[\"\\\\.(?i:gif|jpe?g|png)$\"]"),
        Ok(seq(vec![text("\\.(?i:gif|jpe?g|png)$")]))
    );
    assert_eq!(parse("[\"\\\\\\\"\\\\\"]"), Ok(seq(vec![text("\\\"\\")])));
    let quotes = "\"".repeat(25);
    let escaped = "\\\"".repeat(25);
    assert_eq!(parse(&format!("[\"{escaped}\"]")), Ok(seq(vec![text(&quotes)])));
}

#[test]
fn test_unicode_escapes() {
    assert_eq!(parse("[\"\\u00e9\"]"), Ok(seq(vec![text("\u{e9}")])));
    assert_eq!(parse("[\"\\u00e9é\"]"), Ok(seq(vec![text("éé")])));
    assert_eq!(parse("\"\\uaaaa\""), Ok(text("\u{aaaa}")));
    assert_eq!(parse("\"\\u0001a\\u0002\""), Ok(text("\u{1}a\u{2}")));
}

#[test]
fn test_surrogate_pairs_combine() {
    assert_eq!(parse("[\"\\ud83d\\ude00\"]"), Ok(seq(vec![text("😀")])));
    assert_eq!(parse("\"\\uD834\\uDD1E\""), Ok(text("\u{1D11E}")));
}

#[test]
fn test_unpaired_surrogates_pass_through() {
    // an unpaired half keeps its three-byte encoded form rather than failing
    let high = parse("\"\\ud800\"").unwrap();
    assert_eq!(high.as_text().unwrap().as_bytes(), [0xED, 0xA0, 0x80]);

    let low = parse("\"\\udc00\"").unwrap();
    assert_eq!(low.as_text().unwrap().as_bytes(), [0xED, 0xB0, 0x80]);

    let followed = parse("\"\\ud800x\"").unwrap();
    assert_eq!(followed.as_text().unwrap().as_bytes(), [0xED, 0xA0, 0x80, b'x']);
}

#[test]
fn test_high_surrogate_before_real_pair() {
    let value = parse("\"\\ud800\\ud83d\\ude00\"").unwrap();
    let mut expected = vec![0xED, 0xA0, 0x80];
    expected.extend_from_slice("😀".as_bytes());
    assert_eq!(value.as_text().unwrap().as_bytes(), expected.as_slice());
}

#[rstest]
#[case("\"\\u\"")]
#[case("\"\\ua\"")]
#[case("\"\\uaa\"")]
#[case("\"\\uaaa\"")]
#[case("\"\\u____\"")]
#[case("\"\\u1_2_\"")]
#[case("\"\\uzzzz\"")]
fn test_invalid_unicode_escapes(#[case] input: &str) {
    assert_eq!(parse(input).unwrap_err().kind(), ErrorKind::Syntax, "{input}");
}

#[rstest]
#[case("\"\\x\"")]
#[case("\"\\'\"")]
#[case("\"\\0\"")]
fn test_invalid_simple_escapes(#[case] input: &str) {
    assert_eq!(parse(input).unwrap_err().kind(), ErrorKind::Syntax, "{input}");
}

#[test]
fn test_raw_invalid_bytes_are_preserved() {
    let value = parse(b"[\"\x80\"]").unwrap();
    let Value::Sequence(items) = value else { panic!("expected a sequence") };
    let t = items[0].as_text().unwrap();
    assert_eq!(t.as_bytes(), [0x80]);
    assert!(t.to_str().is_none());
}

#[test]
fn test_multibyte_text_survives() {
    assert_eq!(parse("[\"n€st€d\"]"), Ok(seq(vec![text("n€st€d")])));
}

#[test]
fn test_ascii_assertion() {
    assert!(parse(Source::ascii(b"{\"foo\": 1}")).is_ok());

    let err = parse(Source::ascii(b"[\"\x80\"]")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);

    // multi-byte UTF-8 violates a single-byte assertion even when valid
    let err = parse(Source::ascii("[\"é\"]".as_bytes())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);
}

#[test]
fn test_raw_control_bytes_are_rejected() {
    assert_eq!(parse(b"[\"\x01\"]").unwrap_err().kind(), ErrorKind::Syntax);
    assert_eq!(parse("[\"a\nb\"]").unwrap_err().kind(), ErrorKind::Syntax);
}

#[test]
fn test_unterminated_strings() {
    assert!(parse("\"abc").is_err());
    assert!(parse("\"abc\\").is_err());
    assert!(parse("[\"abc]").is_err());
}
