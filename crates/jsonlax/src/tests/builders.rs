use std::sync::Arc;

use super::{int, map, seq, text};
use crate::{
    Decimal, ErrorKind, ExactDecimalFactory, Key, Mapping, MappingBuilder, MappingFactory,
    ParserOptions, Sequence, SequenceBuilder, SequenceFactory, Text, Value, parse, parse_with,
};

/// Appends in reverse, standing in for a domain-specific container.
struct ReversedFactory;

struct ReversedBuilder(Sequence);

impl SequenceFactory for ReversedFactory {
    fn start_sequence(&self) -> Box<dyn SequenceBuilder> {
        Box::new(ReversedBuilder(Sequence::new()))
    }
}

impl SequenceBuilder for ReversedBuilder {
    fn append(&mut self, value: Value) {
        self.0.insert(0, value);
    }

    fn finish(self: Box<Self>) -> Value {
        Value::Sequence(self.0)
    }
}

/// Upcases keys on assignment, standing in for a normalizing container.
struct UpcasingFactory;

struct UpcasingBuilder(Mapping);

impl MappingFactory for UpcasingFactory {
    fn start_mapping(&self) -> Box<dyn MappingBuilder> {
        Box::new(UpcasingBuilder(Mapping::new()))
    }
}

impl MappingBuilder for UpcasingBuilder {
    fn assign(&mut self, key: Key, value: Value) -> Option<Value> {
        let upper = key.text().to_str().map_or_else(
            || key.text().clone(),
            |s| Text::from(s.to_uppercase()),
        );
        self.0.insert(Key::Text(upper), value)
    }

    fn finish(self: Box<Self>) -> Value {
        Value::Mapping(self.0)
    }
}

#[test]
fn test_custom_sequence_factory() {
    let options = ParserOptions {
        sequence_factory: Some(Arc::new(ReversedFactory)),
        ..ParserOptions::default()
    };
    assert_eq!(
        parse_with("[1, 2, 3]", options),
        Ok(seq(vec![int(3), int(2), int(1)]))
    );
}

#[test]
fn test_custom_mapping_factory() {
    let options = ParserOptions {
        mapping_factory: Some(Arc::new(UpcasingFactory)),
        ..ParserOptions::default()
    };
    assert_eq!(
        parse_with("{\"foo\":\"bar\"}", options),
        Ok(map(vec![("FOO", text("bar"))]))
    );
}

#[test]
fn test_duplicate_policy_applies_through_custom_factory() {
    // distinct source keys collide after normalization; the displaced value
    // reported by assign drives the policy either way
    let reject = ParserOptions {
        mapping_factory: Some(Arc::new(UpcasingFactory)),
        ..ParserOptions::default()
    };
    assert_eq!(
        parse_with("{\"a\":1,\"A\":2}", reject).unwrap_err().kind(),
        ErrorKind::Syntax
    );

    let allow = ParserOptions {
        mapping_factory: Some(Arc::new(UpcasingFactory)),
        allow_duplicate_key: true,
        ..ParserOptions::default()
    };
    assert_eq!(parse_with("{\"a\":1,\"A\":2}", allow), Ok(map(vec![("A", int(2))])));
}

fn decimal_options() -> ParserOptions {
    ParserOptions {
        decimal_factory: Some(Arc::new(ExactDecimalFactory)),
        ..ParserOptions::default()
    }
}

#[test]
fn test_decimal_factory_builds_exact_values() {
    let value = parse_with("{\"foo\": 9.01234567890123456789}", decimal_options()).unwrap();
    assert_eq!(
        value,
        map(vec![(
            "foo",
            Value::Decimal(Decimal::from_literal("9.01234567890123456789"))
        )])
    );
}

#[test]
fn test_decimal_factory_receives_the_matched_literal() {
    assert_eq!(
        parse_with("3141e-3", decimal_options()),
        Ok(Value::Decimal(Decimal::from_literal("3.141")))
    );
    assert_eq!(
        parse_with("-0.5", decimal_options()),
        Ok(Value::Decimal(Decimal::from_literal("-5e-1")))
    );
}

#[test]
fn test_integers_bypass_the_decimal_factory() {
    assert_eq!(parse_with("23", decimal_options()), Ok(int(23)));
    assert_eq!(parse_with("[1, 2.5]", decimal_options()).unwrap().as_sequence().unwrap()[0], int(1));
}

#[test]
fn test_symbolize_names() {
    assert_eq!(
        parse("{\"foo\":\"bar\", \"baz\":\"quux\"}"),
        Ok(map(vec![("foo", text("bar")), ("baz", text("quux"))]))
    );

    let options = ParserOptions { symbolize_names: true, ..ParserOptions::default() };
    let value = parse_with("{\"foo\":\"bar\"}", options).unwrap();
    let mapping = value.as_mapping().unwrap();
    let key = mapping.keys().next().unwrap();
    assert!(key.is_symbol());
    assert_eq!(*key, Key::Symbol(Text::from("foo")));
    // the symbol kind never equals the plain text kind
    assert_ne!(*key, Key::Text(Text::from("foo")));
}

#[test]
fn test_symbolized_keys_are_interned_across_one_parse() {
    let options = ParserOptions { symbolize_names: true, ..ParserOptions::default() };
    let value = parse_with("[{\"a\":1},{\"a\":2}]", options).unwrap();
    let items = value.as_sequence().unwrap();
    let first = items[0].as_mapping().unwrap().keys().next().unwrap();
    let second = items[1].as_mapping().unwrap().keys().next().unwrap();
    assert!(Text::ptr_eq(first.text(), second.text()));
}

#[test]
fn test_freeze_interns_equal_texts() {
    let options = ParserOptions { freeze: true, ..ParserOptions::default() };
    let value = parse_with("[\"foo\", \"foo\"]", options.clone()).unwrap();
    let items = value.as_sequence().unwrap();
    assert!(Text::ptr_eq(
        items[0].as_text().unwrap(),
        items[1].as_text().unwrap()
    ));

    // keys and values share too
    let value = parse_with("{\"foo\": \"foo\"}", options).unwrap();
    let mapping = value.as_mapping().unwrap();
    let (key, val) = mapping.iter().next().unwrap();
    assert!(Text::ptr_eq(key.text(), val.as_text().unwrap()));
}

#[test]
fn test_without_freeze_texts_are_distinct_allocations() {
    let value = parse("[\"foo\", \"foo\"]").unwrap();
    let items = value.as_sequence().unwrap();
    assert_eq!(items[0], items[1]);
    assert!(!Text::ptr_eq(
        items[0].as_text().unwrap(),
        items[1].as_text().unwrap()
    ));
}
