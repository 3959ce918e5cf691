mod builders;
mod limits;
mod strings;

use num_bigint::BigInt;

use crate::{Key, Value};

pub(crate) fn int(n: i64) -> Value {
    Value::Integer(BigInt::from(n))
}

pub(crate) fn text(s: &str) -> Value {
    Value::from(s)
}

pub(crate) fn seq(items: Vec<Value>) -> Value {
    Value::Sequence(items)
}

pub(crate) fn map(pairs: Vec<(&str, Value)>) -> Value {
    Value::Mapping(pairs.into_iter().map(|(k, v)| (Key::from(k), v)).collect())
}

pub(crate) fn assert_float_eq(value: &Value, expected: f64) {
    match value {
        Value::Float(x) => {
            assert!((x - expected).abs() < 1e-9, "expected {expected}, got {x}");
        }
        other => panic!("expected a float, got {other:?}"),
    }
}
