//! Abstraction over container and number construction.
//!
//! The grammar engine never builds containers directly: it asks a factory to
//! start one, feeds it elements or pairs in parse order, and takes whatever
//! the builder's `finish` produces. The default factories build the plain
//! [`Sequence`] and [`Mapping`] types; custom factories substitute
//! domain-specific construction behavior at configuration time.

use crate::decimal::Decimal;
use crate::value::{Key, Mapping, Sequence, Value};

/// An in-progress array.
pub trait SequenceBuilder {
    /// Appends one element, in parse order.
    fn append(&mut self, value: Value);

    /// Consumes the builder and produces the finished value.
    fn finish(self: Box<Self>) -> Value;
}

/// Starts [`SequenceBuilder`]s; one per array in the input.
pub trait SequenceFactory: Send + Sync {
    /// Begins a new array.
    fn start_sequence(&self) -> Box<dyn SequenceBuilder>;
}

/// An in-progress object.
pub trait MappingBuilder {
    /// Assigns one key/value pair, in parse order.
    ///
    /// Returns the value previously stored under `key`, if any; the grammar
    /// engine relies on this to enforce the duplicate-key policy, so
    /// implementations that can detect replacement should report it.
    fn assign(&mut self, key: Key, value: Value) -> Option<Value>;

    /// Consumes the builder and produces the finished value.
    fn finish(self: Box<Self>) -> Value;
}

/// Starts [`MappingBuilder`]s; one per object in the input.
pub trait MappingFactory: Send + Sync {
    /// Begins a new object.
    fn start_mapping(&self) -> Box<dyn MappingBuilder>;
}

/// Builds exact-precision numbers from matched literals.
///
/// Invoked for every number literal carrying a fraction or exponent when
/// configured; integer-shaped literals always become
/// [`Value::Integer`] regardless.
pub trait DecimalFactory: Send + Sync {
    /// Builds a value from the literal text, e.g. `"9.01"`.
    fn decimal(&self, literal: &str) -> Value;
}

/// Default factory producing plain [`Sequence`] values.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdSequenceFactory;

impl SequenceFactory for StdSequenceFactory {
    fn start_sequence(&self) -> Box<dyn SequenceBuilder> {
        Box::new(StdSequenceBuilder(Sequence::new()))
    }
}

#[derive(Debug, Default)]
struct StdSequenceBuilder(Sequence);

impl SequenceBuilder for StdSequenceBuilder {
    fn append(&mut self, value: Value) {
        self.0.push(value);
    }

    fn finish(self: Box<Self>) -> Value {
        Value::Sequence(self.0)
    }
}

/// Default factory producing plain [`Mapping`] values.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdMappingFactory;

impl MappingFactory for StdMappingFactory {
    fn start_mapping(&self) -> Box<dyn MappingBuilder> {
        Box::new(StdMappingBuilder(Mapping::new()))
    }
}

#[derive(Debug, Default)]
struct StdMappingBuilder(Mapping);

impl MappingBuilder for StdMappingBuilder {
    fn assign(&mut self, key: Key, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    fn finish(self: Box<Self>) -> Value {
        Value::Mapping(self.0)
    }
}

/// Decimal factory producing [`Value::Decimal`] via [`Decimal::from_literal`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactDecimalFactory;

impl DecimalFactory for ExactDecimalFactory {
    fn decimal(&self, literal: &str) -> Value {
        Value::Decimal(Decimal::from_literal(literal))
    }
}
