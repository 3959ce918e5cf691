//! Per-parse materialization state.
//!
//! Sits between the grammar engine and the value types: converts number
//! spans and decoded string bytes into values, selects the configured
//! container factories, routes texts through the intern pool when the
//! options ask for it, and applies tagged reconstruction to finished
//! mappings.

use std::collections::HashMap;

use bstr::{BString, ByteSlice};
use num_bigint::BigInt;

use crate::error::{ErrorSource, SyntaxError};
use crate::factory::{
    MappingBuilder, MappingFactory, SequenceBuilder, SequenceFactory, StdMappingFactory,
    StdSequenceFactory,
};
use crate::options::ParserOptions;
use crate::value::{Key, Text, Value};

pub(crate) struct ValueBuilder<'o> {
    options: &'o ParserOptions,
    interner: HashMap<BString, Text>,
}

impl<'o> ValueBuilder<'o> {
    pub(crate) fn new(options: &'o ParserOptions) -> Self {
        Self { options, interner: HashMap::new() }
    }

    pub(crate) fn begin_sequence(&self) -> Box<dyn SequenceBuilder> {
        match &self.options.sequence_factory {
            Some(factory) => factory.start_sequence(),
            None => StdSequenceFactory.start_sequence(),
        }
    }

    pub(crate) fn begin_mapping(&self) -> Box<dyn MappingBuilder> {
        match &self.options.mapping_factory {
            Some(factory) => factory.start_mapping(),
            None => StdMappingFactory.start_mapping(),
        }
    }

    /// Materializes a string value.
    pub(crate) fn text(&mut self, bytes: Vec<u8>) -> Text {
        if self.options.freeze {
            self.intern(bytes)
        } else {
            Text::from(bytes)
        }
    }

    /// Materializes an object key, interned and symbolized per the options.
    pub(crate) fn key(&mut self, bytes: Vec<u8>) -> Key {
        if self.options.symbolize_names {
            Key::Symbol(self.intern(bytes))
        } else if self.options.freeze {
            Key::Text(self.intern(bytes))
        } else {
            Key::Text(Text::from(bytes))
        }
    }

    fn intern(&mut self, bytes: Vec<u8>) -> Text {
        let content = BString::from(bytes);
        if let Some(text) = self.interner.get(&content) {
            return text.clone();
        }
        let text = Text::from(content.clone());
        self.interner.insert(content, text.clone());
        text
    }

    /// Materializes a number span: sentinel floats, arbitrary-precision
    /// integers, and fraction/exponent literals through the decimal factory
    /// when one is configured.
    pub(crate) fn number(&self, literal: &[u8]) -> Result<Value, ErrorSource> {
        match literal {
            b"NaN" => return Ok(Value::Float(f64::NAN)),
            b"Infinity" => return Ok(Value::Float(f64::INFINITY)),
            b"-Infinity" => return Ok(Value::Float(f64::NEG_INFINITY)),
            _ => {}
        }
        // the number grammar admits ASCII only, so these conversions cannot
        // fail on scanner-produced spans
        let text = literal
            .to_str()
            .map_err(|_| bad_number(literal))?;
        if text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
            if let Some(factory) = &self.options.decimal_factory {
                return Ok(factory.decimal(text));
            }
            let float = text.parse::<f64>().map_err(|_| bad_number(literal))?;
            Ok(Value::Float(float))
        } else {
            let int = text.parse::<BigInt>().map_err(|_| bad_number(literal))?;
            Ok(Value::Integer(int))
        }
    }

    /// Finishes a mapping and applies tagged reconstruction when enabled.
    pub(crate) fn finish_mapping(
        &mut self,
        map: Box<dyn MappingBuilder>,
    ) -> Result<Value, ErrorSource> {
        let value = map.finish();
        if !self.options.create_additions {
            return Ok(value);
        }
        let mut mapping = match value {
            Value::Mapping(mapping) => mapping,
            other => return Ok(other),
        };
        let registry = &self.options.additions;
        let sentinel = Key::Text(Text::from(registry.create_id()));
        let name = match mapping.get(&sentinel) {
            Some(Value::Text(name)) => match name.to_str() {
                Some(name) => name.to_owned(),
                None => return Ok(Value::Mapping(mapping)),
            },
            _ => return Ok(Value::Mapping(mapping)),
        };
        let Some(create) = registry.get(&name) else {
            return Err(ErrorSource::UnknownAddition(name));
        };
        mapping.shift_remove(&sentinel);
        create.as_ref()(mapping).map_err(|message| ErrorSource::AdditionFailed(name, message))
    }
}

fn bad_number(literal: &[u8]) -> ErrorSource {
    ErrorSource::Syntax(SyntaxError::InvalidNumber(
        literal.chars().take(crate::diagnostics::SNIPPET_MAX_CHARS).collect(),
    ))
}
