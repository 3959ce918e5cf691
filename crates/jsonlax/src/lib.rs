//! A tolerant, resource-bounded JSON decoder.
//!
//! `jsonlax` turns a fully resident text or byte buffer into a tree of
//! [`Value`]s. On top of strict JSON it tolerates a well-defined set of
//! extensions, each behind an option: line and block comments are always
//! skipped between tokens, trailing commas and non-standard float sentinels
//! are opt-in, and repeated object keys follow an explicit policy. A nesting
//! limit bounds resource use against adversarially deep input, and failures
//! carry a programmatic kind plus a precise line/column with a bounded
//! source snippet.
//!
//! ```
//! use jsonlax::{parse, Value};
//!
//! let value = parse(r#"{"tags": [1, 2] /* trailing comment */}"#).unwrap();
//! assert!(value.is_mapping());
//! assert_eq!(value.to_string(), r#"{"tags":[1,2]}"#);
//! ```
//!
//! Construction is pluggable: custom sequence/mapping factories, an exact
//! decimal factory for precision-sensitive numbers, key symbolization, text
//! interning, and a tagged-object reconstruction registry are all selected
//! through [`ParserOptions`].

mod additions;
mod builder;
mod decimal;
mod diagnostics;
mod error;
mod factory;
mod options;
mod parser;
mod scanner;
mod source;
mod value;

#[cfg(test)]
mod tests;

pub use additions::{AdditionsRegistry, CreateFn, DEFAULT_CREATE_ID};
pub use decimal::Decimal;
pub use error::{ErrorKind, ErrorSource, ParseError, SyntaxError};
pub use factory::{
    DecimalFactory, ExactDecimalFactory, MappingBuilder, MappingFactory, SequenceBuilder,
    SequenceFactory, StdMappingFactory, StdSequenceFactory,
};
pub use options::{DEFAULT_MAX_NESTING, OptionsError, ParserOptions};
pub use parser::Parser;
pub use source::{Encoding, IntoSource, Source};
pub use value::{Key, Mapping, Sequence, Text, Value};

/// Parses `input` under default options.
///
/// # Errors
///
/// Any [`ParseError`]; see [`ErrorKind`] for the classification.
///
/// # Examples
///
/// ```
/// use jsonlax::parse;
///
/// let v = parse("[1, 2, 3]").unwrap();
/// assert!(v.is_sequence());
/// assert!(parse("[1, 2,").is_err());
/// ```
pub fn parse<'a, I: IntoSource<'a>>(input: I) -> Result<Value, ParseError> {
    Parser::new(input, ParserOptions::default())?.parse()
}

/// Parses `input` under the given options.
///
/// # Errors
///
/// Any [`ParseError`]; see [`ErrorKind`] for the classification.
pub fn parse_with<'a, I: IntoSource<'a>>(
    input: I,
    options: ParserOptions,
) -> Result<Value, ParseError> {
    Parser::new(input, options)?.parse()
}
