//! The grammar engine.
//!
//! Drives the JSON value grammar over the scanner's token stream and emits
//! into the builder. Descent is iterative: an explicit scope stack holds the
//! in-progress containers, so container depth is bounded by the
//! `NestingGuard` alone and adversarially deep input cannot exhaust the
//! native call stack even when the limit is disabled. The guard increments
//! on every `[`/`{` and decrements on the matching close; exceeding the
//! configured limit aborts the parse immediately with a nesting error,
//! distinct from a syntax error.
//!
//! One `Parser` binds one input to one validated option set. `parse` borrows
//! the parser shared and allocates its scanner and builder per call, so
//! repeated calls are independent and yield equal trees.

use bstr::BStr;

use crate::builder::ValueBuilder;
use crate::diagnostics;
use crate::error::{ErrorSource, ParseError, SyntaxError};
use crate::factory::{MappingBuilder, SequenceBuilder};
use crate::options::ParserOptions;
use crate::scanner::{Scanner, Token};
use crate::source::{Encoding, IntoSource, Source};
use crate::value::{Key, Value};

/// A reusable parser bound to one input buffer and one configuration.
///
/// # Examples
///
/// ```
/// use jsonlax::{Parser, ParserOptions};
///
/// let parser = Parser::new(r#"{"a": "b"}"#, ParserOptions::default()).unwrap();
/// let first = parser.parse().unwrap();
/// let second = parser.parse().unwrap();
/// assert_eq!(first, second);
/// ```
pub struct Parser<'a> {
    source: Source<'a>,
    options: ParserOptions,
}

impl<'a> Parser<'a> {
    /// Binds `input` and `options`, rejecting absent input, inconsistent
    /// options, and encoding-assertion violations before any token is
    /// scanned.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidInput`], [`ErrorKind::Options`], or
    /// [`ErrorKind::Encoding`].
    ///
    /// [`ErrorKind::InvalidInput`]: crate::ErrorKind::InvalidInput
    /// [`ErrorKind::Options`]: crate::ErrorKind::Options
    /// [`ErrorKind::Encoding`]: crate::ErrorKind::Encoding
    pub fn new<I: IntoSource<'a>>(input: I, options: ParserOptions) -> Result<Self, ParseError> {
        let Some(source) = input.into_source() else {
            return Err(ParseError::unlocated(ErrorSource::InvalidInput(
                "no input supplied",
            )));
        };
        options.validate().map_err(|e| ParseError::unlocated(ErrorSource::Options(e)))?;
        if source.encoding() == Encoding::Ascii {
            if let Some(offset) = source.bytes().iter().position(|b| !b.is_ascii()) {
                let (line, column) = diagnostics::line_column(source.bytes(), offset);
                return Err(ParseError::new(
                    ErrorSource::Encoding { assertion: "US-ASCII", byte: source.bytes()[offset] },
                    line,
                    column,
                ));
            }
        }
        Ok(Self { source, options })
    }

    /// Parses the bound input. May be called repeatedly; each call scans the
    /// buffer afresh and yields an equal tree.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`] raised by scanning, the grammar, or the hooks.
    pub fn parse(&self) -> Result<Value, ParseError> {
        let mut scanner = Scanner::new(self.source.bytes(), self.options.allow_nan);
        let mut builder = ValueBuilder::new(&self.options);
        let value = self.parse_value(&mut scanner, &mut builder)?;
        // a complete value must be followed by nothing but whitespace and
        // comments; a second top-level value is trailing garbage too
        match scanner.next_token()? {
            Token::Eof => Ok(value),
            _ => Err(scanner.error_here(SyntaxError::TrailingContent(scanner.snippet_here()))),
        }
    }

    /// The bound input.
    #[must_use]
    pub fn source(&self) -> &'a BStr {
        self.source.as_bstr()
    }

    /// The bound options.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn parse_value(
        &self,
        scanner: &mut Scanner<'a>,
        builder: &mut ValueBuilder<'_>,
    ) -> Result<Value, ParseError> {
        let mut guard = NestingGuard::new(self.options.nesting_limit());
        let mut scopes: Vec<Scope> = Vec::new();

        'value: loop {
            // a value is expected here; a closing bracket is legal only for
            // an empty container or after a permitted trailing comma
            let token = scanner.next_token()?;
            let mut value = match token {
                Token::Null => Value::Null,
                Token::True => Value::Bool(true),
                Token::False => Value::Bool(false),
                Token::Number { start, end } => {
                    let literal = scanner.number_literal(start, end);
                    builder.number(literal).map_err(|e| scanner.error_here(e))?
                }
                Token::Str(bytes) => Value::Text(builder.text(bytes)),
                Token::BeginArray => {
                    guard.enter().map_err(|e| scanner.error_here(e))?;
                    scopes.push(Scope::Sequence { seq: builder.begin_sequence(), len: 0 });
                    continue 'value;
                }
                Token::BeginObject => {
                    guard.enter().map_err(|e| scanner.error_here(e))?;
                    let map = builder.begin_mapping();
                    match scanner.next_token()? {
                        Token::EndObject => {
                            guard.exit();
                            builder.finish_mapping(map).map_err(|e| scanner.error_here(e))?
                        }
                        Token::Str(bytes) => {
                            let key = builder.key(bytes);
                            expect_colon(scanner)?;
                            scopes.push(Scope::Mapping { map, pending: Some(key) });
                            continue 'value;
                        }
                        other => {
                            return Err(scanner.error_here(SyntaxError::Expected {
                                expected: "object key",
                                got: other.name(),
                            }));
                        }
                    }
                }
                Token::EndArray => match scopes.pop() {
                    Some(Scope::Sequence { seq, len }) => {
                        if len > 0 && !self.options.allow_trailing_comma {
                            return Err(scanner.error_here(SyntaxError::TrailingComma(']')));
                        }
                        guard.exit();
                        seq.finish()
                    }
                    _ => return Err(scanner.error_here(SyntaxError::UnexpectedToken("']'"))),
                },
                Token::Eof => {
                    return Err(scanner.error_here(SyntaxError::UnexpectedEndOfInput));
                }
                other @ (Token::EndObject | Token::Colon | Token::Comma) => {
                    return Err(scanner.error_here(SyntaxError::UnexpectedToken(other.name())));
                }
            };

            // attach the value, closing every container it completes
            loop {
                let Some(scope) = scopes.pop() else {
                    return Ok(value);
                };
                match scope {
                    Scope::Sequence { mut seq, len } => {
                        seq.append(value);
                        match scanner.next_token()? {
                            Token::Comma => {
                                scopes.push(Scope::Sequence { seq, len: len + 1 });
                                continue 'value;
                            }
                            Token::EndArray => {
                                guard.exit();
                                value = seq.finish();
                            }
                            other => {
                                return Err(scanner.error_here(SyntaxError::Expected {
                                    expected: "',' or ']' after array element",
                                    got: other.name(),
                                }));
                            }
                        }
                    }
                    Scope::Mapping { mut map, pending } => {
                        let Some(key) = pending else {
                            unreachable!("mapping scope without a pending key")
                        };
                        let displaced = map.assign(key.clone(), value);
                        if displaced.is_some() && !self.options.allow_duplicate_key {
                            return Err(scanner
                                .error_here(SyntaxError::DuplicateKey(key.text().to_string())));
                        }
                        match scanner.next_token()? {
                            Token::Comma => match scanner.next_token()? {
                                Token::Str(bytes) => {
                                    let key = builder.key(bytes);
                                    expect_colon(scanner)?;
                                    scopes.push(Scope::Mapping { map, pending: Some(key) });
                                    continue 'value;
                                }
                                Token::EndObject => {
                                    if !self.options.allow_trailing_comma {
                                        return Err(scanner
                                            .error_here(SyntaxError::TrailingComma('}')));
                                    }
                                    guard.exit();
                                    value = builder
                                        .finish_mapping(map)
                                        .map_err(|e| scanner.error_here(e))?;
                                }
                                other => {
                                    return Err(scanner.error_here(SyntaxError::Expected {
                                        expected: "object key",
                                        got: other.name(),
                                    }));
                                }
                            },
                            Token::EndObject => {
                                guard.exit();
                                value = builder
                                    .finish_mapping(map)
                                    .map_err(|e| scanner.error_here(e))?;
                            }
                            other => {
                                return Err(scanner.error_here(SyntaxError::Expected {
                                    expected: "',' or '}' after object value",
                                    got: other.name(),
                                }));
                            }
                        }
                    }
                }
            }
        }
    }
}

fn expect_colon(scanner: &mut Scanner<'_>) -> Result<(), ParseError> {
    let token = scanner.next_token()?;
    if token == Token::Colon {
        Ok(())
    } else {
        Err(scanner.error_here(SyntaxError::Expected {
            expected: "':' after object key",
            got: token.name(),
        }))
    }
}

/// An in-progress container on the explicit parse stack.
enum Scope {
    /// An open array and how many elements it holds so far.
    Sequence { seq: Box<dyn SequenceBuilder>, len: usize },
    /// An open object; `pending` holds the key whose value is being parsed.
    Mapping { map: Box<dyn MappingBuilder>, pending: Option<Key> },
}

/// Depth counter for open containers, compared against the configured limit.
struct NestingGuard {
    depth: usize,
    limit: Option<usize>,
}

impl NestingGuard {
    fn new(limit: Option<usize>) -> Self {
        Self { depth: 0, limit }
    }

    fn enter(&mut self) -> Result<(), ErrorSource> {
        self.depth += 1;
        match self.limit {
            Some(limit) if self.depth > limit => Err(ErrorSource::NestingTooDeep(self.depth)),
            _ => Ok(()),
        }
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }
}
