//! Configuration options for the decoder.

#![allow(clippy::struct_excessive_bools)]

use core::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::additions::AdditionsRegistry;
use crate::factory::{DecimalFactory, MappingFactory, SequenceFactory};

/// Nesting limit applied when [`ParserOptions::max_nesting`] is left at its
/// default.
pub const DEFAULT_MAX_NESTING: usize = 100;

/// Configuration options for a parse.
///
/// Options are validated once, before any byte is scanned, and never mutated
/// afterwards. All boolean options default to `false`.
///
/// # Examples
///
/// ```rust
/// use jsonlax::{parse_with, ParserOptions};
///
/// let options = ParserOptions {
///     allow_trailing_comma: true,
///     ..ParserOptions::default()
/// };
/// let v = parse_with("[1, 2, 3,]", options).unwrap();
/// assert_eq!(v.to_string(), "[1,2,3]");
/// ```
#[derive(Clone)]
pub struct ParserOptions {
    /// Maximum number of simultaneously open arrays and objects.
    ///
    /// `None` and `Some(0)` both disable the limit entirely.
    ///
    /// # Default
    ///
    /// `Some(100)`
    pub max_nesting: Option<usize>,

    /// Whether to accept the non-standard float sentinels `NaN`, `Infinity`,
    /// and `-Infinity`.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_nan: bool,

    /// Whether to accept one trailing separator before a closing bracket,
    /// as in `[1, 2, 3,]`.
    ///
    /// A comma with no preceding element is a syntax error regardless of
    /// this flag.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_comma: bool,

    /// Policy for repeated keys inside one object.
    ///
    /// When `true`, the later value silently replaces the earlier one at the
    /// key's original position. When `false`, the second occurrence of a key
    /// is a syntax error naming the key.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_duplicate_key: bool,

    /// Whether to intern object keys as the distinct [`Key::Symbol`] kind
    /// instead of plain text.
    ///
    /// Incompatible with `create_additions`.
    ///
    /// [`Key::Symbol`]: crate::Key::Symbol
    ///
    /// # Default
    ///
    /// `false`
    pub symbolize_names: bool,

    /// Whether to route every text produced by the parse through a per-parse
    /// intern pool, so equal texts share one allocation.
    ///
    /// Returned values are immutable either way; this is the observable
    /// deduplication effect.
    ///
    /// # Default
    ///
    /// `false`
    pub freeze: bool,

    /// Whether to reconstruct mappings carrying the sentinel key through the
    /// [`additions`](Self::additions) registry.
    ///
    /// Incompatible with `symbolize_names`.
    ///
    /// # Default
    ///
    /// `false`
    pub create_additions: bool,

    /// Registry of reconstruction functions and the sentinel key they are
    /// dispatched on. Consulted only when `create_additions` is set.
    pub additions: AdditionsRegistry,

    /// Custom container factory for arrays.
    ///
    /// # Default
    ///
    /// `None`, producing plain [`Sequence`](crate::Sequence) values.
    pub sequence_factory: Option<Arc<dyn SequenceFactory>>,

    /// Custom container factory for objects.
    ///
    /// # Default
    ///
    /// `None`, producing plain [`Mapping`](crate::Mapping) values.
    pub mapping_factory: Option<Arc<dyn MappingFactory>>,

    /// Exact-precision builder for number literals with a fraction or
    /// exponent. The literal text is handed to the factory unmodified, never
    /// round-tripped through a binary float.
    ///
    /// # Default
    ///
    /// `None`, producing [`Float`](crate::Value::Float) values.
    pub decimal_factory: Option<Arc<dyn DecimalFactory>>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_nesting: Some(DEFAULT_MAX_NESTING),
            allow_nan: false,
            allow_trailing_comma: false,
            allow_duplicate_key: false,
            symbolize_names: false,
            freeze: false,
            create_additions: false,
            additions: AdditionsRegistry::default(),
            sequence_factory: None,
            mapping_factory: None,
            decimal_factory: None,
        }
    }
}

impl ParserOptions {
    /// Rejects mutually incompatible combinations before scanning starts.
    pub(crate) fn validate(&self) -> Result<(), OptionsError> {
        if self.symbolize_names && self.create_additions {
            return Err(OptionsError::SymbolizeNamesWithCreateAdditions);
        }
        if self.create_additions && self.additions.create_id().is_empty() {
            return Err(OptionsError::EmptyCreateId);
        }
        Ok(())
    }

    /// The effective nesting limit: `None` when disabled by either spelling.
    pub(crate) fn nesting_limit(&self) -> Option<usize> {
        match self.max_nesting {
            None | Some(0) => None,
            limit => limit,
        }
    }
}

impl fmt::Debug for ParserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserOptions")
            .field("max_nesting", &self.max_nesting)
            .field("allow_nan", &self.allow_nan)
            .field("allow_trailing_comma", &self.allow_trailing_comma)
            .field("allow_duplicate_key", &self.allow_duplicate_key)
            .field("symbolize_names", &self.symbolize_names)
            .field("freeze", &self.freeze)
            .field("create_additions", &self.create_additions)
            .field("additions", &self.additions)
            .field("sequence_factory", &self.sequence_factory.as_ref().map(|_| ".."))
            .field("mapping_factory", &self.mapping_factory.as_ref().map(|_| ".."))
            .field("decimal_factory", &self.decimal_factory.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Validation failures for [`ParserOptions`] and the additions registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// `symbolize_names` and `create_additions` were both set.
    #[error("symbolize_names and create_additions cannot be combined")]
    SymbolizeNamesWithCreateAdditions,
    /// The sentinel key for tagged reconstruction is empty.
    #[error("the create-addition sentinel key must not be empty")]
    EmptyCreateId,
    /// A reconstruction function was registered under an empty type name.
    #[error("addition type names must not be empty")]
    EmptyAdditionName,
}
