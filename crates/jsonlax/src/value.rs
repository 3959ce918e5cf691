//! Parse result types and the companion serializer.
//!
//! [`Value`] is the tagged union produced by a parse. Text payloads are
//! byte-backed ([`Text`] wraps a shared, conventionally-UTF-8 byte string) so
//! that bytes which do not form valid UTF-8 survive a round trip through the
//! decoder verbatim. The `Display` impl is the companion encoder used by the
//! round-trip tests.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use bstr::{BStr, BString, ByteSlice};
use indexmap::IndexMap;
use num_bigint::BigInt;

use crate::decimal::Decimal;

/// An ordered list of values.
pub type Sequence = Vec<Value>;

/// An insertion-ordered map from keys to values.
///
/// Keys are unique in the final state of any parsed mapping; overwriting an
/// existing key under the permissive duplicate-key policy keeps the key at
/// its original position.
pub type Mapping = IndexMap<Key, Value>;

/// An immutable, cheaply clonable text payload.
///
/// Content is conventionally UTF-8 but may contain arbitrary bytes; equality
/// and hashing are by content. Cloning shares the underlying allocation,
/// which is what makes the `freeze` interning optimization observable via
/// [`Text::ptr_eq`].
///
/// # Examples
///
/// ```
/// use jsonlax::Text;
///
/// let t = Text::from("foo");
/// assert_eq!(t, "foo");
/// assert_eq!(t.to_str(), Some("foo"));
/// ```
#[derive(Clone)]
pub struct Text(Arc<BString>);

impl Text {
    /// Creates a text from anything convertible to a byte string.
    pub fn new(bytes: impl Into<BString>) -> Self {
        Self(Arc::new(bytes.into()))
    }

    /// The raw content bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// The content as a byte string slice.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.0.as_bstr()
    }

    /// The content as `&str`, if it is valid UTF-8.
    #[must_use]
    pub fn to_str(&self) -> Option<&str> {
        self.0.to_str().ok()
    }

    /// Content length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether two texts share one allocation.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Text {}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<[u8]> for Text {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&[u8]> for Text {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for Text {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<BString> for Text {
    fn from(bytes: BString) -> Self {
        Self(Arc::new(bytes))
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An object key: plain text, or the interned key-kind produced by the
/// `symbolize_names` option.
///
/// The two kinds never compare equal even for identical content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A plain text key.
    Text(Text),
    /// An interned key.
    Symbol(Text),
}

impl Key {
    /// The key's text content, whichever kind it is.
    #[must_use]
    pub fn text(&self) -> &Text {
        match self {
            Self::Text(t) | Self::Symbol(t) => t,
        }
    }

    /// Returns `true` if this is the interned key-kind.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Text(Text::from(s))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.text().fmt(f)
    }
}

/// A decoded JSON value.
///
/// # Examples
///
/// ```
/// use jsonlax::{parse, Value};
///
/// let v = parse(r#"{"key": "value"}"#).unwrap();
/// assert!(v.is_mapping());
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The `null` literal.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A number literal with no fraction or exponent, at arbitrary precision.
    Integer(BigInt),
    /// A number literal with a fraction or exponent, as a double.
    Float(f64),
    /// An exact-precision number built by a configured decimal factory.
    Decimal(Decimal),
    /// A string literal.
    Text(Text),
    /// An array.
    Sequence(Sequence),
    /// An object.
    Mapping(Mapping),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Bool`].
    ///
    /// [`Bool`]: Value::Bool
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    /// Returns `true` if the value is [`Integer`].
    ///
    /// [`Integer`]: Value::Integer
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Float`].
    ///
    /// [`Float`]: Value::Float
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(..))
    }

    /// Returns `true` if the value is [`Decimal`].
    ///
    /// [`Decimal`]: Value::Decimal
    #[must_use]
    pub fn is_decimal(&self) -> bool {
        matches!(self, Self::Decimal(..))
    }

    /// Returns `true` if the value is [`Text`].
    ///
    /// [`Text`]: Value::Text
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(..))
    }

    /// Returns `true` if the value is [`Sequence`].
    ///
    /// [`Sequence`]: Value::Sequence
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(..))
    }

    /// Returns `true` if the value is [`Mapping`].
    ///
    /// [`Mapping`]: Value::Mapping
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(..))
    }

    /// The boolean payload, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if any.
    #[must_use]
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// The float payload, if any.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// The decimal payload, if any.
    #[must_use]
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Self::Decimal(d) => Some(d),
            _ => None,
        }
    }

    /// The text payload, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// The sequence payload, if any.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// The mapping payload, if any.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(BigInt::from(v))
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(Text::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(Text::from(v))
    }
}

impl From<Text> for Value {
    fn from(v: Text) -> Self {
        Self::Text(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<Sequence> for Value {
    fn from(v: Sequence) -> Self {
        Self::Sequence(v)
    }
}

impl From<Mapping> for Value {
    fn from(v: Mapping) -> Self {
        Self::Mapping(v)
    }
}

/// Escapes a text for inclusion in a JSON string literal.
///
/// Replaces quotes, backslashes, control characters (up to the basic
/// multilingual plane), and the Unicode line separators U+2028/U+2029 with
/// their escape sequences. Bytes that are not valid UTF-8 are rendered
/// lossily; the encoder's contract covers valid text.
pub(crate) fn write_escaped_text<W: fmt::Write>(src: &BStr, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{2028}' | '\u{2029}' => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Writes a float so the literal stays float-shaped: a bare integer rendering
/// gets a `.0` suffix, and the non-standard sentinels render as the literals
/// the `allow_nan` option accepts.
fn write_float<W: fmt::Write>(x: f64, f: &mut W) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let repr = x.to_string();
    f.write_str(&repr)?;
    if !repr.contains(['.', 'e', 'E']) {
        f.write_str(".0")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Integer(n) => n.fmt(f),
            Value::Float(x) => write_float(*x, f),
            Value::Decimal(d) => d.fmt(f),
            Value::Text(t) => {
                f.write_str("\"")?;
                write_escaped_text(t.as_bstr(), f)?;
                f.write_str("\"")
            }
            Value::Sequence(seq) => {
                f.write_str("[")?;
                let mut first = true;
                for v in seq {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Mapping(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped_text(k.text().as_bstr(), f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
