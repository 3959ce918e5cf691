//! The input boundary: byte buffers plus caller encoding assertions.

use bstr::{BStr, BString, ByteSlice};

/// An encoding assertion made by the caller about the input bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// Conventionally UTF-8: invalid byte sequences inside string literals
    /// pass through into the decoded text verbatim. The lenient default.
    Utf8,
    /// Strict single-byte ASCII: any byte above 0x7F anywhere in the input
    /// fails the parse with an encoding error before scanning begins.
    Ascii,
}

/// A fully resident input buffer bound to an encoding assertion.
///
/// # Examples
///
/// ```
/// use jsonlax::{parse, ErrorKind, Source};
///
/// assert!(parse(Source::ascii(b"[1, 2]")).is_ok());
/// let err = parse(Source::ascii(b"[\"\x80\"]")).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Encoding);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Source<'a> {
    bytes: &'a [u8],
    encoding: Encoding,
}

impl<'a> Source<'a> {
    /// A buffer under the lenient default assertion.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, encoding: Encoding::Utf8 }
    }

    /// A buffer asserted to be single-byte ASCII.
    #[must_use]
    pub fn ascii(bytes: &'a [u8]) -> Self {
        Self { bytes, encoding: Encoding::Ascii }
    }

    /// The raw input bytes.
    #[must_use]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The caller's encoding assertion.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The input as a byte string slice.
    #[must_use]
    pub fn as_bstr(&self) -> &'a BStr {
        self.bytes.as_bstr()
    }
}

/// Conversion of caller-supplied inputs into a [`Source`].
///
/// Returning `None` means no scannable input exists at all (as opposed to an
/// empty buffer, which scans and fails as a syntax error); the parser reports
/// it as [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput) before
/// scanning begins. The blanket `Option` impl is the idiomatic way to reach
/// that state: `parse(None::<&str>)`.
pub trait IntoSource<'a> {
    /// Converts `self` into a source, or `None` when there is no input.
    fn into_source(self) -> Option<Source<'a>>;
}

impl<'a> IntoSource<'a> for Source<'a> {
    fn into_source(self) -> Option<Source<'a>> {
        Some(self)
    }
}

impl<'a> IntoSource<'a> for &'a str {
    fn into_source(self) -> Option<Source<'a>> {
        Some(Source::new(self.as_bytes()))
    }
}

impl<'a> IntoSource<'a> for &'a String {
    fn into_source(self) -> Option<Source<'a>> {
        Some(Source::new(self.as_bytes()))
    }
}

impl<'a> IntoSource<'a> for &'a [u8] {
    fn into_source(self) -> Option<Source<'a>> {
        Some(Source::new(self))
    }
}

impl<'a, const N: usize> IntoSource<'a> for &'a [u8; N] {
    fn into_source(self) -> Option<Source<'a>> {
        Some(Source::new(self))
    }
}

impl<'a> IntoSource<'a> for &'a Vec<u8> {
    fn into_source(self) -> Option<Source<'a>> {
        Some(Source::new(self))
    }
}

impl<'a> IntoSource<'a> for &'a BStr {
    fn into_source(self) -> Option<Source<'a>> {
        Some(Source::new(self.as_bytes()))
    }
}

impl<'a> IntoSource<'a> for &'a BString {
    fn into_source(self) -> Option<Source<'a>> {
        Some(Source::new(self.as_bytes()))
    }
}

impl<'a, I: IntoSource<'a>> IntoSource<'a> for Option<I> {
    fn into_source(self) -> Option<Source<'a>> {
        self.and_then(IntoSource::into_source)
    }
}
