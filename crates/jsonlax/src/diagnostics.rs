//! Failure-position bookkeeping: line/column derivation and bounded source
//! snippets for error messages.

use bstr::ByteSlice;

/// Upper bound, in codepoints, on source text quoted inside an error message.
///
/// Measured forward from the failure offset, independent of how much input
/// precedes it, so message size stays bounded no matter how large the buffer
/// is.
pub(crate) const SNIPPET_MAX_CHARS: usize = 10;

/// Computes the 1-based line and column of `offset` within `bytes`.
///
/// The line is the number of newline bytes before the offset plus one; the
/// column restarts after each newline and is counted in bytes.
pub(crate) fn line_column(bytes: &[u8], offset: usize) -> (usize, usize) {
    let offset = offset.min(bytes.len());
    let before = &bytes[..offset];
    let line = 1 + bytecount_newlines(before);
    let column = match before.rfind_byte(b'\n') {
        Some(newline) => offset - newline,
        None => offset + 1,
    };
    (line, column)
}

fn bytecount_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

/// Returns at most [`SNIPPET_MAX_CHARS`] codepoints starting at `offset`,
/// decoded lossily for display.
pub(crate) fn snippet(bytes: &[u8], offset: usize) -> String {
    let offset = offset.min(bytes.len());
    bytes[offset..].chars().take(SNIPPET_MAX_CHARS).collect()
}
