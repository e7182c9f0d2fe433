// src/codec/bytes.rs
//! Zero-padded fixed-width byte buffers.
//!
//! The ledger storage model has no variable-length types: every string is
//! stored as a fixed-width buffer, zero-padded on the right. These helpers
//! implement the two directions of that convention.

use crate::error::CodecError;

/// Encodes a string into a zero-padded fixed-width buffer.
///
/// Bytes past `N` are dropped silently; identifier validation is the
/// caller's responsibility.
pub fn to_fixed_bytes<const N: usize>(input: &str) -> [u8; N] {
    let mut buf = [0u8; N];
    let raw = input.as_bytes();
    let len = raw.len().min(N);
    buf[..len].copy_from_slice(&raw[..len]);
    buf
}

/// Strips trailing zero padding from a fixed-width buffer.
pub fn strip_padding(buf: &[u8]) -> &[u8] {
    let end = buf
        .iter()
        .rposition(|&b| b != 0)
        .map(|pos| pos + 1)
        .unwrap_or(0);
    &buf[..end]
}

/// Recovers a string from a zero-padded buffer.
///
/// # Errors
/// `MalformedEncoding` if the unpadded bytes are not valid UTF-8.
pub fn string_from_padded(buf: &[u8], field: &'static str) -> Result<String, CodecError> {
    let raw = strip_padding(buf);
    String::from_utf8(raw.to_vec())
        .map_err(|e| CodecError::malformed(field, format!("invalid UTF-8 in stored bytes: {}", e)))
}
