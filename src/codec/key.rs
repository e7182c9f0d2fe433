// src/codec/key.rs
//! Tagged key codec.
//!
//! Encodes a cryptographic key reference into one of two fixed-width
//! buffers: raw public key material (hex input, 130 bytes) or a chain
//! address (104 bytes). Input shorter than the buffer is zero-padded;
//! oversized or non-hex input is rejected with `MalformedEncoding` rather
//! than truncated — silent truncation of key material would corrupt the
//! identity it is supposed to prove.
//!
//! Rendering is asymmetric on purpose: `publicKeyHex` always renders the
//! full 130 bytes including padding, while an address strips its padding
//! back to the original string.

use crate::error::CodecError;
use crate::models::record::{KeyMaterial, CHAIN_ADDRESS_WIDTH, PUBLIC_KEY_WIDTH};

/// A key rendered back to its display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedKey {
    /// Lower-case hex of the full 130-byte buffer, padding included.
    PublicKeyHex(String),
    /// The stored address string, padding stripped.
    ChainAddress(String),
}

/// Decodes a hex public key into its 130-byte buffer.
///
/// # Errors
/// `MalformedEncoding` on invalid hex digits, odd digit count, or more
/// than 130 decoded bytes.
pub fn parse_public_key_hex(input: &str) -> Result<KeyMaterial, CodecError> {
    let raw = hex::decode(input)
        .map_err(|e| CodecError::malformed("publicKeyHex", format!("invalid hex: {}", e)))?;
    if raw.len() > PUBLIC_KEY_WIDTH {
        return Err(CodecError::malformed(
            "publicKeyHex",
            format!("{} bytes exceeds the {}-byte key buffer", raw.len(), PUBLIC_KEY_WIDTH),
        ));
    }
    let mut buf = [0u8; PUBLIC_KEY_WIDTH];
    buf[..raw.len()].copy_from_slice(&raw);
    Ok(KeyMaterial::PublicKeyHex(buf))
}

/// Encodes key material given as an opaque string (e.g. multibase) into
/// the 130-byte key buffer, byte for byte.
pub fn parse_raw_key_bytes(input: &str) -> Result<KeyMaterial, CodecError> {
    let raw = input.as_bytes();
    if raw.len() > PUBLIC_KEY_WIDTH {
        return Err(CodecError::malformed(
            "publicKeyMultibase",
            format!("{} bytes exceeds the {}-byte key buffer", raw.len(), PUBLIC_KEY_WIDTH),
        ));
    }
    let mut buf = [0u8; PUBLIC_KEY_WIDTH];
    buf[..raw.len()].copy_from_slice(raw);
    Ok(KeyMaterial::PublicKeyHex(buf))
}

/// Encodes a chain address into its 104-byte buffer.
///
/// # Errors
/// `MalformedEncoding` if the address exceeds 104 bytes.
pub fn parse_chain_address(input: &str) -> Result<KeyMaterial, CodecError> {
    let raw = input.as_bytes();
    if raw.len() > CHAIN_ADDRESS_WIDTH {
        return Err(CodecError::malformed(
            "AdaAddress",
            format!(
                "{} bytes exceeds the {}-byte address buffer",
                raw.len(),
                CHAIN_ADDRESS_WIDTH
            ),
        ));
    }
    let mut buf = [0u8; CHAIN_ADDRESS_WIDTH];
    buf[..raw.len()].copy_from_slice(raw);
    Ok(KeyMaterial::ChainAddress(buf))
}

/// Renders stored key material back to display form.
///
/// # Errors
/// `MalformedEncoding` if stored address bytes are not valid UTF-8.
pub fn render_key(key: &KeyMaterial) -> Result<RenderedKey, CodecError> {
    match key {
        KeyMaterial::PublicKeyHex(buf) => Ok(RenderedKey::PublicKeyHex(hex::encode(buf))),
        KeyMaterial::ChainAddress(buf) => {
            let address = crate::codec::bytes::string_from_padded(buf, "AdaAddress")?;
            Ok(RenderedKey::ChainAddress(address))
        }
    }
}
