//! Hex helpers for fixed-width boundary values. No external hex crate.

use crate::error::EncodingError;

/// Render bytes as lowercase hex.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// First four bytes as hex, for `Debug` output that must not dump whole values.
pub fn prefix(bytes: &[u8]) -> String {
    encode(&bytes[..bytes.len().min(4)])
}

/// Decode an arbitrary-length hex string.
pub fn decode(hex: &str) -> Result<Vec<u8>, EncodingError> {
    if hex.len() % 2 != 0 {
        return Err(EncodingError::OddLength);
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .filter(|pair| pair.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or(EncodingError::InvalidHex { position: i })
        })
        .collect()
}

/// Decode exactly `N` bytes from exactly `2 * N` hex characters.
///
/// No `0x` prefix, no surrounding whitespace, no short forms.
pub fn decode_fixed<const N: usize>(kind: &'static str, hex: &str) -> Result<[u8; N], EncodingError> {
    if hex.len() != N * 2 {
        return Err(EncodingError::WrongLength {
            kind,
            expected: N * 2,
            actual: hex.len(),
        });
    }
    let bytes = decode(hex)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}
