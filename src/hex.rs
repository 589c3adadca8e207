//! Hexadecimal codec for fixed-length byte spans.

use hex_simd::{AsOut, AsciiCase};

/// Appends the hexadecimal representation of `bytes` to `dst`.
pub(crate) fn encode_into(dst: &mut String, bytes: &[u8], upper_case: bool) {
    let case = if upper_case {
        AsciiCase::Upper
    } else {
        AsciiCase::Lower
    };
    hex_simd::encode_append(bytes, dst, case);
}

/// Decodes exactly `N` bytes from `2 * N` hexadecimal digits of either case.
///
/// Returns `None` if `src` has the wrong length or contains a non-hexadecimal character.
pub(crate) fn decode<const N: usize>(src: &[u8]) -> Option<[u8; N]> {
    if src.len() != N * 2 {
        return None;
    }
    let mut bytes = [0u8; N];
    hex_simd::decode(src, bytes.as_mut_slice().as_out()).ok()?;
    Some(bytes)
}
