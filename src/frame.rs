//! The Framer: prepend a length prefix to plaintext and pad to a 32-byte
//! multiple. This is `F` in the format, the buffer the inner data hash
//! covers.

use crate::varint;
use zeroize::Zeroizing;

/// Build the framed buffer `F = len_prefix || plaintext || pad`.
///
/// `len_prefix` is always exactly [`varint::LENGTH_PREFIX_LEN`] bytes
/// regardless of how few bytes the varint actually needs; `pad` is the
/// minimum number of zero bytes (0 to 31) making the total a multiple of 32.
///
/// Returned in a `Zeroizing` buffer since `F` carries the plaintext itself.
pub fn build(plaintext: &[u8]) -> Zeroizing<Vec<u8>> {
    let mut buf = Vec::with_capacity(varint::LENGTH_PREFIX_LEN + plaintext.len() + 31);
    buf.extend_from_slice(&varint::encode_length_prefix(plaintext.len() as u64));
    buf.extend_from_slice(plaintext);

    let remainder = buf.len() % crate::BLOCK_LEN;
    if remainder != 0 {
        buf.resize(buf.len() + (crate::BLOCK_LEN - remainder), 0);
    }

    Zeroizing::new(buf)
}

/// Read the declared plaintext length out of a framed buffer's first
/// [`varint::LENGTH_PREFIX_LEN`] bytes.
///
/// Panics if `framed` is shorter than the length-prefix window; callers only
/// pass a recovered `F'` that is already known to be at least 32 bytes.
pub fn read_length_prefix(framed: &[u8]) -> u64 {
    let window: &[u8; varint::LENGTH_PREFIX_LEN] = framed[..varint::LENGTH_PREFIX_LEN]
        .try_into()
        .expect("framed buffer carries a full length-prefix window");
    varint::decode_length_prefix(window)
}
