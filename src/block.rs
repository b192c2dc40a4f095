//! The 32-byte XOR block codec: the innermost operation applied once per
//! block, with the keystream mask supplying the other XOR operand.

use crate::BLOCK_LEN;

/// XOR two 32-byte blocks together. Self-inverse: encrypting and decrypting
/// a block are the same operation given the same mask.
pub fn xor_block(a: &[u8; BLOCK_LEN], b: &[u8; BLOCK_LEN]) -> [u8; BLOCK_LEN] {
    let mut out = [0u8; BLOCK_LEN];
    for i in 0..BLOCK_LEN {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// Split a buffer whose length is a multiple of 32 into owned 32-byte
/// blocks, in order.
///
/// Panics if `bytes.len()` isn't a multiple of `BLOCK_LEN`; callers in this
/// crate only ever pass already-aligned buffers (the framed buffer and the
/// ciphertext body are both padded/validated to block alignment upstream).
pub fn split_blocks(bytes: &[u8]) -> Vec<[u8; BLOCK_LEN]> {
    assert_eq!(bytes.len() % BLOCK_LEN, 0, "buffer not block-aligned");
    bytes
        .chunks_exact(BLOCK_LEN)
        .map(|chunk| chunk.try_into().expect("chunk is exactly BLOCK_LEN bytes"))
        .collect()
}
