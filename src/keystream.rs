//! The keystream: a deterministic sequence of 32-byte masks indexed by
//! block number, derived from the hashed password and hashed nonce.
//!
//! There is no chaining between blocks. Each mask is a pure function of
//! `(hashed_password, hashed_nonce, index)`, so a compliant decoder can
//! recover any single block given only the header.

use crate::{varint, BLOCK_LEN};
use sha2::{Digest, Sha256};

/// Derive the mask for block `index`.
///
/// `m_i = SHA256( hashed_password || SHA256( index_bytes_i || hashed_nonce ) )`
///
/// `index_bytes_i` is the 32-byte zigzag-varint encoding of `index` from
/// [`varint::encode_index`]. Both hashes here are plain concatenate-then-hash
/// ("AddSHA256" in the reference implementation), never a modular add.
pub fn mask_for_block(
    hashed_password: &[u8; BLOCK_LEN],
    hashed_nonce: &[u8; BLOCK_LEN],
    index: u64,
) -> [u8; BLOCK_LEN] {
    let index_bytes = varint::encode_index(index);

    let mut inner = Sha256::new();
    inner.update(index_bytes);
    inner.update(hashed_nonce);
    let index_nonce_hash: [u8; BLOCK_LEN] = inner.finalize().into();

    let mut outer = Sha256::new();
    outer.update(hashed_password);
    outer.update(index_nonce_hash);
    outer.finalize().into()
}
