//! A symmetric, password-based byte codec.
//!
//! `encrypt`/`decrypt` turn an arbitrary byte payload into a self-describing
//! ciphertext blob and back, authenticating both the ciphertext and the
//! password. The construction is built from one primitive (SHA-256, used as
//! a pseudo-random function over `(password, nonce, block index)`) plus a
//! random 32-byte nonce. There is no block cipher and no KDF. Both
//! plaintext and ciphertext are fully buffered in memory; there is no
//! streaming API.
//!
//! # Blob layout
//!
//! ```text
//! offset  size     field
//! 0       32       outer checksum S = SHA256(N || C*)
//! 32      32       nonce N
//! 64      32*n     ciphertext blocks C_0 .. C_{n-1}
//! ```
//!
//! Decryption runs two authentication gates in order: the outer checksum
//! (structural integrity, independent of the password) and the inner data
//! hash (password correctness), then extracts the declared payload length.
//!
//! See [`CodecError`] for the closed set of ways decryption can fail.

mod block;
mod codec;
mod error;
mod frame;
mod keystream;
mod varint;

pub use codec::{decrypt, encrypt};
pub use error::CodecError;

/// Size in bytes of every hash output, block, and the nonce: SHA-256's
/// digest width, reused throughout the format as the unit of framing.
pub const BLOCK_LEN: usize = 32;
