use thiserror::Error;

/// Everything that can go wrong decrypting a blob. Only `decrypt` returns a
/// `Result`; `encrypt` cannot fail beyond allocation/RNG failure from its
/// external collaborators.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The blob is shorter than the minimum size, its length isn't a
    /// multiple of 32 past the fixed 64-byte header, or it decodes to fewer
    /// than 2 blocks.
    #[error("malformed blob")]
    MalformedBlob,

    /// The outer checksum over `nonce || ciphertext` doesn't match. This
    /// gate fires before any password-keyed work, so it catches truncation,
    /// bit flips, and nonce tampering regardless of the password.
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// The outer checksum passed but the inner data hash didn't, after
    /// XOR-decrypting under the given password. The blob is structurally
    /// intact; the password is wrong.
    #[error("invalid password")]
    InvalidPassword,

    /// The length declared in the recovered frame exceeds the bytes
    /// actually available after the 4-byte length prefix.
    #[error("invalid length")]
    InvalidLength,
}
