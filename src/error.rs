//! Main Crate Error

use crate::common::{RAW_LEN_V4, RAW_LEN_V6};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Failure modes of decoding a node record from untrusted bytes.
///
/// All variants are recoverable: the caller drops the offending message and
/// may penalize the peer it came from. No partial record is ever produced
/// alongside one.
pub enum DecodeError {
    /// The input did not parse as a map-shaped container.
    #[error("Record is not a map-shaped container")]
    MalformedContainer,

    /// A required entry is absent. Unknown extra entries are tolerated.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The identifier blob is not exactly [ID_SIZE](crate::ID_SIZE) bytes.
    #[error("Invalid identifier length: {0}")]
    InvalidIdentifierLength(usize),

    /// The raw address blob length matches neither address family.
    #[error("Unsupported address family: raw address of {0} bytes, expected {RAW_LEN_V4} or {RAW_LEN_V6}")]
    UnsupportedAddressFamily(usize),

    /// The family tag embedded in the raw address disagrees with the
    /// family implied by its length.
    #[error("Corrupt address: family tag {found} where {expected} was implied")]
    CorruptAddress { found: u16, expected: u16 },
}

#[derive(thiserror::Error, Debug)]
/// Failure modes of encoding a node record.
pub enum EncodeError {
    /// Errors from the bencode serializer.
    #[error("Failed to serialize record: {0}")]
    BencodeError(#[from] serde_bencode::Error),
}
