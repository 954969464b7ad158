//! Node Id in the DHT identifier space
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
};

use crate::error::DecodeError;

/// The size of node IDs in bytes.
pub const ID_SIZE: usize = 20;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Opaque node Id: a fixed 20-byte value identifying a node in the
/// identifier space.
///
/// Equality and ordering are byte-wise. This crate interprets no internal
/// structure; distance metrics and Id generation policies belong to the
/// surrounding DHT. On the wire an Id is a plain byte string.
pub struct Id(#[serde(with = "serde_bytes")] pub [u8; ID_SIZE]);

impl Id {
    pub fn random() -> Id {
        let mut rng = rand::thread_rng();
        let random_bytes: [u8; ID_SIZE] = rng.gen();

        Id(random_bytes)
    }

    /// Create a new Id from some bytes. Returns Err if `bytes` is not of
    /// length [ID_SIZE].
    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> Result<Id, DecodeError> {
        let bytes = bytes.as_ref();
        if bytes.len() != ID_SIZE {
            return Err(DecodeError::InvalidIdentifierLength(bytes.len()));
        }

        let mut tmp: [u8; ID_SIZE] = [0; ID_SIZE];
        tmp[..ID_SIZE].clone_from_slice(&bytes[..ID_SIZE]);

        Ok(Id(tmp))
    }

    pub fn as_bytes(&self) -> &[u8; ID_SIZE] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl From<[u8; ID_SIZE]> for Id {
    fn from(bytes: [u8; ID_SIZE]) -> Id {
        Id(bytes)
    }
}

impl Display for Id {
    /// Lowercase hexadecimal, 40 characters.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Debug for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self)
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Id, ParseIdError> {
        if s.len() != ID_SIZE * 2 {
            return Err(ParseIdError::InvalidHexLength(s.len()));
        }
        if !s.is_ascii() {
            return Err(ParseIdError::InvalidHexCharacter);
        }

        let mut bytes = [0u8; ID_SIZE];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| ParseIdError::InvalidHexCharacter)?;
        }

        Ok(Id(bytes))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Errors parsing an Id from its hexadecimal form.
pub enum ParseIdError {
    #[error("Invalid Id encoding length: {0}, expected 40 hex characters")]
    InvalidHexLength(usize),

    #[error("Invalid hex character in Id encoding")]
    InvalidHexCharacter,
}
