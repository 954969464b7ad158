//! Bencode implementations of the wire capabilities.

use std::collections::HashMap;

use serde_bencode::value::Value;
use tracing::trace;

use super::{RecordReader, RecordWriter};
use crate::error::{DecodeError, EncodeError};

/// [RecordWriter] producing canonical bencode.
///
/// Bencode dictionaries serialize with their keys in lexicographic order,
/// so the output is deterministic and independent of entry insertion order.
#[derive(Default)]
pub struct BencodeWriter {
    entries: Vec<(Vec<u8>, Value)>,
}

impl BencodeWriter {
    pub fn new() -> BencodeWriter {
        BencodeWriter::default()
    }

    /// Serialize the collected entries as one bencode dictionary.
    pub fn into_bytes(self) -> Result<Vec<u8>, EncodeError> {
        let dict: HashMap<Vec<u8>, Value> = self.entries.into_iter().collect();

        Ok(serde_bencode::to_bytes(&Value::Dict(dict))?)
    }
}

impl RecordWriter for BencodeWriter {
    // Bencode containers are self-delimiting; the entry count is not
    // written.
    fn begin_map(&mut self, _entries: usize) {}

    fn bin_entry(&mut self, key: &str, bytes: &[u8]) {
        self.entries
            .push((key.as_bytes().to_vec(), Value::Bytes(bytes.to_vec())));
    }
}

/// [RecordReader] over one parsed bencode value.
pub struct BencodeReader {
    root: Value,
}

impl BencodeReader {
    /// Parse bencode bytes.
    ///
    /// Anything that does not parse surfaces as
    /// [DecodeError::MalformedContainer].
    pub fn from_bytes(bytes: &[u8]) -> Result<BencodeReader, DecodeError> {
        let root = serde_bencode::from_bytes(bytes).map_err(|error| {
            trace!(?error, "Input is not bencode");
            DecodeError::MalformedContainer
        })?;

        Ok(BencodeReader { root })
    }
}

impl RecordReader for BencodeReader {
    fn is_map(&self) -> bool {
        matches!(self.root, Value::Dict(_))
    }

    fn bin_entry(&self, key: &str) -> Option<&[u8]> {
        match &self.root {
            Value::Dict(dict) => match dict.get(key.as_bytes()) {
                Some(Value::Bytes(bytes)) => Some(bytes),
                _ => None,
            },
            _ => None,
        }
    }
}
