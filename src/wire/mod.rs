//! Wire codec for node records.
//!
//! [encode_record] and [decode_record] are pure free functions over
//! abstract writer/reader capabilities, so the record logic is independent
//! of any concrete wire-format library and testable against in-memory
//! fakes. [bencode] holds the implementations peers interoperate with.

pub mod bencode;

use crate::common::{Id, NetworkAddress, NodeExport};
use crate::error::DecodeError;

/// Map key of the identifier entry. Literal ASCII, case-sensitive.
pub const ID_FIELD: &str = "id";
/// Map key of the address entry. Literal ASCII, case-sensitive.
pub const ADDR_FIELD: &str = "addr";

/// Structured-writer capability: a map container of binary blob entries.
pub trait RecordWriter {
    /// Open the enclosing map container with a fixed entry count.
    fn begin_map(&mut self, entries: usize);

    /// Append one map entry: an ASCII key mapped to an opaque binary blob.
    fn bin_entry(&mut self, key: &str, bytes: &[u8]);
}

/// Structured-reader capability over one parsed container.
pub trait RecordReader {
    /// Whether the root of the input is a map container.
    fn is_map(&self) -> bool;

    /// The binary blob stored under `key`.
    ///
    /// None when the key is absent or its value is not blob-shaped.
    fn bin_entry(&self, key: &str) -> Option<&[u8]>;
}

/// Encode a record as a map of exactly two blob entries: the raw
/// identifier bytes under [ID_FIELD] and the canonical raw address form
/// under [ADDR_FIELD].
///
/// Pure and deterministic. Address families outside IPv4/IPv6 are
/// unrepresentable in [NetworkAddress], so no failure path exists here.
pub fn encode_record<W: RecordWriter>(export: &NodeExport, writer: &mut W) {
    writer.begin_map(2);
    writer.bin_entry(ID_FIELD, export.id().as_bytes());
    writer.bin_entry(ADDR_FIELD, &export.address().to_raw());
}

/// Decode a record, validating every field of the untrusted input.
///
/// Unknown extra entries are tolerated for forward compatibility. Each
/// failure mode is a distinct [DecodeError]; nothing is returned on any
/// failure path.
pub fn decode_record<R: RecordReader>(reader: &R) -> Result<NodeExport, DecodeError> {
    if !reader.is_map() {
        return Err(DecodeError::MalformedContainer);
    }

    let id = reader
        .bin_entry(ID_FIELD)
        .ok_or(DecodeError::MissingField(ID_FIELD))?;
    let addr = reader
        .bin_entry(ADDR_FIELD)
        .ok_or(DecodeError::MissingField(ADDR_FIELD))?;

    let id = Id::from_bytes(id)?;
    let address = NetworkAddress::from_raw(addr)?;

    Ok(NodeExport::new(id, address))
}
