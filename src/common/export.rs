//! The exportable (identifier, address) pair shared between peers.

use std::fmt::{self, Display, Formatter};

use tracing::debug;

use crate::common::{Id, NetworkAddress};
use crate::error::{DecodeError, EncodeError};
use crate::wire::bencode::{BencodeReader, BencodeWriter};
use crate::wire::{decode_record, encode_record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A peer's contact card: its [Id] and its [NetworkAddress].
///
/// Constructed transiently from a routing table entry (or decoded from a
/// peer's bytes), exchanged in bootstrap replies and routing-table exports,
/// then consumed. A plain value; copies are independent.
pub struct NodeExport {
    id: Id,
    address: NetworkAddress,
}

impl NodeExport {
    pub fn new(id: Id, address: NetworkAddress) -> NodeExport {
        NodeExport { id, address }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn address(&self) -> &NetworkAddress {
        &self.address
    }

    /// Encode this record as canonical bencode.
    ///
    /// Deterministic: the same record always yields the same bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut writer = BencodeWriter::new();
        encode_record(self, &mut writer);

        writer.into_bytes()
    }

    /// Decode a record from untrusted bencode bytes.
    ///
    /// Every failure is a typed [DecodeError]; no partial record is ever
    /// returned. The caller is expected to drop the offending message and
    /// may down-weight the peer it came from.
    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> Result<NodeExport, DecodeError> {
        let bytes = bytes.as_ref();

        BencodeReader::from_bytes(bytes)
            .and_then(|reader| decode_record(&reader))
            .map_err(|error| {
                debug!(?error, len = bytes.len(), "Rejected node record");
                error
            })
    }
}

impl Display for NodeExport {
    /// `<40 hex chars> <ip:port>`, diagnostics only.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_bencode::value::Value;

    /// Hand-built bencode dictionary of blob entries. Callers pass keys in
    /// lexicographic order, as the canonical form requires.
    fn bencode_record(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut out = b"d".to_vec();
        for (key, value) in entries {
            out.extend(format!("{}:{}", key.len(), key).into_bytes());
            out.extend(format!("{}:", value.len()).into_bytes());
            out.extend(*value);
        }
        out.push(b'e');
        out
    }

    fn scenario_a() -> NodeExport {
        let mut id = [0u8; 20];
        for (i, byte) in id.iter_mut().enumerate() {
            *byte = i as u8 + 1;
        }

        NodeExport::new(
            Id(id),
            NetworkAddress::V4 {
                addr: "192.0.2.10".parse().unwrap(),
                port: 4222,
            },
        )
    }

    fn scenario_b() -> NodeExport {
        NodeExport::new(
            Id::random(),
            NetworkAddress::V6 {
                addr: "2001:db8::1".parse().unwrap(),
                port: 4222,
                scope_id: 0,
            },
        )
    }

    #[test]
    fn ipv4_round_trip() {
        let export = scenario_a();
        let bytes = export.to_bytes().unwrap();

        // Exactly the canonical wire image: a two-entry dictionary with a
        // 16-byte addr blob and a 20-byte id blob.
        assert_eq!(
            bytes,
            bencode_record(&[
                ("addr", &export.address().to_raw()),
                ("id", export.id().as_bytes()),
            ])
        );

        match serde_bencode::from_bytes(&bytes).unwrap() {
            Value::Dict(dict) => {
                assert_eq!(dict.len(), 2);
                match (&dict[&b"id"[..].to_vec()], &dict[&b"addr"[..].to_vec()]) {
                    (Value::Bytes(id), Value::Bytes(addr)) => {
                        assert_eq!(id.len(), 20);
                        assert_eq!(addr.len(), 16);
                    }
                    other => panic!("expected blob entries, got {:?}", other),
                }
            }
            other => panic!("expected a dictionary, got {:?}", other),
        }

        let decoded = NodeExport::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, export);
        assert_eq!(decoded.address().to_string(), "192.0.2.10:4222");
        assert_eq!(decoded.address().port(), 4222);
    }

    #[test]
    fn ipv6_round_trip() {
        let export = scenario_b();
        let bytes = export.to_bytes().unwrap();

        let decoded = NodeExport::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, export);
        assert_eq!(decoded.address().to_string(), "[2001:db8::1]:4222");
        assert_eq!(decoded.address().port(), 4222);
        assert_eq!(decoded.address().scope_id(), 0);
        assert_eq!(decoded.address().raw_len(), 28);
    }

    #[test]
    fn encoding_is_deterministic() {
        for export in [scenario_a(), scenario_b()] {
            assert_eq!(export.to_bytes().unwrap(), export.to_bytes().unwrap());
        }
    }

    #[test]
    fn rejects_record_without_id() {
        let export = scenario_a();
        let bytes = bencode_record(&[("addr", &export.address().to_raw())]);

        assert_eq!(
            NodeExport::from_bytes(&bytes),
            Err(DecodeError::MissingField("id"))
        );
    }

    #[test]
    fn rejects_bad_identifier_lengths() {
        let addr = scenario_a().address().to_raw();

        for len in [19, 21] {
            let bytes = bencode_record(&[("addr", &addr), ("id", &vec![1; len][..])]);

            assert_eq!(
                NodeExport::from_bytes(&bytes),
                Err(DecodeError::InvalidIdentifierLength(len))
            );
        }
    }

    #[test]
    fn rejects_truncated_address() {
        let bytes = bencode_record(&[("addr", &[0; 10]), ("id", &[1; 20])]);

        assert_eq!(
            NodeExport::from_bytes(&bytes),
            Err(DecodeError::UnsupportedAddressFamily(10))
        );
    }

    #[test]
    fn rejects_mismatched_family_tag() {
        let mut addr = scenario_a().address().to_raw();
        // Claim IPv6 in a 16-byte blob.
        addr[1] = 6;
        let bytes = bencode_record(&[("addr", &addr), ("id", &[1; 20])]);

        assert_eq!(
            NodeExport::from_bytes(&bytes),
            Err(DecodeError::CorruptAddress {
                found: 6,
                expected: 4
            })
        );
    }

    #[test]
    fn rejects_non_map_input() {
        for input in [&b"xyz"[..], &b"i42e"[..], &b"le"[..]] {
            assert_eq!(
                NodeExport::from_bytes(input),
                Err(DecodeError::MalformedContainer)
            );
        }
    }

    #[test]
    fn tolerates_unknown_entries() {
        let export = scenario_a();
        let bytes = bencode_record(&[
            ("addr", &export.address().to_raw()),
            ("id", export.id().as_bytes()),
            ("seen", &[1]),
        ]);

        assert_eq!(NodeExport::from_bytes(&bytes), Ok(export));
    }

    #[test]
    fn display() {
        let export = NodeExport::new(
            Id([0xab; 20]),
            NetworkAddress::V4 {
                addr: "192.0.2.10".parse().unwrap(),
                port: 4222,
            },
        );

        assert_eq!(
            export.to_string(),
            format!("{} 192.0.2.10:4222", "ab".repeat(20))
        );
    }
}
