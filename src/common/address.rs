//! Tagged IPv4/IPv6 socket endpoint and its canonical raw byte layout.
//!
//! The raw layout is the stable wire contract, independent of any OS
//! `sockaddr` struct:
//!
//! IPv4, 16 bytes: family tag `0x0004` (big endian), port (big endian),
//! 4 address octets, 8 bytes of zero padding.
//!
//! IPv6, 28 bytes: family tag `0x0006` (big endian), port (big endian),
//! 4 reserved zero bytes, 16 address octets, scope id (big endian).
//!
//! Encoding zero-fills the padding and reserved regions; decoding ignores
//! their contents but enforces the length and the family tag.

use std::fmt::{self, Display, Formatter};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

use crate::error::DecodeError;

/// Family tag of an IPv4 endpoint in the raw layout.
pub const FAMILY_V4: u16 = 4;
/// Family tag of an IPv6 endpoint in the raw layout.
pub const FAMILY_V6: u16 = 6;

/// Raw encoded size of an IPv4 endpoint.
pub const RAW_LEN_V4: usize = 16;
/// Raw encoded size of an IPv6 endpoint.
pub const RAW_LEN_V6: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// An IPv4 or IPv6 socket endpoint.
///
/// IPv6 endpoints carry a scope id (0 unless set). The family tag and the
/// raw encoded length are always mutually consistent.
pub enum NetworkAddress {
    V4 {
        addr: Ipv4Addr,
        port: u16,
    },
    V6 {
        addr: Ipv6Addr,
        port: u16,
        scope_id: u32,
    },
}

impl NetworkAddress {
    pub fn port(&self) -> u16 {
        match self {
            NetworkAddress::V4 { port, .. } => *port,
            NetworkAddress::V6 { port, .. } => *port,
        }
    }

    /// IPv6 scope id; always 0 for IPv4 endpoints.
    pub fn scope_id(&self) -> u32 {
        match self {
            NetworkAddress::V4 { .. } => 0,
            NetworkAddress::V6 { scope_id, .. } => *scope_id,
        }
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self, NetworkAddress::V4 { .. })
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self, NetworkAddress::V6 { .. })
    }

    /// Size of [to_raw](Self::to_raw)'s output for this endpoint.
    pub fn raw_len(&self) -> usize {
        match self {
            NetworkAddress::V4 { .. } => RAW_LEN_V4,
            NetworkAddress::V6 { .. } => RAW_LEN_V6,
        }
    }

    /// Encode this endpoint in the canonical raw layout.
    pub fn to_raw(&self) -> Vec<u8> {
        match self {
            NetworkAddress::V4 { addr, port } => {
                let mut raw = vec![0u8; RAW_LEN_V4];
                raw[0..2].copy_from_slice(&FAMILY_V4.to_be_bytes());
                raw[2..4].copy_from_slice(&port.to_be_bytes());
                raw[4..8].copy_from_slice(&addr.octets());
                raw
            }
            NetworkAddress::V6 {
                addr,
                port,
                scope_id,
            } => {
                let mut raw = vec![0u8; RAW_LEN_V6];
                raw[0..2].copy_from_slice(&FAMILY_V6.to_be_bytes());
                raw[2..4].copy_from_slice(&port.to_be_bytes());
                raw[8..24].copy_from_slice(&addr.octets());
                raw[24..28].copy_from_slice(&scope_id.to_be_bytes());
                raw
            }
        }
    }

    /// Decode an endpoint from the canonical raw layout.
    ///
    /// The length selects the family; a family tag disagreeing with the
    /// length is corruption, any other length is an unsupported family.
    pub fn from_raw(raw: &[u8]) -> Result<NetworkAddress, DecodeError> {
        match raw.len() {
            RAW_LEN_V4 => {
                check_family_tag(raw, FAMILY_V4)?;

                Ok(NetworkAddress::V4 {
                    addr: Ipv4Addr::new(raw[4], raw[5], raw[6], raw[7]),
                    port: u16::from_be_bytes([raw[2], raw[3]]),
                })
            }
            RAW_LEN_V6 => {
                check_family_tag(raw, FAMILY_V6)?;

                let mut octets = [0u8; 16];
                octets.copy_from_slice(&raw[8..24]);

                Ok(NetworkAddress::V6 {
                    addr: octets.into(),
                    port: u16::from_be_bytes([raw[2], raw[3]]),
                    scope_id: u32::from_be_bytes([raw[24], raw[25], raw[26], raw[27]]),
                })
            }
            len => Err(DecodeError::UnsupportedAddressFamily(len)),
        }
    }
}

fn check_family_tag(raw: &[u8], expected: u16) -> Result<(), DecodeError> {
    let found = u16::from_be_bytes([raw[0], raw[1]]);
    if found != expected {
        return Err(DecodeError::CorruptAddress { found, expected });
    }

    Ok(())
}

impl From<SocketAddrV4> for NetworkAddress {
    fn from(addr: SocketAddrV4) -> NetworkAddress {
        NetworkAddress::V4 {
            addr: *addr.ip(),
            port: addr.port(),
        }
    }
}

impl From<SocketAddrV6> for NetworkAddress {
    fn from(addr: SocketAddrV6) -> NetworkAddress {
        NetworkAddress::V6 {
            addr: *addr.ip(),
            port: addr.port(),
            scope_id: addr.scope_id(),
        }
    }
}

impl From<SocketAddr> for NetworkAddress {
    fn from(addr: SocketAddr) -> NetworkAddress {
        match addr {
            SocketAddr::V4(v4) => v4.into(),
            SocketAddr::V6(v6) => v6.into(),
        }
    }
}

impl From<NetworkAddress> for SocketAddr {
    fn from(address: NetworkAddress) -> SocketAddr {
        match address {
            NetworkAddress::V4 { addr, port } => SocketAddr::V4(SocketAddrV4::new(addr, port)),
            NetworkAddress::V6 {
                addr,
                port,
                scope_id,
            } => SocketAddr::V6(SocketAddrV6::new(addr, port, 0, scope_id)),
        }
    }
}

impl Display for NetworkAddress {
    /// `ip:port` for IPv4, `[ip]:port` for IPv6. The scope id is omitted
    /// unless requested with the alternate form (`{:#}`), which renders
    /// `[ip%scope]:port` for a non-zero scope.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NetworkAddress::V4 { addr, port } => write!(f, "{}:{}", addr, port),
            NetworkAddress::V6 {
                addr,
                port,
                scope_id,
            } => {
                if f.alternate() && *scope_id != 0 {
                    write!(f, "[{}%{}]:{}", addr, scope_id, port)
                } else {
                    write!(f, "[{}]:{}", addr, port)
                }
            }
        }
    }
}
