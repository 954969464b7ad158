#![doc = include_str!("../README.md")]

mod common;
mod error;
pub mod wire;

pub use crate::common::{Id, NetworkAddress, NodeExport, ParseIdError, ID_SIZE};
pub use crate::error::{DecodeError, EncodeError};
