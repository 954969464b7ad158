mod address;
mod export;
mod id;

pub use address::*;
pub use export::*;
pub use id::*;
