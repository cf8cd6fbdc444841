//! The polydown wire protocol.
//!
//! Maps resolved commands to the flat text messages the server understands.

mod codes;
mod message;

pub use codes::{ActionKind, ObjectKind};
pub use message::{encode, ProtocolMessage};
