//! Delivery of wire messages to the polydown server.

mod transport;

pub use transport::{decode_reply, TcpTransport, Transport};

#[cfg(test)]
pub use transport::MockTransport;
