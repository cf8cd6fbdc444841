//! pdc - command-line client for the polydown server
//!
//! This crate turns human-friendly expressions such as `1h 30m`, `+10m`,
//! `25.06 13:15` or `c @tea +1` into the flat wire messages understood by the
//! polydown timer server, and delivers them over TCP.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod protocol;

pub use cli::args::{Cli, OutputFormat};
pub use error::PdcError;
pub use protocol::{encode, ProtocolMessage};
