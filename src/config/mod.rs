//! Configuration management for pdc.
//!
//! This module handles loading and saving configuration from `~/.pdc/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, GeneralConfig, ServerConfig};
