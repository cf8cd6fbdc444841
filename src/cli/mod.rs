//! Command-line interface for pdc.

pub mod args;
pub mod commands;
