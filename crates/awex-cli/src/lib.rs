//! ActivityWatch exporter CLI library.
//!
//! This crate wires the client and core logic into the `awex` binary.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, Policy};
pub use config::Config;
