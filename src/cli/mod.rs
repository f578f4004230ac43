//! Command-line interface definitions and helpers.
//!
//! This module contains CLI argument parsing, enums, the file sink and
//! subcommand handlers.

mod args;
mod commands;
mod enums;
mod sink;

pub use args::{Args, Command};
pub use commands::handle_config_action;
pub use sink::FileSink;
