// h36m-pose 🚀 AGPL-3.0 License

//! CLI module for the offline statistics tool.
//!
//! This module contains the command-line interface logic: argument parsing,
//! logging macros, and the `stats` command implementation.

/// CLI arguments.
pub mod args;

/// Statistics computation command.
pub mod compute;

/// Logging utilities and macros.
pub mod logging;
