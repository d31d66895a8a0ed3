//! Command-line interface for eduforge.
//!
//! Provides the evaluation-run and one-off generation commands.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli, Commands};
