//! CLI module for oktools - command-line interface and subcommands.
//!
//! The CLI plays the side panel's role: it lists the registry, runs tools,
//! remembers the last used one, and accepts host messages.

pub mod commands;

pub use commands::Cli;
