//! Oxygen CLI library.
//!
//! This library provides the core functionality for the Oxygen command-line
//! interface: the interactive screen walk, eligibility and marketplace
//! commands, configuration management, and output formatting.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;
pub mod view;

pub use app::App;
pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
