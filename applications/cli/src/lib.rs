//! Pulse CLI Library
//!
//! Drives the playback controller against a simulated media device from
//! scripts, stdin or the progress demo.
//!
//! This library exposes the core components for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod runner;

pub use commands::{parse_script, Command};
pub use config::{CliConfig, SimulationSettings, DEFAULT_CONFIG_FILE};
pub use error::{CliError, Result};
pub use runner::{Report, Runner};
