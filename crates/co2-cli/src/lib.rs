pub mod cli;
pub mod common;
pub mod config;
pub mod session;

pub use cli::{build_cli_command, Cli, Commands, ConfigCommands, MapMetric};
pub use common::OutputFormat;
