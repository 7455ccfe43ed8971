//! EduBuddy command-line front end.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations
//! - `notify`: Notice rendering

pub mod cli;
pub mod commands;
pub mod notify;

pub use cli::{Cli, Commands, FacetArgs};
pub use commands::{run, Output};
