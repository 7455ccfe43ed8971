//! EduBuddy command-line client
//!
//! # Usage
//!
//! ```bash
//! edubuddy login --email you@college.edu --password ******
//! edubuddy get --kind pdf -d it -s 1 --subject "Data Structures" -u "Unit I"
//! edubuddy search linked lists
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/edubuddy/config.toml)
//! 3. Environment variables (EDUBUDDY_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use edubuddy_cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    run(Cli::parse()).await
}
