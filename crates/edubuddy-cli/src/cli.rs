//! CLI argument parsing for `edubuddy`.
//!
//! CLI flags override every other configuration source.

use clap::{Parser, Subcommand};

use edubuddy_types::MaterialKind;

/// EduBuddy materials portal
///
/// Browse and search lecture notes, previous-year question papers and
/// syllabus documents by department and semester.
#[derive(Parser, Debug)]
#[command(name = "edubuddy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/edubuddy/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Read materials from a local JSON export instead of the remote store
    #[arg(long, global = true)]
    pub store_file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Facets shared by the material commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FacetArgs {
    /// Department code (it, mech)
    #[arg(short, long)]
    pub department: Option<String>,

    /// Semester number
    #[arg(short, long)]
    pub semester: Option<String>,
}

/// Portal commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and send a verification email
    Register {
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },

    /// Sign in with a verified account
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Sign out and forget the saved username
    Logout,

    /// Send a password reset email
    ResetPassword {
        #[arg(short, long, default_value = "")]
        email: String,
    },

    /// Show the dashboard username
    Whoami,

    /// List subjects for a department and semester
    Subjects {
        /// Material kind (pdf, pyq)
        #[arg(short, long, default_value = "pdf")]
        kind: MaterialKind,

        #[command(flatten)]
        facets: FacetArgs,
    },

    /// List the units of a subject (PDF Notes)
    Units {
        #[command(flatten)]
        facets: FacetArgs,

        #[arg(long)]
        subject: Option<String>,
    },

    /// Fetch the link for a material
    Get {
        /// Material kind (pdf, pyq, syllabus)
        #[arg(short, long)]
        kind: MaterialKind,

        #[command(flatten)]
        facets: FacetArgs,

        #[arg(long)]
        subject: Option<String>,

        /// Unit key, e.g. "Unit I" (PDF Notes)
        #[arg(short, long)]
        unit: Option<String>,

        /// insem or endsem (PYQs)
        #[arg(short, long)]
        exam_type: Option<String>,
    },

    /// Search every material by keyword
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load the search index and report record counts
    Index,
}
