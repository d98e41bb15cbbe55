//! Garnet unified CLI.
//!
//! Permission-scoped queries over an event log.
//!
//! # Quick Start
//!
//! ```bash
//! # Initialize a project with sample collections
//! garnet init ./demo --sample
//!
//! # Query as a user with a permissions record
//! garnet query alice --project-dir ./demo
//!
//! # A user without a record is rejected
//! garnet query bob --project-dir ./demo
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Garnet - permission-scoped queries over an event log.
#[derive(Parser)]
#[command(name = "garnet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Initialize a new Garnet project directory.
    Init {
        /// Path to the project directory to create.
        path: String,

        /// Seed the collections with sample permissions and events.
        #[arg(long)]
        sample: bool,
    },

    /// Run a query against the event collection as a given user.
    Query {
        /// User identity to query as (must have a permissions record).
        user: String,

        /// Extra caller filter as a JSON object.
        #[arg(short, long, default_value = "{}")]
        filter: String,

        /// Start of the event time range (RFC 3339; default: 24h ago).
        #[arg(long)]
        since: Option<String>,

        /// End of the event time range (RFC 3339; default: now).
        #[arg(long)]
        until: Option<String>,

        /// Maximum number of results to print.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Project directory holding garnet.toml and the collections.
        #[arg(short = 'C', long, default_value = ".")]
        project_dir: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
        Commands::Init { path, sample } => commands::init::run(&path, sample),
        Commands::Query {
            user,
            filter,
            since,
            until,
            limit,
            project_dir,
        } => commands::query::run(&project_dir, &user, &filter, since.as_deref(), until.as_deref(), limit),
    }
}
