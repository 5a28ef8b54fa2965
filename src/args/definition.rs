//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recentfiles::codec::KeyScheme;
use recentfiles::config::Settings;

/// recentfiles - remember the files you used most recently
#[derive(Parser, Debug)]
#[command(name = "recentfiles")]
#[command(version)]
#[command(about = "Keep a bounded, persisted list of recently used files", long_about = None)]
pub struct Args {
    /// Settings file (default: ~/.config/recentfiles/settings.conf)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage file, overriding `storage_path` from settings
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Maximum number of remembered files, overriding `capacity` from settings
    #[arg(long, global = true)]
    pub capacity: Option<usize>,

    /// Key layout for the storage file: concatenated or delimited
    #[arg(long, global = true)]
    pub key_scheme: Option<KeyScheme>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Action to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands operating on the recent list.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record a file as most recently used
    Add {
        /// File path; relative paths are made absolute
        path: PathBuf,
        /// Attribute values stored with the file (replace earlier ones)
        attributes: Vec<String>,
    },
    /// Show the list, most recent first
    List {
        /// Print menu items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget a file
    Remove {
        /// File path as recorded (or resolvable to it)
        path: PathBuf,
    },
    /// Pick an entry by position; missing files are dropped from the list
    Open {
        /// Zero-based position, 0 = most recent
        index: usize,
    },
    /// Forget every file
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Rewrite the storage file with another key layout
    Migrate {
        /// Target layout
        #[arg(long, default_value = "delimited")]
        to: KeyScheme,
    },
}

/// What: Apply command-line overrides on top of file settings.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `settings`: Settings loaded from disk (or defaults).
///
/// Output:
/// - Settings with every provided flag taking precedence.
pub fn apply_overrides(args: &Args, mut settings: Settings) -> Settings {
    if let Some(capacity) = args.capacity {
        settings.capacity = capacity;
    }
    if let Some(storage) = &args.storage {
        settings.storage_path = Some(storage.clone());
    }
    if let Some(scheme) = args.key_scheme {
        settings.key_scheme = scheme;
    }
    settings
}
