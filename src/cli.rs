//! CLI argument parsing for example-registry

use crate::catalog::ExampleKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for registry listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per entry (default)
    Text,
    /// JSON array for machine parsing
    Json,
    /// TOML registry file
    Toml,
    /// Legacy tuple listing
    Legacy,
}

/// Example category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Compiled,
    Script,
}

impl From<KindArg> for ExampleKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Compiled => ExampleKind::Compiled,
            KindArg::Script => ExampleKind::Script,
        }
    }
}

/// Where to load the registry from (built-in when neither is given)
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Load a TOML registry file instead of the built-in one
    #[arg(long = "registry", value_name = "PATH", conflicts_with = "legacy")]
    pub registry: Option<PathBuf>,

    /// Load a legacy tuple listing instead of the built-in registry
    #[arg(long = "legacy", value_name = "PATH")]
    pub legacy: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print registry entries in order
    List {
        #[command(flatten)]
        source: SourceArgs,

        /// Only show one category
        #[arg(long = "kind", value_enum)]
        kind: Option<KindArg>,

        /// Only show entries the driver should run
        #[arg(long = "runnable")]
        runnable: bool,

        /// Only show entries flagged for the memory checker
        #[arg(long = "memcheck")]
        memcheck: bool,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Convert a legacy tuple listing to another format
    Convert {
        /// Legacy listing to read
        #[arg(long = "from", value_name = "PATH")]
        from: PathBuf,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "toml")]
        format: OutputFormat,
    },

    /// Print entry counts per category and flag
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Parser, Debug)]
#[command(name = "example-registry")]
#[command(version)]
#[command(about = "Registry of examples a test driver builds, runs, and memory-checks", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output on stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}
