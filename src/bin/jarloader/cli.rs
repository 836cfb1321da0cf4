//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// jarloader - fetch, verify and register the Scala runtime libraries
#[derive(Parser)]
#[command(name = "jarloader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Make every library available and print the resulting classpath
    Load(LoadArgs),

    /// Show which libraries are available, cached, or missing
    Status(StatusArgs),

    /// Remove the library cache directory
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct HostArgs {
    /// Existing classpath (defaults to `$CLASSPATH`)
    #[arg(long)]
    pub classpath: Option<String>,

    /// Library cache directory
    #[arg(long, env = "JARLOADER_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct LoadArgs {
    #[command(flatten)]
    pub host: HostArgs,

    /// Number of concurrent downloads
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Fail instead of downloading missing libraries
    #[arg(long)]
    pub offline: bool,

    /// Do not show a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Write the classpath to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub host: HostArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Exit with an error if any library would need downloading
    #[arg(long)]
    pub check: bool,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Library cache directory
    #[arg(long, env = "JARLOADER_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}
