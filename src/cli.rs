//! CLI argument parsing and command dispatch

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// reporef - Resolve repository-qualified package references and fetch repositories
#[derive(Parser, Debug)]
#[command(name = "reporef")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Kill clones that take longer than this many seconds (0 disables)
    #[arg(
        long,
        global = true,
        value_name = "SECONDS",
        env = "REPOREF_CLONE_TIMEOUT",
        default_value_t = 600
    )]
    clone_timeout: u64,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split package strings into repository and package path
    Parse(commands::parse::ParseArgs),

    /// Replace repository designators with project-relative paths
    Resolve(commands::resolve::ResolveArgs),

    /// Fetch repositories into temporary directories
    Fetch(commands::fetch::FetchArgs),

    /// Copy a single file out of a repository
    Download(commands::download::DownloadArgs),

    /// Compare two version triples
    Compare(commands::compare::CompareArgs),

    /// Print the header placed at the top of generated files
    Preamble,

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let clone_timeout = self.clone_timeout();

        match self.command {
            Commands::Parse(args) => commands::parse::execute(args),
            Commands::Resolve(args) => commands::resolve::execute(args),
            Commands::Fetch(args) => commands::fetch::execute(args, clone_timeout),
            Commands::Download(args) => commands::download::execute(args, clone_timeout),
            Commands::Compare(args) => commands::compare::execute(args),
            Commands::Preamble => {
                print!("{}", reporef::defaults::generated_preamble());
                Ok(())
            }
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }

    fn clone_timeout(&self) -> Option<Duration> {
        (self.clone_timeout > 0).then(|| Duration::from_secs(self.clone_timeout))
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // Fails only if a logger is already installed
    let _ = env_logger::Builder::from_env(env)
        .format_target(false)
        .format_timestamp(None)
        .try_init();
}
