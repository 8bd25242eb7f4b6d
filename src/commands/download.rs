//! Download command implementation
//!
//! Fetches a repository and copies one file out of it.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use reporef::defaults::DEFAULT_BRANCH;
use reporef::downloader::Downloader;

/// Arguments for the download command
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Repository URL
    #[arg(value_name = "URL")]
    pub url: String,

    /// Path of the file inside the repository
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Where to write the file; an existing file is replaced
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Branch to fetch
    #[arg(short, long, default_value = DEFAULT_BRANCH)]
    pub branch: String,
}

/// Execute the download command
pub fn execute(args: DownloadArgs, clone_timeout: Option<Duration>) -> Result<()> {
    let downloader = match clone_timeout {
        Some(timeout) => Downloader::with_timeout(timeout),
        None => Downloader::new(),
    };

    downloader
        .download_file(&args.url, &args.branch, &args.file, &args.dest)
        .with_context(|| {
            format!(
                "Failed to download {} from {}@{}",
                args.file, args.url, args.branch
            )
        })?;

    println!("{}", args.dest.display());
    Ok(())
}
