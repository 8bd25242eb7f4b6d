//! Fetch command implementation
//!
//! Fetches one or more repositories into temporary directories and prints
//! where each one landed. Repositories are fetched in parallel using rayon;
//! duplicate `(url, branch)` requests share a single clone.
//!
//! With `--project` and no URLs, every repository in the project's
//! `project.yml` that has a `url` is fetched at its configured branch.
//!
//! Only the `url@branch<TAB>dir` result lines go to stdout, so the output can
//! be piped; per-repository errors and the closing summary go to stderr.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;

use reporef::defaults::DEFAULT_BRANCH;
use reporef::downloader::Downloader;
use reporef::project::ProjectConfig;

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Repository URLs to fetch
    #[arg(value_name = "URL", required_unless_present = "project")]
    pub urls: Vec<String>,

    /// Branch to fetch for every URL
    #[arg(short, long, default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Fetch the repositories configured in this project's project.yml
    #[arg(short, long, value_name = "DIR", env = "REPOREF_PROJECT")]
    pub project: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the fetch command
pub fn execute(args: FetchArgs, clone_timeout: Option<Duration>) -> Result<()> {
    let requests = collect_requests(&args)?;
    if requests.is_empty() {
        if !args.quiet {
            eprintln!("Nothing to fetch.");
        }
        return Ok(());
    }

    let downloader = match clone_timeout {
        Some(timeout) => Downloader::with_timeout(timeout),
        None => Downloader::new(),
    };

    let start_time = Instant::now();
    let results: Vec<_> = requests
        .par_iter()
        .map(|(url, branch)| (url, branch, downloader.get_repo(url, branch)))
        .collect();

    let mut failures = 0;
    for (url, branch, result) in results {
        match result {
            Ok(dir) => {
                if !args.quiet {
                    println!("{}@{}\t{}", url, branch, dir.display());
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("❌ {}", e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} fetches failed", failures, requests.len());
    }

    if !args.quiet {
        let fetched = downloader.cached_repos()?.len();
        eprintln!(
            "✅ Fetched {} repositories in {:.2}s",
            fetched,
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

fn collect_requests(args: &FetchArgs) -> Result<Vec<(String, String)>> {
    if !args.urls.is_empty() {
        return Ok(args
            .urls
            .iter()
            .map(|url| (url.clone(), args.branch.clone()))
            .collect());
    }

    let Some(root) = &args.project else {
        return Ok(Vec::new());
    };
    let project = ProjectConfig::load(root)
        .with_context(|| format!("Failed to load project at {}", root.display()))?;

    Ok(project
        .repositories()
        .filter_map(|(name, spec)| match &spec.url {
            Some(url) => Some((url.clone(), spec.branch.clone())),
            None => {
                log::debug!("Skipping repository '{}' without a url", name);
                None
            }
        })
        .collect())
}
