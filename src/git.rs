//! # Git Clone Mechanism
//!
//! Thin wrappers around the system `git` command used by the fetch cache:
//! allocating a private temporary directory, cloning a single branch into
//! it, and stripping the `.git` bookkeeping directory so the checkout is a
//! plain file tree.
//!
//! Shelling out to `git` rather than linking a git library means the clone
//! picks up whatever authentication the user has configured: SSH keys,
//! credential helpers, tokens in `~/.gitconfig`.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::defaults::TEMP_REPO_PREFIX;
use crate::error::{Error, Result};

/// How often a running clone is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Creates a fresh, uniquely named directory for a repository checkout.
///
/// The directory is not removed when the process exits.
pub fn make_temp_repo_dir() -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix(TEMP_REPO_PREFIX)
        .tempdir()?;
    Ok(dir.keep())
}

/// Clones `branch` of `url` into `dest` with a shallow clone.
///
/// `dest` must be absent or empty. With a `timeout`, a clone still running
/// when it expires is killed and reported as a clone failure.
pub fn clone_branch(url: &str, branch: &str, dest: &Path, timeout: Option<Duration>) -> Result<()> {
    debug!(
        "git clone --depth=1 --branch {} {} {}",
        branch,
        url,
        dest.display()
    );
    run_clone(clone_command(url, branch, dest), url, branch, timeout)
}

/// Builds the `git clone` invocation. The URL follows `--` so a URL that
/// starts with a dash is never read as an option.
fn clone_command(url: &str, branch: &str, dest: &Path) -> Command {
    let mut command = Command::new("git");
    command
        .args(["clone", "--quiet", "--depth=1", "--branch", branch, "--", url])
        .arg(dest);
    command
}

fn run_clone(
    mut command: Command,
    url: &str,
    branch: &str,
    timeout: Option<Duration>,
) -> Result<()> {
    let clone_error = |message: String, hint: Option<String>| Error::GitClone {
        url: url.to_string(),
        branch: branch.to_string(),
        message,
        hint,
    };

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .env("GIT_TERMINAL_PROMPT", "0")
        .spawn()
        .map_err(|e| {
            clone_error(
                e.to_string(),
                Some("Make sure git is installed and on your PATH".to_string()),
            )
        })?;

    // Drain stderr on a separate thread so a chatty clone cannot block on a
    // full pipe while we wait for it.
    let stderr_reader = child.stderr.take().map(|mut stderr| {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = stderr.read_to_string(&mut buf);
            buf
        })
    });

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if let Some(limit) = timeout {
            if started.elapsed() >= limit {
                let _ = child.kill();
                let _ = child.wait();
                // Helpers spawned by git (remote transports) can outlive it
                // and keep stderr open, so the reader is detached, not joined.
                drop(stderr_reader);
                return Err(clone_error(
                    format!("clone timed out after {}s", limit.as_secs_f64()),
                    Some("Check network connectivity or raise the clone timeout".to_string()),
                ));
            }
        }
        thread::sleep(POLL_INTERVAL);
    };

    if !status.success() {
        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        let stderr = stderr.trim();

        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some(
                "Make sure you have access to the repository: an SSH key added to \
                 ssh-agent, configured git credentials, or a personal access token"
                    .to_string(),
            )
        } else if stderr.contains("Remote branch") && stderr.contains("not found") {
            Some(format!("Check that branch '{}' exists", branch))
        } else {
            None
        };

        let message = if stderr.is_empty() {
            format!("git exited with {}", status)
        } else {
            stderr.to_string()
        };

        return Err(clone_error(message, hint));
    }

    Ok(())
}

/// Removes the `.git` directory from a checkout, leaving a plain file tree.
pub fn strip_vcs_metadata(dir: &Path) -> Result<()> {
    let git_dir = dir.join(".git");
    if git_dir.exists() {
        fs::remove_dir_all(&git_dir)?;
    }
    Ok(())
}
