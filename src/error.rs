//! # Error Handling
//!
//! This module defines the centralized error type for `reporef`. It uses the
//! `thiserror` library to build one `Error` enum covering every failure the
//! library can report, each variant carrying the offending input or path so
//! callers can produce an actionable message.
//!
//! ## Failure classes
//!
//! - **Parsing**: malformed version triples and package strings authored by a
//!   human. Callers are expected to surface these immediately.
//! - **Clone**: the external `git clone` failed or timed out. Not retried by
//!   this crate; the caller decides whether to abort or warn and skip.
//! - **Copy**: a file could not be copied out of a fetched repository.
//! - **Configuration**: project and settings files that cannot be read or
//!   parsed.
//!
//! Replacing repository designators never fails. An unknown repository name
//! is a no-op rather than an error, so there is no variant for it.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for reporef operations
#[derive(Error, Debug)]
pub enum Error {
    /// A version string did not split into three dot-separated integers.
    #[error("Invalid version string: {input}")]
    InvalidVersion { input: String },

    /// A package string carried a repository designator but no package name.
    #[error("Invalid package string; contains repo but no package name: {input}")]
    InvalidPackageString { input: String },

    /// Cloning a repository failed.
    ///
    /// Includes the repository URL, branch, the diagnostic output of the
    /// clone command, and an optional hint for resolution.
    #[error("Git clone error for {url}@{branch}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        branch: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// Copying a file out of a fetched repository failed.
    #[error("Copy error: {} -> {}: {message}", src.display(), dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        message: String,
    },

    /// A configuration file could not be read.
    #[error("Error reading {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("Failure parsing \"{}\": {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// A mutex guarding shared state was poisoned by a panicking thread.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
