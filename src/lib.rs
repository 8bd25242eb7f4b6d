//! # Repository Reference Library
//!
//! This library resolves *repository-qualified package references*, short
//! strings such as `@driver-repo/sensors/bmp280` that name a package inside
//! an external repository, and fetches remote repositories on demand. It is
//! used by the `reporef` command-line tool but is designed to be embedded in
//! any build or package tool that needs the same behavior.
//!
//! ## Quick Example
//!
//! ```
//! use reporef::designator::replace_repo_designators;
//! use reporef::package::parse_package_string;
//! use reporef::project::{ProjectConfig, RepoSpec};
//!
//! let pkg = parse_package_string("@drivers/sensors/bmp280").unwrap();
//! assert_eq!(pkg.repo, "drivers");
//! assert_eq!(pkg.path, "sensors/bmp280");
//!
//! let project = ProjectConfig::new("blinky", "/work/blinky")
//!     .unwrap()
//!     .with_repo("drivers", RepoSpec::default());
//! let (resolved, replaced) = replace_repo_designators("bsp/@drivers/sensors", &project);
//! assert!(replaced);
//! assert_eq!(resolved, "bsp/repos/drivers/sensors");
//! ```
//!
//! ## Core Concepts
//!
//! - **Package strings (`package`)**: parsing and building `[@repo/]path`
//!   strings. Strict: malformed input is an error.
//! - **Designators (`designator`)**: locating `@name/` tokens anywhere in a
//!   string and replacing them with project-relative repository paths.
//!   Tolerant: unknown repositories pass through unchanged.
//! - **Projects (`project`)**: the `Project` trait the resolver queries, and
//!   `ProjectConfig`, a project loaded from `project.yml`.
//! - **Fetching (`downloader`, `cache`, `git`)**: cloning `(url, branch)`
//!   pairs into private temporary directories at most once per run, and
//!   copying single files out of them.
//! - **Collaborators (`version`, `config`, `warnings`, `defaults`)**: version
//!   triples, YAML settings files, one-time warnings and the generated-file
//!   preamble.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod designator;
pub mod downloader;
pub mod error;
pub mod git;
pub mod package;
pub mod project;
pub mod version;
pub mod warnings;

#[cfg(test)]
mod package_proptest;
