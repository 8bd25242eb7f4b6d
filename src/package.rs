//! # Repository-Qualified Package Strings
//!
//! A package string names a package that may live in an external
//! repository:
//!
//! ```text
//! [@repo/]<path/to/package>
//! ```
//!
//! `@driver-repo/sensors/bmp280` names `sensors/bmp280` inside the
//! repository configured as `driver-repo`; `sensors/bmp280` names a package
//! in the local project. Only the first `/` after the repository name is a
//! separator, everything after it belongs to the package path.
//!
//! Parsing is strict: a string carrying a designator but no package name is
//! an error, because it is user-authored input and a silent fallback would
//! hide a real mistake.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A parsed `[@repo/]path` package string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PackageReference {
    /// Repository name, empty for a package in the local project.
    pub repo: String,
    /// Package path within the repository.
    pub path: String,
}

impl PackageReference {
    pub fn new(repo: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            path: path.into(),
        }
    }

    /// Whether the package lives in the local project rather than an
    /// external repository.
    pub fn is_local(&self) -> bool {
        self.repo.is_empty()
    }
}

/// Parses a package string of the form `[@repo/]<path/to/package>`.
///
/// One trailing `/` is ignored, so `"@foo/"` is treated as `"@foo"` and
/// rejected.
pub fn parse_package_string(input: &str) -> Result<PackageReference> {
    let pkg_str = input.strip_suffix('/').unwrap_or(input);

    match pkg_str.strip_prefix('@') {
        Some(rest) => match rest.split_once('/') {
            Some((repo, path)) => Ok(PackageReference::new(repo, path)),
            None => Err(Error::InvalidPackageString {
                input: pkg_str.to_string(),
            }),
        },
        None => Ok(PackageReference::new("", pkg_str)),
    }
}

/// Builds the canonical package string; the inverse of
/// [`parse_package_string`].
pub fn build_package_string(repo: &str, path: &str) -> String {
    if repo.is_empty() {
        path.to_string()
    } else {
        format!("@{}/{}", repo, path)
    }
}

impl FromStr for PackageReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_package_string(s)
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&build_package_string(&self.repo, &self.path))
    }
}
