//! # Repository Designators
//!
//! A repository designator is an `@name/` token embedded anywhere inside a
//! path-like string, for example `bsp/@driver-repo/sensors`. Resolving it
//! replaces `@name` with the repository's checkout path relative to the
//! project root, giving `bsp/repos/driver-repo/sensors`.
//!
//! Resolution is tolerant. A string without a designator, or one naming a
//! repository the project does not know, passes through unchanged. This is
//! the opposite of [`crate::package::parse_package_string`], which rejects
//! malformed input.

use std::borrow::Cow;
use std::path::Path;

use log::{debug, trace};

use crate::project::Project;

/// Location of an `@name/` token inside a string.
///
/// `start` is the byte offset of the `@`. `len` is the offset of the
/// terminating `/` *relative to `start`*, so `start + len` is the absolute
/// offset of the `/` and `s[start..start + len]` is the `@name` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepoDesignator {
    pub start: usize,
    pub len: usize,
}

impl RepoDesignator {
    /// Absolute byte offset of the `/` that terminates the designator.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The repository name, without the leading `@`.
    pub fn repo_name<'a>(&self, s: &'a str) -> &'a str {
        &s[self.start + 1..self.end()]
    }
}

/// Finds the first repository designator in `s`.
///
/// The first `@` starts the designator; the first `/` at or after it ends it.
/// If there is an `@` but no `/` after it, there is no designator.
pub fn find_repo_designator(s: &str) -> Option<RepoDesignator> {
    let start = s.find('@')?;
    let len = s[start..].find('/')?;
    Some(RepoDesignator { start, len })
}

/// Replaces the first repository designator in `s` with the repository's
/// project-relative path.
///
/// Returns the (possibly unchanged) string and whether a replacement was
/// made. Only one designator is resolved per call; see
/// [`replace_all_repo_designators`] for strings carrying several.
pub fn replace_repo_designators(s: &str, project: &dyn Project) -> (String, bool) {
    match find_repo_designator(s) {
        Some(designator) => match substitute(s, designator, project) {
            Some(resolved) => (resolved, true),
            None => (s.to_string(), false),
        },
        None => (s.to_string(), false),
    }
}

/// Replaces every resolvable repository designator in `s`, left to right.
///
/// A designator naming an unknown repository is left in place and scanning
/// resumes after it. Returns whether at least one replacement was made.
pub fn replace_all_repo_designators(s: &str, project: &dyn Project) -> (String, bool) {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    let mut replaced = false;

    while let Some(designator) = find_repo_designator(rest) {
        // `substitute` only rewrites `rest[..designator.end()]`; the
        // remainder starts at the `/` and is scanned on the next pass.
        let (head, tail) = rest.split_at(designator.end());
        match substitute(head, designator, project) {
            Some(resolved) => {
                out.push_str(&resolved);
                replaced = true;
            }
            None => out.push_str(head),
        }
        rest = tail;
    }
    out.push_str(rest);

    (out, replaced)
}

/// Splices the repository path for `designator` into `s`, or returns `None`
/// if the project does not know the repository.
fn substitute(s: &str, designator: RepoDesignator, project: &dyn Project) -> Option<String> {
    let repo_name = designator.repo_name(s);
    let Some(repo_path) = project.find_repo_path(repo_name) else {
        debug!("Unknown repository '{}' in \"{}\"; leaving unchanged", repo_name, s);
        return None;
    };

    let rel_path = relative_repo_path(&repo_path, project.path());
    trace!("Resolved @{} to {}", repo_name, rel_path);

    Some(format!(
        "{}{}{}",
        &s[..designator.start],
        rel_path,
        &s[designator.end()..]
    ))
}

/// Strips the project root from a repository path.
///
/// A path outside the project root, or equal to it, is returned unchanged.
fn relative_repo_path<'a>(repo_path: &'a Path, root: &Path) -> Cow<'a, str> {
    match repo_path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy(),
        _ => repo_path.to_string_lossy(),
    }
}
