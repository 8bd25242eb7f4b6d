//! # Repository Downloader
//!
//! The `Downloader` fetches remote repositories on demand and remembers where
//! it put them, so a given `(url, branch)` pair is cloned at most once per
//! `Downloader` instance. Each checkout lives in its own temporary directory
//! with the `.git` directory stripped.
//!
//! ## Design
//!
//! Cloning is delegated to a [`CloneOperations`] implementation so the cache
//! logic can be tested without git or a network. [`GitCloner`] is the
//! implementation used in the application.
//!
//! ## Resource lifetime
//!
//! Checkout directories of successful clones are never deleted by this
//! module. They stay valid for as long as the owning process needs them;
//! cleaning them up is the job of the process or an external pass. The
//! directory of a failed clone is removed immediately.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};

use crate::cache::{CacheKey, RepoCache};
use crate::error::{Error, Result};
use crate::git;

/// Trait for materializing a repository branch into a directory - allows
/// mocking in tests
pub trait CloneOperations: Send + Sync {
    /// Populates the existing, empty directory `dest` with a plain working
    /// tree of `branch` of `url`.
    fn clone_repo(&self, url: &str, branch: &str, dest: &Path) -> Result<()>;
}

/// The default implementation of `CloneOperations`: a shallow `git clone`
/// followed by removal of the `.git` directory.
#[derive(Debug, Clone, Default)]
pub struct GitCloner {
    timeout: Option<Duration>,
}

impl GitCloner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill clones that run longer than `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

impl CloneOperations for GitCloner {
    fn clone_repo(&self, url: &str, branch: &str, dest: &Path) -> Result<()> {
        git::clone_branch(url, branch, dest, self.timeout)?;
        git::strip_vcs_metadata(dest)
    }
}

/// Fetches repositories into temporary directories, caching by
/// `(url, branch)`.
pub struct Downloader {
    cloner: Box<dyn CloneOperations>,
    repos: RepoCache,
}

impl Downloader {
    /// Creates a `Downloader` that clones with the system `git` and no
    /// timeout.
    pub fn new() -> Self {
        Self::with_cloner(Box::new(GitCloner::new()))
    }

    /// Creates a `Downloader` whose clones are killed after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_cloner(Box::new(GitCloner::with_timeout(timeout)))
    }

    /// Creates a `Downloader` with a custom clone implementation.
    pub fn with_cloner(cloner: Box<dyn CloneOperations>) -> Self {
        Self {
            cloner,
            repos: RepoCache::new(),
        }
    }

    /// Returns the directory holding a checkout of `branch` of `url`,
    /// cloning it first if this `Downloader` has not fetched it yet.
    ///
    /// A cached directory is returned as is; it is not checked for continued
    /// existence. Clone failures are returned unchanged and leave no cache
    /// entry behind.
    pub fn get_repo(&self, url: &str, branch: &str) -> Result<PathBuf> {
        let key = CacheKey::new(url, branch);
        let mut fetched = false;

        let dir = self.repos.get_or_fetch(key.clone(), || {
            fetched = true;
            debug!("Cache miss for {}", key);

            let dir = git::make_temp_repo_dir()?;
            if let Err(e) = self.cloner.clone_repo(url, branch, &dir) {
                if let Err(cleanup) = fs::remove_dir_all(&dir) {
                    warn!(
                        "Failed to remove {} after failed clone: {}",
                        dir.display(),
                        cleanup
                    );
                }
                return Err(e);
            }

            info!("Fetched {} into {}", key, dir.display());
            Ok(dir)
        })?;

        if !fetched {
            debug!("Cache hit for {}: {}", key, dir.display());
        }
        Ok(dir)
    }

    /// Copies `file_path` from the checkout of `branch` of `url` to `dest`,
    /// replacing any existing file.
    ///
    /// `file_path` is relative to the checkout root; absolute paths and `..`
    /// components are rejected before anything is fetched. The file is
    /// written to a temporary file beside `dest`, given the source's
    /// permissions and renamed into place, so a failed copy never leaves a
    /// partial destination.
    pub fn download_file(
        &self,
        url: &str,
        branch: &str,
        file_path: &str,
        dest: impl AsRef<Path>,
    ) -> Result<()> {
        let dest = dest.as_ref();
        let relative = Path::new(file_path);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
        {
            return Err(Error::Copy {
                src: relative.to_path_buf(),
                dst: dest.to_path_buf(),
                message: format!(
                    "'{}' must be a relative path inside the repository",
                    file_path
                ),
            });
        }

        let repo_dir = self.get_repo(url, branch)?;
        let src = repo_dir.join(relative);

        let copy_error = |message: String| Error::Copy {
            src: src.clone(),
            dst: dest.to_path_buf(),
            message,
        };

        if !src.is_file() {
            return Err(copy_error(format!(
                "'{}' not found in {}@{}",
                file_path, url, branch
            )));
        }

        let parent = match dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| copy_error(e.to_string()))?;

        let mut source = fs::File::open(&src).map_err(|e| copy_error(e.to_string()))?;
        let mut staged =
            tempfile::NamedTempFile::new_in(&parent).map_err(|e| copy_error(e.to_string()))?;
        io::copy(&mut source, &mut staged).map_err(|e| copy_error(e.to_string()))?;
        // The staging file is created owner-only; the copy keeps the source's mode.
        let permissions = source
            .metadata()
            .map_err(|e| copy_error(e.to_string()))?
            .permissions();
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| copy_error(e.to_string()))?;
        staged
            .persist(dest)
            .map_err(|e| copy_error(e.error.to_string()))?;

        debug!("Copied {} to {}", src.display(), dest.display());
        Ok(())
    }

    /// Checkouts fetched so far, sorted by key.
    pub fn cached_repos(&self) -> Result<Vec<(CacheKey, PathBuf)>> {
        self.repos.entries()
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}
