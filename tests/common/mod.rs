//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_project(projects::WITH_CORE);
//! fixture.command().arg("resolve").arg("@core/hw").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::projects;
    #[allow(unused_imports)]
    pub use super::{git_available, SourceRepo};
    pub use super::TestFixture;
}

/// Common `project.yml` snippets for testing.
#[allow(dead_code)]
pub mod projects {
    /// A project with one repository at the default location.
    pub const WITH_CORE: &str = r#"
name: blinky
repositories:
  core:
    url: https://example.com/core.git
"#;

    /// A project with repositories at custom and external locations.
    pub const WITH_CUSTOM_PATHS: &str = r#"
name: blinky
repositories:
  core: {}
  drivers:
    path: vendor/drivers
  external:
    path: /opt/external
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "repositories: [unclosed";
}

/// A temporary project directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `project.yml` with the given content.
    pub fn with_project(self, content: &str) -> Self {
        self.temp_dir
            .child("project.yml")
            .write_str(content)
            .expect("Failed to write project file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A `reporef` command running in the fixture directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("reporef");
        cmd.current_dir(self.path())
            .env_remove("REPOREF_PROJECT")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a `git` binary is available to run clone tests against.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// A local git repository to clone from, served over `file://`.
#[allow(dead_code)]
pub struct SourceRepo {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl SourceRepo {
    /// Create a repository with one commit on `main` holding `files`.
    pub fn new(files: &[(&str, &str)]) -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        for (path, content) in files {
            temp_dir
                .child(path)
                .write_str(content)
                .expect("Failed to write file");
        }

        let repo = Self { temp_dir };
        repo.git(&["init", "--quiet", "--initial-branch=main"]);
        repo.git(&["add", "--all"]);
        repo.git(&["commit", "--quiet", "-m", "initial"]);
        repo
    }

    /// Create a branch at the current commit, with an extra file on it.
    pub fn with_branch(self, branch: &str, path: &str, content: &str) -> Self {
        self.git(&["checkout", "--quiet", "-b", branch]);
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self.git(&["add", "--all"]);
        self.git(&["commit", "--quiet", "-m", branch]);
        self.git(&["checkout", "--quiet", "main"]);
        self
    }

    /// The `file://` URL of the repository.
    pub fn url(&self) -> String {
        format!("file://{}", self.temp_dir.path().display())
    }

    fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args([
                "-c",
                "user.name=reporef tests",
                "-c",
                "user.email=tests@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .current_dir(self.temp_dir.path())
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
}
