//! # Project Abstraction
//!
//! The designator resolver needs two things from the surrounding project:
//! where the project root is, and where each named repository is checked out.
//! Both are captured by the [`Project`] trait so that resolution can be tested
//! against an in-memory project and driven by any project model.
//!
//! [`ProjectConfig`] is the concrete project used by the CLI. It is loaded
//! from a `project.yml` at the project root:
//!
//! ```yaml
//! name: my-project
//! repositories:
//!   driver-repo:
//!     url: https://example.com/drivers.git
//!     branch: main
//!     path: repos/drivers
//! ```
//!
//! `branch` defaults to `master` and `path` defaults to `repos/<name>`.
//! Relative paths are resolved against the project root.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_BRANCH, PROJECT_FILE_NAME};
use crate::error::{Error, Result};

/// The view of a project that repository designator resolution needs.
pub trait Project {
    /// Returns the absolute path of the named repository's checkout, or
    /// `None` if the project has no repository by that name.
    fn find_repo_path(&self, name: &str) -> Option<PathBuf>;

    /// Returns the absolute path of the project root.
    fn path(&self) -> &Path;
}

/// One repository entry of a `project.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSpec {
    /// Remote the repository can be fetched from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default = "default_branch")]
    pub branch: String,

    /// Checkout location, relative to the project root unless absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

impl Default for RepoSpec {
    fn default() -> Self {
        Self {
            url: None,
            branch: default_branch(),
            path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    repositories: BTreeMap<String, RepoSpec>,
}

/// A project described by a `project.yml` file.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    name: String,
    root: PathBuf,
    repos: BTreeMap<String, RepoSpec>,
}

impl ProjectConfig {
    /// Creates an empty project rooted at `root`.
    ///
    /// A relative root is made absolute against the current directory.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            root: std::path::absolute(root.as_ref())?,
            repos: BTreeMap::new(),
        })
    }

    /// Adds a repository, replacing any previous entry with the same name.
    pub fn with_repo(mut self, name: impl Into<String>, spec: RepoSpec) -> Self {
        self.repos.insert(name.into(), spec);
        self
    }

    /// Loads `<root>/project.yml`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        Self::from_file(root.join(PROJECT_FILE_NAME), root)
    }

    /// Loads a project description from `path`, rooting the project at `root`.
    pub fn from_file(path: impl AsRef<Path>, root: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_with_origin(&content, root.as_ref(), path)
    }

    /// Parses a project description from YAML text.
    pub fn parse(yaml: &str, root: impl AsRef<Path>) -> Result<Self> {
        Self::parse_with_origin(yaml, root.as_ref(), Path::new(PROJECT_FILE_NAME))
    }

    fn parse_with_origin(yaml: &str, root: &Path, origin: &Path) -> Result<Self> {
        let file: ProjectFile = serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        for name in file.repositories.keys() {
            if name.is_empty() || name.contains(['/', '@']) {
                return Err(Error::ConfigParse {
                    path: origin.to_path_buf(),
                    message: format!(
                        "invalid repository name {:?}; names must be non-empty and must not contain '/' or '@'",
                        name
                    ),
                });
            }
        }

        let root = std::path::absolute(root)?;
        let name = file.name.unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        Ok(Self {
            name,
            root,
            repos: file.repositories,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configuration of the named repository.
    pub fn repo(&self, name: &str) -> Option<&RepoSpec> {
        self.repos.get(name)
    }

    /// Iterates over configured repositories in name order.
    pub fn repositories(&self) -> impl Iterator<Item = (&str, &RepoSpec)> {
        self.repos.iter().map(|(name, spec)| (name.as_str(), spec))
    }
}

impl Project for ProjectConfig {
    fn find_repo_path(&self, name: &str) -> Option<PathBuf> {
        let spec = self.repos.get(name)?;
        let path = match &spec.path {
            Some(path) => self.root.join(path),
            None => self.root.join("repos").join(name),
        };
        Some(path)
    }

    fn path(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROJECT_YAML: &str = r#"
name: blinky
repositories:
  driver-repo:
    url: https://example.com/drivers.git
    branch: main
    path: vendor/drivers
  core: {}
"#;

    #[test]
    fn test_parse_project() {
        let project = ProjectConfig::parse(PROJECT_YAML, "/proj").unwrap();
        assert_eq!(project.name(), "blinky");
        assert_eq!(project.path(), Path::new("/proj"));

        let drivers = project.repo("driver-repo").unwrap();
        assert_eq!(drivers.url.as_deref(), Some("https://example.com/drivers.git"));
        assert_eq!(drivers.branch, "main");

        let core = project.repo("core").unwrap();
        assert_eq!(core, &RepoSpec::default());
        assert_eq!(core.branch, "master");
    }

    #[test]
    fn test_find_repo_path() {
        let project = ProjectConfig::parse(PROJECT_YAML, "/proj").unwrap();
        assert_eq!(
            project.find_repo_path("driver-repo"),
            Some(PathBuf::from("/proj/vendor/drivers"))
        );
        assert_eq!(
            project.find_repo_path("core"),
            Some(PathBuf::from("/proj/repos/core"))
        );
        assert_eq!(project.find_repo_path("missing"), None);
    }

    #[test]
    fn test_absolute_repo_path_is_kept() {
        let project = ProjectConfig::new("p", "/proj")
            .unwrap()
            .with_repo(
                "ext",
                RepoSpec {
                    path: Some(PathBuf::from("/opt/ext")),
                    ..RepoSpec::default()
                },
            );
        assert_eq!(project.find_repo_path("ext"), Some(PathBuf::from("/opt/ext")));
    }

    #[test]
    fn test_repositories_in_name_order() {
        let project = ProjectConfig::parse(PROJECT_YAML, "/proj").unwrap();
        let names: Vec<&str> = project.repositories().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["core", "driver-repo"]);
    }

    #[test]
    fn test_name_defaults_to_root_directory() {
        let project = ProjectConfig::parse("repositories: {}", "/work/my-proj").unwrap();
        assert_eq!(project.name(), "my-proj");
    }

    #[test]
    fn test_invalid_repository_name() {
        let err = ProjectConfig::parse("repositories:\n  a/b: {}\n", "/proj").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("invalid repository name"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ProjectConfig::parse("repositories: [", "/proj").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_from_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("project.yml"), PROJECT_YAML).unwrap();

        let project = ProjectConfig::load(temp.path()).unwrap();
        assert_eq!(project.name(), "blinky");
        assert_eq!(
            project.find_repo_path("core"),
            Some(temp.path().join("repos").join("core"))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = ProjectConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
