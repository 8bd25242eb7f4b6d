//! Default values and fixed strings shared across reporef.

/// Prefix of the temporary directories repositories are cloned into.
pub const TEMP_REPO_PREFIX: &str = "reporef-";

/// File name of the project description at a project root.
pub const PROJECT_FILE_NAME: &str = "project.yml";

/// Branch assumed for a configured repository that does not name one.
pub const DEFAULT_BRANCH: &str = "master";

/// Human-readable tool version, e.g. `reporef version: 0.1.0`.
pub fn version_string() -> String {
    format!("reporef version: {}", env!("CARGO_PKG_VERSION"))
}

/// Comment block placed at the top of generated source files.
pub fn generated_preamble() -> String {
    format!(
        "/**\n * This file was generated by {}\n */\n\n",
        version_string()
    )
}
