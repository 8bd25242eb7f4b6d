//! Resolve command implementation
//!
//! Rewrites repository designators in each argument using the repositories
//! configured in the project's `project.yml`. Arguments naming repositories
//! the project does not know are printed unchanged, with one warning per
//! unknown repository.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use reporef::designator::{
    find_repo_designator, replace_all_repo_designators, replace_repo_designators,
};
use reporef::project::{Project, ProjectConfig};
use reporef::warnings::WarningRegistry;

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Strings containing `@repo/` designators, e.g. `bsp/@core/hw`
    #[arg(required = true, value_name = "TEXT")]
    pub texts: Vec<String>,

    /// Project root containing project.yml (defaults to current directory)
    #[arg(short, long, value_name = "DIR", env = "REPOREF_PROJECT")]
    pub project: Option<PathBuf>,

    /// Resolve every designator in each string, not just the first
    #[arg(short, long)]
    pub all: bool,
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs) -> Result<()> {
    let root = args.project.unwrap_or_else(|| PathBuf::from("."));
    let project = ProjectConfig::load(&root)
        .with_context(|| format!("Failed to load project at {}", root.display()))?;
    let warnings = WarningRegistry::new();

    for text in &args.texts {
        let (resolved, _) = resolve_one(text, &project, args.all, &warnings);
        println!("{}", resolved);
    }

    Ok(())
}

/// Resolves `text`, warning once for every designator left unresolved.
fn resolve_one(
    text: &str,
    project: &dyn Project,
    all: bool,
    warnings: &WarningRegistry,
) -> (String, bool) {
    let (resolved, replaced) = if all {
        replace_all_repo_designators(text, project)
    } else {
        replace_repo_designators(text, project)
    };

    // Without --all, known designators after the first also survive.
    let mut rest = resolved.as_str();
    while let Some(designator) = find_repo_designator(rest) {
        let name = designator.repo_name(rest);
        if project.find_repo_path(name).is_none() {
            warnings.warn_once(format!("Repository '{}' is not configured in the project", name));
        }
        rest = &rest[designator.end()..];
    }

    (resolved, replaced)
}
