//! Parse command implementation
//!
//! Splits each package string into its repository name and package path.
//! Fails on the first malformed string.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use reporef::package::{parse_package_string, PackageReference};

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Package strings, e.g. `@driver-repo/sensors/bmp280`
    #[arg(required = true, value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ParsedPackage<'a> {
    input: &'a str,
    repo: String,
    path: String,
}

/// Execute the parse command
pub fn execute(args: ParseArgs) -> Result<()> {
    let parsed = args
        .packages
        .iter()
        .map(|input| Ok((input.as_str(), parse_package_string(input)?)))
        .collect::<Result<Vec<(&str, PackageReference)>>>()?;

    if args.json {
        let records: Vec<ParsedPackage> = parsed
            .into_iter()
            .map(|(input, pkg)| ParsedPackage {
                input,
                repo: pkg.repo,
                path: pkg.path,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for (input, pkg) in &parsed {
        let repo = if pkg.is_local() { "(local)" } else { pkg.repo.as_str() };
        println!("{}\trepo: {}\tpath: {}", input, repo, pkg.path);
    }

    Ok(())
}
