//! Compare command implementation

use std::cmp::Ordering;

use anyhow::Result;
use clap::Args;

use reporef::version::Version;

/// Arguments for the compare command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First version, `major.minor.revision`
    #[arg(value_name = "A", allow_hyphen_values = true)]
    pub a: String,

    /// Second version, `major.minor.revision`
    #[arg(value_name = "B", allow_hyphen_values = true)]
    pub b: String,
}

/// Execute the compare command
///
/// Prints the relation and the raw difference, e.g. `1.5.0 > 1.2.9 (3)`.
pub fn execute(args: CompareArgs) -> Result<()> {
    let a = Version::parse(&args.a)?;
    let b = Version::parse(&args.b)?;
    println!("{}", describe(&a, &b));
    Ok(())
}

fn describe(a: &Version, b: &Version) -> String {
    let diff = a.compare(b);
    let relation = match diff.cmp(&0) {
        Ordering::Less => "<",
        Ordering::Equal => "==",
        Ordering::Greater => ">",
    };
    format!("{} {} {} ({})", a, relation, b, diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(&Version::new(1, 5, 0), &Version::new(1, 2, 9)),
            "1.5.0 > 1.2.9 (3)"
        );
        assert_eq!(
            describe(&Version::new(1, 2, 3), &Version::new(1, 2, 3)),
            "1.2.3 == 1.2.3 (0)"
        );
        assert_eq!(
            describe(&Version::new(0, 9, 0), &Version::new(2, 0, 0)),
            "0.9.0 < 2.0.0 (-2)"
        );
    }
}
