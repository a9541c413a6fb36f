use miette::{IntoDiagnostic, Result};
use pkglint_core::version::{version_string, VersionInfo};

/// Print the version, or the full version record with `--json`.
pub fn run(json: bool) -> Result<()> {
    if json {
        let info = serde_json::to_string_pretty(&VersionInfo::current()).into_diagnostic()?;
        println!("{info}");
    } else {
        println!("{}", version_string());
    }
    Ok(())
}
