//! `pkglint check` command implementation.

use miette::{IntoDiagnostic, Result};
use pkglint_core::paths::package_root;
use pkglint_core::{check_package, Config, PackageReport, Severity};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Exit code when `--deny-warnings` is set and diagnostics were reported.
const EXIT_DIAGNOSTICS: i32 = 1;

/// Exit code when the check could not run.
const EXIT_ERROR: i32 = 2;

/// Check command arguments not covered by [`Config`].
#[derive(Debug, Clone)]
pub struct CheckAction {
    /// Package directory, relative to the working directory.
    pub path: Option<PathBuf>,
    pub show_entries: bool,
}

/// Run the check command.
///
/// With `config.json`, outputs a single JSON object to stdout.
/// Otherwise, outputs human-readable text to stdout.
pub fn run(config: &Config, action: CheckAction) -> Result<()> {
    let json = config.json;
    let root = target_root(&config.cwd, action.path.as_deref());
    let span = tracing::info_span!("check", cmd = "check", root = %root.display());
    let _guard = span.enter();

    let mut report = match check_package(&config.check_options(root)) {
        Ok(report) => report,
        Err(e) => {
            if json {
                let error_json = serde_json::json!({
                    "ok": false,
                    "error": {
                        "code": e.code(),
                        "message": e.to_string()
                    }
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&error_json).into_diagnostic()?
                );
            } else {
                eprintln!("error: {e}");
            }
            std::process::exit(EXIT_ERROR);
        }
    };

    info!(
        name = report.name.as_deref().unwrap_or(""),
        has_exports = report.has_exports,
        shipped_files = report.summary.shipped_files,
        "package checked"
    );
    debug!(
        entries = report.summary.entries,
        diagnostics = report.diagnostics.len(),
        "resolution summary"
    );

    if config.deny_warnings {
        report.escalate_warnings();
    }

    if json {
        print_json(&report)?;
    } else {
        print_human(&report, action.show_entries)?;
    }

    if config.deny_warnings && !report.is_clean() {
        std::process::exit(EXIT_DIAGNOSTICS);
    }
    Ok(())
}

/// The explicit path, else the nearest package above `cwd`, else `cwd`
/// itself (so the error names the directory the user is in).
fn target_root(cwd: &Path, path: Option<&Path>) -> PathBuf {
    match path {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => package_root(cwd).unwrap_or_else(|| cwd.to_path_buf()),
    }
}

fn print_json(report: &PackageReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

fn print_human(report: &PackageReport, show_entries: bool) -> Result<()> {
    let mut out = io::stdout().lock();

    let name = report.name.as_deref().unwrap_or("(unnamed)");
    w(&mut out, &format!("\x1b[1m{name}\x1b[0m {}\n", report.root))?;
    if !report.has_exports {
        w(&mut out, "  no `exports` field; checked `main` and shipped files\n")?;
    }
    w(&mut out, "\n")?;

    for diagnostic in &report.diagnostics {
        let color = match diagnostic.severity {
            Severity::Warning => "\x1b[33m",
            Severity::Error => "\x1b[31m",
        };
        let start = diagnostic.span.start;
        w(
            &mut out,
            &format!(
                "package.json:{}:{}: {color}{}\x1b[0m [{}] {}\n",
                start.line + 1,
                start.column + 1,
                diagnostic.severity,
                diagnostic.code,
                diagnostic.message
            ),
        )?;
        if !diagnostic.path.is_empty() {
            w(&mut out, &format!("    at {}\n", diagnostic.path))?;
        }
    }
    if !report.diagnostics.is_empty() {
        w(&mut out, "\n")?;
    }

    if show_entries {
        w(&mut out, "\x1b[1m## Entries\x1b[0m\n")?;
        let width = report
            .entries
            .iter()
            .map(|e| e.specifier.len())
            .max()
            .unwrap_or(0);
        for entry in &report.entries {
            let conditions = entry
                .conditions
                .as_ref()
                .map(|c| format!(" [{}]", c.join(", ")))
                .unwrap_or_default();
            let target = entry
                .resolved_location
                .strip_prefix(&report.root)
                .unwrap_or(&entry.resolved_location);
            let missing = if entry.exists_on_disk { "" } else { " (missing)" };
            w(
                &mut out,
                &format!(
                    "  {:<width$} -> {}{conditions}{missing}\n",
                    entry.specifier,
                    target.display()
                ),
            )?;
        }
        w(&mut out, "\n")?;
    }

    let summary = &report.summary;
    w(
        &mut out,
        &format!(
            "{} entries, {} shipped files, {} warnings, {} errors\n",
            summary.entries, summary.shipped_files, summary.warnings, summary.errors
        ),
    )?;

    Ok(())
}

fn w(out: &mut impl Write, s: &str) -> Result<()> {
    out.write_all(s.as_bytes()).into_diagnostic()
}
