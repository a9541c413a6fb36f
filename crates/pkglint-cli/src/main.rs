#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use pkglint_core::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pkglint")]
#[command(author, version, about = "Checks that package.json exports resolve to files that ship", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Check the package's exports against the files it ships
    Check {
        /// Package directory (defaults to the nearest package.json above --cwd)
        path: Option<PathBuf>,

        /// Exit with status 1 if any diagnostic is reported
        #[arg(long)]
        deny_warnings: bool,

        /// List every resolved entry, not only diagnostics
        #[arg(long)]
        entries: bool,

        /// Do not fall back to `main` and shipped files when `exports` is absent
        #[arg(long)]
        no_legacy: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json(cli.json);

    logging::init(&config);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(config.json),
        Some(Commands::Check {
            path,
            deny_warnings,
            entries,
            no_legacy,
        }) => {
            config = config
                .with_deny_warnings(deny_warnings)
                .with_legacy_fallback(!no_legacy);
            let action = commands::check::CheckAction {
                path,
                show_entries: entries,
            };
            commands::check::run(&config, action)
        }
    }
}
