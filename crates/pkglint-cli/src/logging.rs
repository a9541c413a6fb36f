//! Logging initialization for the CLI.
//!
//! Library crates stay free of `tracing`; the CLI owns the subscriber.
//! Log lines always go to stderr so stdout carries only the report.

use pkglint_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose events follow `-v`; everything else stays at `warn`
/// unless `RUST_LOG` says otherwise.
const OWN_TARGETS: &[&str] = &["pkglint_cli", "pkglint_core"];

/// Install the global subscriber for this run.
///
/// With `config.json`, every line is a JSON object:
/// ```json
/// {"timestamp":"...","level":"INFO","fields":{"message":"package checked","shipped_files":4},"target":"pkglint_cli::commands::check","span":{"cmd":"check","root":"/path","name":"check"}}
/// ```
pub fn init(config: &Config) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    for target in OWN_TARGETS {
        if let Ok(directive) = format!("{target}={}", config.log_level()).parse() {
            filter = filter.add_directive(directive);
        }
    }

    let registry = tracing_subscriber::registry().with(filter);
    // A subscriber installed by an embedding process wins
    let _ = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };
}
