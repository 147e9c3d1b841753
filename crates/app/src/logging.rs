use tracing_subscriber::EnvFilter;

const CRATES: &[&str] = &["ccost_cli", "cost_app", "cost_db", "ingest"];

fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    CRATES
        .iter()
        .map(|name| format!("{name}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact()
        .try_init();
    tracing::debug!(verbose, "logging initialized");
}
