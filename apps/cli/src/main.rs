mod args;
mod config;
mod format;
mod paths;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use cost_app::{AppState, init_logging, util::time::local_today};

use crate::args::CliArgs;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), Box<dyn Error>> {
    let filter = args.summary_filter(local_today())?;

    let config = config::load_or_create()?;
    if config.created {
        tracing::info!(path = %config.file.display(), "created default config");
    }

    let paths = paths::resolve_paths(args, &config.config);
    tracing::debug!(
        cache_dir = %paths.cache_dir.display(),
        projects_dir = %paths.projects_dir.display(),
        "resolved paths"
    );

    let state = AppState::new(paths);
    let result = state.run_ingestion(args.rebuild, &filter)?;
    for issue in &result.issues {
        tracing::warn!(path = %issue.file_path, "skipped log file: {}", issue.message);
    }

    if args.json {
        println!("{}", format::format_json(&result.summaries)?);
    } else {
        println!(
            "{}",
            format::format_table(
                &result.summaries,
                result.files_processed,
                result.files_cached,
                result.elapsed.as_millis(),
            )
        );
    }

    for model in &result.unknown_models {
        eprintln!("{}", format::unknown_model_warning(model));
    }
    Ok(())
}
