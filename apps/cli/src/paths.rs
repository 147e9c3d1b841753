use std::path::PathBuf;

use cost_app::{AppPaths, default_cache_dir, default_projects_dir};

use crate::args::CliArgs;
use crate::config::CliConfig;

/// Flag, then environment, then config file, then the built-in default.
fn pick(flag: Option<&PathBuf>, env: Option<PathBuf>, config: Option<&PathBuf>) -> Option<PathBuf> {
    flag.cloned().or(env).or_else(|| config.cloned())
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn resolve_paths(args: &CliArgs, config: &CliConfig) -> AppPaths {
    let cache_dir = pick(
        args.cache_dir.as_ref(),
        env_path("CCOST_CACHE_DIR"),
        config.cache_dir.as_ref(),
    )
    .unwrap_or_else(default_cache_dir);
    let projects_dir = pick(
        args.projects_dir.as_ref(),
        env_path("CCOST_PROJECTS_DIR"),
        config.projects_dir.as_ref(),
    )
    .unwrap_or_else(default_projects_dir);
    AppPaths::new(cache_dir, projects_dir)
}
