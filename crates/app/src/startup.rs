use std::path::PathBuf;

const DB_FILE: &str = "cache.db";
const PRICING_FILE: &str = "pricing.json";

#[derive(Clone, Debug)]
pub struct AppPaths {
    pub cache_dir: PathBuf,
    pub db_path: PathBuf,
    pub pricing_path: PathBuf,
    pub projects_dir: PathBuf,
}

impl AppPaths {
    pub fn new(cache_dir: PathBuf, projects_dir: PathBuf) -> Self {
        let db_path = cache_dir.join(DB_FILE);
        let pricing_path = cache_dir.join(PRICING_FILE);
        Self {
            cache_dir,
            db_path,
            pricing_path,
            projects_dir,
        }
    }
}

/// `CCOST_CACHE_DIR`, else `~/.cache/ccost`.
pub fn default_cache_dir() -> PathBuf {
    if let Ok(path) = std::env::var("CCOST_CACHE_DIR") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .map(|home| home.join(".cache"))
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("ccost")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_files_live_in_cache_dir() {
        let paths = AppPaths::new(PathBuf::from("/tmp/ccost"), PathBuf::from("/tmp/projects"));
        assert_eq!(paths.db_path, PathBuf::from("/tmp/ccost/cache.db"));
        assert_eq!(paths.pricing_path, PathBuf::from("/tmp/ccost/pricing.json"));
        assert_eq!(paths.projects_dir, PathBuf::from("/tmp/projects"));
    }
}
