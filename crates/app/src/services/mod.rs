mod analytics;
mod ingest;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::{AppError, Result};
use cost_core::PricingTable;
use cost_db::Db;

pub use self::analytics::AnalyticsService;
pub use self::ingest::IngestService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub analytics: AnalyticsService,
    pub ingest: IngestService,
}

impl AppServices {
    pub fn new(config: &AppConfig, pricing: Arc<PricingTable>) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            analytics: AnalyticsService::new(pricing),
            ingest: IngestService::new(shared),
        }
    }
}

/// Open and migrate the cache, creating its directory when needed.
pub(crate) fn open_cache(config: &AppConfig) -> Result<Db> {
    let path = &config.paths.db_path;
    let unavailable = |source: Box<dyn std::error::Error + Send + Sync>| {
        AppError::CacheUnavailable {
            path: path.clone(),
            source,
        }
    };
    std::fs::create_dir_all(&config.paths.cache_dir).map_err(|err| unavailable(err.into()))?;
    let mut db = Db::open(path).map_err(|err| unavailable(err.into()))?;
    db.migrate().map_err(|err| unavailable(err.into()))?;
    Ok(db)
}
