pub mod app;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState, IngestionResult};
pub use error::{AppError, Result};
pub use ingest::default_projects_dir;
pub use logging::init_logging;
pub use pricing::{load_pricing_overrides, load_pricing_table};
pub use services::AppServices;
pub use startup::{AppPaths, default_cache_dir};
pub use util::time::{history_filter, normalize_date, today_filter};
