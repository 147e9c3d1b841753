use std::sync::Arc;
use std::time::{Duration, Instant};

use cost_core::{DailySummary, PricingTable, SummaryFilter};
use ingest::{IngestIssue, LogParser};
use serde::Serialize;

use crate::error::Result;
use crate::pricing;
use crate::services::{AppServices, open_cache};
use crate::startup::AppPaths;
use crate::util::time::{history_filter, local_today, today_filter};

/// Paths and parsing options needed to run the pipeline.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub paths: AppPaths,
    pub parser: LogParser,
}

/// Summaries for one refresh plus how they were obtained.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionResult {
    pub summaries: Vec<DailySummary>,
    pub files_processed: usize,
    pub files_cached: usize,
    pub unknown_models: Vec<String>,
    pub issues: Vec<IngestIssue>,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Application state shared by front ends.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    /// Build state for `paths`, loading pricing overrides once.
    pub fn new(paths: AppPaths) -> Self {
        Self::with_parser(paths, LogParser::new())
    }

    pub fn with_parser(paths: AppPaths, parser: LogParser) -> Self {
        let pricing = Arc::new(pricing::load_pricing_table(&paths.pricing_path));
        let config = AppConfig { paths, parser };
        let services = AppServices::new(&config, pricing);
        Self { config, services }
    }

    pub fn pricing(&self) -> &PricingTable {
        self.services.analytics.pricing()
    }

    /// Refresh the cache from disk, then query it with `filter`.
    ///
    /// The cache is opened for this call only and closed before returning.
    pub fn run_ingestion(
        &self,
        force_rebuild: bool,
        filter: &SummaryFilter,
    ) -> Result<IngestionResult> {
        let started = Instant::now();
        let mut db = open_cache(&self.config)?;
        let report = self.services.ingest.run(&mut db, force_rebuild)?;
        let daily = self.services.analytics.daily(&db, filter)?;
        db.close()?;

        for model in &daily.unknown_models {
            tracing::debug!(model = %model, "priced with fallback rates");
        }
        Ok(IngestionResult {
            summaries: daily.summaries,
            files_processed: report.files_processed,
            files_cached: report.files_cached,
            unknown_models: daily.unknown_models,
            issues: report.issues,
            elapsed: started.elapsed(),
        })
    }

    /// Today's totals; an empty summary when nothing was logged yet.
    pub fn today(&self) -> Result<DailySummary> {
        let today = local_today();
        let result = self.run_ingestion(false, &today_filter(today))?;
        let date = today.format("%Y-%m-%d").to_string();
        Ok(result
            .summaries
            .into_iter()
            .find(|summary| summary.date == date)
            .unwrap_or_else(|| DailySummary::empty(&date)))
    }

    /// Cached summaries for the last `days` days, today included.
    pub fn history(&self, days: u32) -> Result<Vec<DailySummary>> {
        let db = open_cache(&self.config)?;
        let daily = self
            .services
            .analytics
            .daily(&db, &history_filter(local_today(), days));
        let closed = db.close();
        let daily = daily?;
        closed?;
        Ok(daily.summaries)
    }
}
