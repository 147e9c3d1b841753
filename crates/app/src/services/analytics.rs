use std::sync::Arc;

use cost_core::{DailyReport, PricingTable, SummaryFilter};
use cost_db::Db;

use crate::error::Result;

#[derive(Clone)]
pub struct AnalyticsService {
    pricing: Arc<PricingTable>,
}

impl AnalyticsService {
    pub(super) fn new(pricing: Arc<PricingTable>) -> Self {
        Self { pricing }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    pub fn daily(&self, db: &Db, filter: &SummaryFilter) -> Result<DailyReport> {
        Ok(db.query_daily_summaries(filter, &self.pricing)?)
    }
}
