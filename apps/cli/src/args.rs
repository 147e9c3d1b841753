use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use cost_app::{Result, history_filter, normalize_date, today_filter};
use cost_core::SummaryFilter;

#[derive(Debug, Default, Parser)]
#[command(name = "ccost", about = "Fast Claude Code usage and cost tracker", version)]
pub struct CliArgs {
    /// Show usage from this date (YYYYMMDD or YYYY-MM-DD)
    #[arg(long, value_name = "DATE", conflicts_with_all = ["today", "days"])]
    pub since: Option<String>,

    /// Show usage until this date (YYYYMMDD or YYYY-MM-DD)
    #[arg(long, value_name = "DATE", conflicts_with_all = ["today", "days"])]
    pub until: Option<String>,

    /// Filter by project directory (partial match)
    #[arg(long, value_name = "NAME")]
    pub project: Option<String>,

    /// Only today's usage
    #[arg(long, conflicts_with = "days")]
    pub today: bool,

    /// Only the last N days, today included
    #[arg(long, value_name = "N")]
    pub days: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Force a full re-parse, ignoring the cache
    #[arg(long)]
    pub rebuild: bool,

    /// Directory holding the assistant's project logs
    #[arg(long, value_name = "PATH")]
    pub projects_dir: Option<PathBuf>,

    /// Directory for the cache database and pricing overrides
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Query filter for these arguments, relative to `today`.
    pub fn summary_filter(&self, today: NaiveDate) -> Result<SummaryFilter> {
        let mut filter = if self.today {
            today_filter(today)
        } else if let Some(days) = self.days {
            history_filter(today, days)
        } else {
            SummaryFilter {
                since: self.since.as_deref().map(normalize_date).transpose()?,
                until: self.until.as_deref().map(normalize_date).transpose()?,
                project: None,
            }
        };
        filter.project = self.project.clone();
        Ok(filter)
    }
}
