use chrono::{Days, Local, NaiveDate};
use cost_core::SummaryFilter;

use crate::error::{AppError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accept `YYYYMMDD` or `YYYY-MM-DD`; return `YYYY-MM-DD`.
pub fn normalize_date(value: &str) -> Result<String> {
    let value = value.trim();
    let parsed = if value.len() == 8 && value.chars().all(|ch| ch.is_ascii_digit()) {
        NaiveDate::parse_from_str(value, "%Y%m%d")
    } else {
        NaiveDate::parse_from_str(value, DATE_FORMAT)
    };
    parsed
        .map(|date| date.format(DATE_FORMAT).to_string())
        .map_err(|err| AppError::InvalidInput(format!("invalid date {value:?}: {err}")))
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_filter(today: NaiveDate) -> SummaryFilter {
    SummaryFilter {
        since: Some(today.format(DATE_FORMAT).to_string()),
        ..SummaryFilter::default()
    }
}

/// The last `days` calendar days ending with `today`; zero is treated as one.
pub fn history_filter(today: NaiveDate, days: u32) -> SummaryFilter {
    let back = u64::from(days.max(1) - 1);
    let since = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
    SummaryFilter {
        since: Some(since.format(DATE_FORMAT).to_string()),
        ..SummaryFilter::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, DATE_FORMAT).expect("date")
    }

    #[test]
    fn normalizes_compact_and_dashed_dates() {
        assert_eq!(normalize_date("20250107").expect("compact"), "2025-01-07");
        assert_eq!(normalize_date("2025-01-07").expect("dashed"), "2025-01-07");
    }

    #[test]
    fn rejects_invalid_dates() {
        assert!(matches!(normalize_date("20251340"), Err(AppError::InvalidInput(_))));
        assert!(normalize_date("yesterday").is_err());
        assert!(normalize_date("2025-02-30").is_err());
    }

    #[test]
    fn history_includes_today() {
        let filter = history_filter(date("2025-03-05"), 30);
        assert_eq!(filter.since.as_deref(), Some("2025-02-04"));
        assert!(filter.until.is_none());
        assert_eq!(
            history_filter(date("2025-03-05"), 1).since.as_deref(),
            Some("2025-03-05")
        );
        assert_eq!(
            history_filter(date("2025-03-05"), 0).since.as_deref(),
            Some("2025-03-05")
        );
    }

    #[test]
    fn today_filter_starts_today() {
        let filter = today_filter(date("2025-03-05"));
        assert_eq!(filter.since.as_deref(), Some("2025-03-05"));
        assert!(filter.project.is_none());
    }
}
