use cost_core::{FileRecord, SummaryFilter, TokenCounts, UsageRecord};
use rusqlite::Row;

pub(crate) fn row_to_tokens(
    row: &Row<'_>,
    offset: usize,
) -> std::result::Result<TokenCounts, rusqlite::Error> {
    Ok(TokenCounts {
        input_tokens: row.get::<_, i64>(offset)?.max(0) as u64,
        output_tokens: row.get::<_, i64>(offset + 1)?.max(0) as u64,
        cache_creation_input_tokens: row.get::<_, i64>(offset + 2)?.max(0) as u64,
        cache_read_input_tokens: row.get::<_, i64>(offset + 3)?.max(0) as u64,
    })
}

pub(crate) fn row_to_file_record(
    row: &Row<'_>,
) -> std::result::Result<FileRecord, rusqlite::Error> {
    Ok(FileRecord {
        path: row.get(0)?,
        mtime_ms: row.get(1)?,
        size: row.get::<_, i64>(2)?.max(0) as u64,
        session_id: row.get(3)?,
        project_dir: row.get(4)?,
    })
}

pub(crate) fn row_to_usage_record(
    row: &Row<'_>,
) -> std::result::Result<UsageRecord, rusqlite::Error> {
    Ok(UsageRecord {
        file_path: row.get(0)?,
        date: row.get(1)?,
        model: row.get(2)?,
        session_id: row.get(3)?,
        project_dir: row.get(4)?,
        tokens: row_to_tokens(row, 5)?,
        message_count: row.get::<_, i64>(9)?.max(0) as u64,
    })
}

/// SQL `WHERE` clause for a summary filter plus its positional parameters.
pub(crate) fn filter_clause(filter: &SummaryFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();
    if let Some(since) = &filter.since {
        params.push(since.clone());
        conditions.push(format!("date >= ?{}", params.len()));
    }
    if let Some(until) = &filter.until {
        params.push(until.clone());
        conditions.push(format!("date <= ?{}", params.len()));
    }
    if let Some(project) = &filter.project {
        params.push(project.clone());
        conditions.push(format!("instr(lower(project_dir), lower(?{})) > 0", params.len()));
    }
    if conditions.is_empty() {
        (String::new(), params)
    } else {
        (format!("WHERE {}", conditions.join(" AND ")), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_clause_numbers_parameters_in_order() {
        let filter = SummaryFilter {
            since: None,
            until: Some("2025-01-31".to_string()),
            project: Some("app".to_string()),
        };
        let (clause, params) = filter_clause(&filter);
        assert_eq!(
            clause,
            "WHERE date <= ?1 AND instr(lower(project_dir), lower(?2)) > 0"
        );
        assert_eq!(params, vec!["2025-01-31".to_string(), "app".to_string()]);
    }

    #[test]
    fn empty_filter_has_no_clause() {
        let (clause, params) = filter_clause(&SummaryFilter::default());
        assert!(clause.is_empty());
        assert!(params.is_empty());
    }
}
