use std::collections::BTreeMap;

use cost_core::{DailyReport, DailySummary, ModelCost, PricingTable, SummaryFilter, UnknownModels};
use rusqlite::params_from_iter;

use crate::Db;
use crate::error::Result;
use crate::helpers::{filter_clause, row_to_tokens};

impl Db {
    /// Per-date cost and token totals, ascending by date.
    ///
    /// Cost is resolved per (date, model) group and summed per date. Session
    /// counts are distinct per date, not summed across models.
    pub fn query_daily_summaries(
        &self,
        filter: &SummaryFilter,
        pricing: &PricingTable,
    ) -> Result<DailyReport> {
        let (where_clause, params) = filter_clause(filter);
        let mut days: BTreeMap<String, DailySummary> = BTreeMap::new();
        let mut unknown = UnknownModels::default();

        let sql = format!(
            r#"
            SELECT date, model,
                   SUM(input_tokens), SUM(output_tokens),
                   SUM(cache_creation_input_tokens), SUM(cache_read_input_tokens)
            FROM usage
            {where_clause}
            GROUP BY date, model
            ORDER BY date ASC, model ASC
            "#
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row_to_tokens(row, 2)?,
            ))
        })?;
        for row in rows {
            let (date, model, tokens) = row?;
            let cost_usd = pricing.cost(&model, &tokens, &mut unknown);
            let day = days
                .entry(date)
                .or_insert_with_key(|date| DailySummary::empty(date));
            day.cost_usd += cost_usd;
            day.tokens.add(&tokens);
            day.models.push(ModelCost {
                model,
                tokens,
                cost_usd,
            });
        }

        let sql = format!(
            r#"
            SELECT date, COUNT(DISTINCT session_id)
            FROM usage
            {where_clause}
            GROUP BY date
            "#
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        for row in rows {
            let (date, sessions) = row?;
            if let Some(day) = days.get_mut(&date) {
                day.sessions = sessions.max(0) as u64;
            }
        }

        Ok(DailyReport {
            summaries: days.into_values().collect(),
            unknown_models: unknown.into_vec(),
        })
    }
}
