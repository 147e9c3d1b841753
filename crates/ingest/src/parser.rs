use std::collections::{BTreeMap, HashSet};
use std::fs;

use chrono::{DateTime, FixedOffset, Local};
use cost_core::{FileRecord, TokenCounts, UsageRecord};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::IngestIssue;

/// Model name the assistant writes for locally generated messages.
pub const SYNTHETIC_MODEL: &str = "<synthetic>";

const USAGE_MARKER: &str = "\"usage\"";

/// Decode a field, falling back to its default when the JSON type is wrong.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keep any value, `null` included, so presence can be told apart from absence.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogLine {
    #[serde(default, deserialize_with = "lenient")]
    timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    request_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    message: Option<LogMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct LogMessage {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    usage: Option<LogUsage>,
}

#[derive(Debug, Default, Deserialize)]
struct LogUsage {
    #[serde(default, deserialize_with = "present")]
    input_tokens: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    output_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    cache_creation_input_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    cache_read_input_tokens: Option<u64>,
}

/// Timezone used to turn event timestamps into calendar dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum DateZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DateZone {
    fn date_of(&self, timestamp: &DateTime<FixedOffset>) -> String {
        match self {
            DateZone::Local => timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string(),
            DateZone::Fixed(offset) => timestamp.with_timezone(offset).format("%Y-%m-%d").to_string(),
        }
    }
}

/// One line that carried usage, before dedup.
#[derive(Debug)]
struct UsageLine {
    dedup_key: Option<String>,
    model: String,
    date: Option<String>,
    tokens: TokenCounts,
}

struct ReadFile {
    lines: Vec<UsageLine>,
    issue: Option<IngestIssue>,
}

/// Records extracted from a batch of files.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<UsageRecord>,
    pub issues: Vec<IngestIssue>,
    /// Lines dropped because their (message id, request id) was already counted.
    pub duplicates_skipped: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogParser {
    zone: DateZone,
}

impl LogParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            zone: DateZone::Fixed(offset),
        }
    }

    /// Parse `files` into per-(date, model) records.
    ///
    /// `seen` holds dedup keys across the whole run; the first occurrence of a
    /// key in file order wins even though files are read concurrently.
    pub fn parse_files(&self, files: &[FileRecord], seen: &mut HashSet<String>) -> ParseOutcome {
        let read = files
            .par_iter()
            .map(|file| self.read_file(file))
            .collect::<Vec<_>>();

        let mut outcome = ParseOutcome::default();
        for (file, read) in files.iter().zip(read) {
            if let Some(issue) = read.issue {
                outcome.issues.push(issue);
            }
            let mut groups: BTreeMap<(String, String), (TokenCounts, u64)> = BTreeMap::new();
            for line in read.lines {
                if let Some(key) = line.dedup_key {
                    if seen.contains(&key) {
                        outcome.duplicates_skipped += 1;
                        continue;
                    }
                    seen.insert(key);
                }
                if line.model.is_empty() || line.model == SYNTHETIC_MODEL {
                    continue;
                }
                let Some(date) = line.date else {
                    continue;
                };
                let entry = groups.entry((date, line.model)).or_default();
                entry.0.add(&line.tokens);
                entry.1 += 1;
            }
            tracing::debug!(path = %file.path, groups = groups.len(), "parsed log file");
            outcome
                .records
                .extend(groups.into_iter().map(|((date, model), (tokens, count))| {
                    UsageRecord {
                        file_path: file.path.clone(),
                        date,
                        model,
                        session_id: file.session_id.clone(),
                        project_dir: file.project_dir.clone(),
                        tokens,
                        message_count: count,
                    }
                }));
        }
        outcome
    }

    fn read_file(&self, file: &FileRecord) -> ReadFile {
        match fs::read_to_string(&file.path) {
            Ok(contents) => ReadFile {
                lines: contents
                    .lines()
                    .filter_map(|line| self.usage_line(line))
                    .collect(),
                issue: None,
            },
            Err(err) => {
                tracing::debug!(path = %file.path, error = %err, "failed to read log file");
                ReadFile {
                    lines: Vec::new(),
                    issue: Some(IngestIssue {
                        file_path: file.path.clone(),
                        message: err.to_string(),
                    }),
                }
            }
        }
    }

    fn usage_line(&self, line: &str) -> Option<UsageLine> {
        if !line.contains(USAGE_MARKER) {
            return None;
        }
        let parsed: LogLine = serde_json::from_str(line).ok()?;
        let message = parsed.message?;
        let usage = message.usage?;
        let input_tokens = serde_json::from_value::<u64>(usage.input_tokens?).unwrap_or(0);
        let dedup_key = match (&message.id, &parsed.request_id) {
            (Some(id), Some(request_id)) => Some(format!("{id}:{request_id}")),
            _ => None,
        };
        let date = parsed
            .timestamp
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|timestamp| self.zone.date_of(&timestamp));
        Some(UsageLine {
            dedup_key,
            model: message.model.unwrap_or_default(),
            date,
            tokens: TokenCounts {
                input_tokens,
                output_tokens: usage.output_tokens.unwrap_or(0),
                cache_creation_input_tokens: usage.cache_creation_input_tokens.unwrap_or(0),
                cache_read_input_tokens: usage.cache_read_input_tokens.unwrap_or(0),
            },
        })
    }
}
