//! Tabular import/export (CSV)
//!
//! Three fixed exports:
//! - source tracks: `position,title,channel,video_id,url`
//! - matched tracks: `position,title,channel,spotify_url,query_used`
//! - unmatched tracks: `position,title,channel,youtube_url,query_used`
//!
//! Fields containing a comma, quote, CR or LF are quoted; quotes are doubled.

use crate::error::TableError;
use crate::models::{CatalogFormat, CatalogUri, MatchReport, SourceItem};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

pub const SOURCE_EXPORT_FILE: &str = "youtube_tracks.csv";
pub const MATCHED_EXPORT_FILE: &str = "matched_tracks.csv";
pub const UNMATCHED_EXPORT_FILE: &str = "unmatched_tracks.csv";

const SOURCE_COLUMNS: &[&str] = &["position", "title", "channel", "video_id", "url"];
const MATCHED_COLUMNS: &[&str] = &["position", "title", "channel", "spotify_url", "query_used"];
const UNMATCHED_COLUMNS: &[&str] = &["position", "title", "channel", "youtube_url", "query_used"];

/// Header + rows of string fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn with_columns(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows as column-name maps; errors if a required column is missing
    pub fn records(&self, required: &[&str]) -> Result<Vec<HashMap<&str, &str>>, TableError> {
        for column in required {
            if !self.columns.iter().any(|c| c == column) {
                return Err(TableError::MissingColumn(column.to_string()));
            }
        }

        Ok(self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter().map(String::as_str))
                    .collect()
            })
            .collect())
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_record(&mut out, &self.columns);
        for row in &self.rows {
            push_record(&mut out, row);
        }
        out
    }

    pub fn parse_csv(content: &str) -> Result<Self, TableError> {
        let mut records = parse_records(content)?.into_iter();
        let columns = records.next().unwrap_or_default();
        let rows: Vec<Vec<String>> = records.collect();

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::BadRow {
                    row: idx + 1,
                    reason: format!("expected {} fields, found {}", columns.len(), row.len()),
                });
            }
        }

        Ok(Self { columns, rows })
    }

    pub fn write(&self, path: &Path) -> Result<(), TableError> {
        std::fs::write(path, self.to_csv())?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_csv(&content)
    }
}

fn push_record(out: &mut String, fields: &[String]) {
    let line: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn parse_records(content: &str) -> Result<Vec<Vec<String>>, TableError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(TableError::UnterminatedQuote);
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

/// Source export rows
pub fn source_table(items: &[SourceItem]) -> Table {
    let mut table = Table::with_columns(SOURCE_COLUMNS);
    table.rows = items
        .iter()
        .map(|item| {
            vec![
                item.position.to_string(),
                item.title.clone(),
                item.channel.clone(),
                item.external_id.clone(),
                item.url.clone(),
            ]
        })
        .collect();
    table
}

/// Matched export rows (Matched outcomes only)
pub fn matched_table(report: &MatchReport) -> Table {
    let mut table = Table::with_columns(MATCHED_COLUMNS);
    table.rows = report
        .outcomes
        .iter()
        .filter(|o| o.is_matched())
        .map(|o| {
            vec![
                o.source_item.position.to_string(),
                o.source_item.title.clone(),
                o.source_item.channel.clone(),
                o.catalog_url.clone().unwrap_or_default(),
                o.query_label().to_string(),
            ]
        })
        .collect();
    table
}

/// Unmatched export rows (Unmatched and Error outcomes)
pub fn unmatched_table(report: &MatchReport) -> Table {
    let mut table = Table::with_columns(UNMATCHED_COLUMNS);
    table.rows = report
        .outcomes
        .iter()
        .filter(|o| !o.is_matched())
        .map(|o| {
            vec![
                o.source_item.position.to_string(),
                o.source_item.title.clone(),
                o.source_item.channel.clone(),
                o.source_item.url.clone(),
                o.query_label().to_string(),
            ]
        })
        .collect();
    table
}

/// Write the source export into `dir`
pub fn export_source(items: &[SourceItem], dir: &Path) -> Result<(), TableError> {
    let path = dir.join(SOURCE_EXPORT_FILE);
    source_table(items).write(&path)?;
    info!("Exported {} tracks to {}", items.len(), path.display());
    Ok(())
}

/// Write the matched and unmatched exports into `dir`
pub fn export_results(report: &MatchReport, dir: &Path) -> Result<(), TableError> {
    let matched = matched_table(report);
    let matched_path = dir.join(MATCHED_EXPORT_FILE);
    matched.write(&matched_path)?;
    info!(
        "Exported {} matched tracks to {}",
        matched.rows.len(),
        matched_path.display()
    );

    let unmatched = unmatched_table(report);
    let unmatched_path = dir.join(UNMATCHED_EXPORT_FILE);
    unmatched.write(&unmatched_path)?;
    info!(
        "Exported {} unmatched tracks to {}",
        unmatched.rows.len(),
        unmatched_path.display()
    );

    Ok(())
}

/// Read catalog URIs back from a matched export
///
/// Rows whose `spotify_url` is not a track URL on the catalog domain are skipped.
pub fn read_matched_uris(path: &Path, format: &CatalogFormat) -> Result<Vec<CatalogUri>, TableError> {
    let table = Table::read(path)?;
    let mut uris = Vec::new();

    for record in table.records(&["spotify_url"])? {
        let url = record.get("spotify_url").copied().unwrap_or_default();
        match format.from_url(url) {
            Ok(uri) => uris.push(uri),
            Err(e) => debug!(url = %url, error = %e, "Skipping row without track URL"),
        }
    }

    Ok(uris)
}

/// Read titles from an unmatched export
pub fn read_unmatched_titles(path: &Path) -> Result<Vec<String>, TableError> {
    let table = Table::read(path)?;
    Ok(table
        .records(&["title"])?
        .into_iter()
        .map(|r| r.get("title").copied().unwrap_or_default().to_string())
        .collect())
}
