//! CSV parsing with optional column mapping

use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Column names the validator and resolver understand. Unknown columns are
/// carried through untouched and simply never read.
pub const KNOWN_COLUMNS: &[&str] = &[
    "title",
    "description",
    "board",
    "status",
    "priority",
    "tags",
    "assignee",
    "due_date",
];

/// One data row: physical row number plus non-empty fields keyed by
/// normalized column name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based physical row number; the header is row 1
    pub row_number: u32,
    /// Field values, empty cells omitted
    pub fields: HashMap<String, String>,
}

impl RawRow {
    /// Read a field by canonical column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Parse result: rows plus structural errors
#[derive(Debug, Default)]
pub struct ParsedRows {
    /// Successfully parsed data rows, in file order
    pub rows: Vec<RawRow>,
    /// Structural errors (bad quoting, ragged records, duplicate columns)
    pub errors: Vec<String>,
}

/// Parse CSV text into field-map rows.
///
/// Headers are trimmed and lowercased, then renamed through `mapping`
/// (CSV header to canonical field, matched case-insensitively). At most
/// `row_limit + 1` rows are materialized; the caller's row-count guard
/// rejects anything past the limit, so parsing never buffers an unbounded
/// file.
pub fn parse_rows(
    source: &str,
    mapping: Option<&HashMap<String, String>>,
    row_limit: usize,
) -> ParsedRows {
    let mut parsed = ParsedRows::default();

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(source.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            parsed.errors.push(format!("failed to read header row: {}", e));
            return parsed;
        }
    };

    let mapping: Option<HashMap<String, String>> = mapping.map(|m| {
        m.iter()
            .map(|(from, to)| (from.trim().to_lowercase(), to.trim().to_lowercase()))
            .collect()
    });

    let columns: Vec<String> = headers
        .iter()
        .map(|h| {
            let normalized = h.trim().to_lowercase();
            mapping
                .as_ref()
                .and_then(|m| m.get(&normalized).cloned())
                .unwrap_or(normalized)
        })
        .collect();

    let mut seen = HashSet::new();
    for column in columns.iter().filter(|c| !c.is_empty()) {
        if !seen.insert(column.clone()) {
            parsed
                .errors
                .push(format!("duplicate column \"{}\" after header mapping", column));
        }
    }
    if !parsed.errors.is_empty() {
        return parsed;
    }

    for (index, record) in reader.records().enumerate() {
        if parsed.rows.len() > row_limit {
            debug!(row_limit, "stopped parsing past the row limit");
            break;
        }

        match record {
            Ok(record) => {
                let row_number = record
                    .position()
                    .map(|p| p.line() as u32)
                    .unwrap_or(index as u32 + 2);

                let mut fields = HashMap::new();
                for (column, value) in columns.iter().zip(record.iter()) {
                    if !column.is_empty() && !value.is_empty() {
                        fields.insert(column.clone(), value.to_string());
                    }
                }

                parsed.rows.push(RawRow { row_number, fields });
            }
            Err(e) => parsed.errors.push(e.to_string()),
        }
    }

    parsed
}
