//! Reference resolution: names to stable ids

use super::parse::RawRow;
use super::validate::parse_due_date;
use crate::core::models::{NamedRef, Priority, ReferenceConfig, RowError, TaskPayload};

/// Maximum edit distance for a "did you mean" suggestion
const SUGGESTION_DISTANCE: usize = 2;

/// Resolve one row's references against the configuration snapshot.
///
/// Always returns a best-effort payload alongside the errors; the payload
/// is only meaningful when the combined validation and resolution error
/// list for the row is empty. `board_id` is left blank here because the
/// job-level target board wins over any per-row value.
pub fn resolve_row(row: &RawRow, config: &ReferenceConfig) -> (TaskPayload, Vec<RowError>) {
    let mut errors = Vec::new();

    let mut payload = TaskPayload {
        title: row.get("title").map(|t| t.trim().to_string()).unwrap_or_default(),
        description: row.get("description").map(str::to_string),
        board_id: String::new(),
        status_id: None,
        priority: row.get("priority").and_then(Priority::parse),
        tag_ids: Vec::new(),
        assignee_id: None,
        due_at: row.get("due_date").and_then(parse_due_date),
    };

    if let Some(raw) = row.get("status") {
        match find_named(&config.statuses, raw) {
            Some(status) => payload.status_id = Some(status.id.clone()),
            None => errors.push(unknown_reference(
                row.row_number,
                "status",
                raw,
                config.statuses.iter().map(|s| s.name.as_str()),
            )),
        }
    }

    if let Some(raw) = row.get("tags") {
        for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match find_named(&config.tags, tag) {
                Some(found) => payload.tag_ids.push(found.id.clone()),
                None => errors.push(unknown_reference(
                    row.row_number,
                    "tags",
                    tag,
                    config.tags.iter().map(|t| t.name.as_str()),
                )),
            }
        }
    }

    if let Some(raw) = row.get("assignee") {
        let needle = raw.trim();
        let found = config.assignees.iter().find(|a| {
            a.name.eq_ignore_ascii_case(needle) || a.email.eq_ignore_ascii_case(needle)
        });
        match found {
            Some(assignee) => payload.assignee_id = Some(assignee.id.clone()),
            None => errors.push(unknown_reference(
                row.row_number,
                "assignee",
                raw,
                config.assignees.iter().map(|a| a.name.as_str()),
            )),
        }
    }

    (payload, errors)
}

/// Case-insensitive name lookup
pub fn find_named<'a>(refs: &'a [NamedRef], name: &str) -> Option<&'a NamedRef> {
    let needle = name.trim();
    refs.iter().find(|r| r.name.eq_ignore_ascii_case(needle))
}

/// Pick the closest candidate to `input`: a case-insensitive prefix match
/// wins outright, otherwise the smallest edit distance within
/// [`SUGGESTION_DISTANCE`].
pub fn suggest<'a>(candidates: impl Iterator<Item = &'a str>, input: &str) -> Option<&'a str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let lowered = candidate.to_lowercase();
        if lowered.starts_with(&needle) || needle.starts_with(&lowered) {
            return Some(candidate);
        }

        let distance = levenshtein(&lowered, &needle);
        if distance <= SUGGESTION_DISTANCE && best.is_none_or(|(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(candidate, _)| candidate)
}

fn unknown_reference<'a>(
    row_number: u32,
    field: &str,
    value: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> RowError {
    let mut message = format!("unknown {} \"{}\"", field, value.trim());
    if let Some(suggestion) = suggest(candidates, value) {
        message.push_str(&format!(" (did you mean \"{}\"?)", suggestion));
    }
    RowError::new(row_number, field, message)
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
