//! CSV ingestion for the two user-editable directive tables: ordering
//! (include/exclude/order pattern lists) and name replacements.
//!
//! Both tables are column-oriented: each column belongs to one container
//! type and rows are read top to bottom, so the CSV cell order is the
//! directive order. Columns may be ragged; empty cells are skipped.

mod error;

pub use error::{IngestError, Result};

use std::io::Read;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use codeplug_model::{ObjectKind, Ordering, Replacements};

fn reader_for<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input)
}

/// Parse an ordering table. Each header names a container type
/// (case-insensitive); the cells below it are regex patterns in priority
/// order.
pub fn parse_ordering<R: Read>(input: R) -> Result<Ordering> {
    let mut reader = reader_for(input);
    let headers = reader.headers()?.clone();
    let mut kinds: Vec<ObjectKind> = Vec::with_capacity(headers.len());
    for column in headers.iter() {
        let kind = ObjectKind::from_str(column).map_err(|_| IngestError::UnknownColumn {
            table: "ordering",
            column: column.to_string(),
        })?;
        kinds.push(kind);
    }

    let mut ordering = Ordering::default();
    for record in reader.records() {
        let record = record?;
        for (ix, kind) in kinds.iter().enumerate() {
            match record.get(ix) {
                Some(cell) if !cell.is_empty() => {
                    ordering.patterns_mut(*kind).push(cell.to_string());
                }
                _ => {}
            }
        }
    }
    debug!(
        "parsed ordering table: {} patterns",
        ObjectKind::ALL
            .iter()
            .map(|k| ordering.patterns(*k).len())
            .sum::<usize>()
    );
    Ok(ordering)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplacementColumn {
    Pattern(ObjectKind),
    Repl(ObjectKind),
}

fn replacement_column(raw: &str) -> Option<ReplacementColumn> {
    let lowered = raw.trim().to_ascii_lowercase();
    if let Some(kind) = lowered.strip_suffix("_pattern") {
        return ObjectKind::from_str(kind).ok().map(ReplacementColumn::Pattern);
    }
    if let Some(kind) = lowered.strip_suffix("_repl") {
        return ObjectKind::from_str(kind).ok().map(ReplacementColumn::Repl);
    }
    None
}

fn cell<'r>(
    record: &'r StringRecord,
    columns: &[ReplacementColumn],
    want: ReplacementColumn,
) -> Option<&'r str> {
    columns
        .iter()
        .position(|col| *col == want)
        .and_then(|ix| record.get(ix))
}

/// Parse a replacements table. Headers pair up as `<type>_pattern` /
/// `<type>_repl`; each row contributes one (pattern, replacement) rule per
/// type whose pattern cell is non-empty. A missing or empty `_repl` cell
/// means "replace with nothing".
pub fn parse_replacements<R: Read>(input: R) -> Result<Replacements> {
    let mut reader = reader_for(input);
    let headers = reader.headers()?.clone();
    let mut columns: Vec<ReplacementColumn> = Vec::with_capacity(headers.len());
    for column in headers.iter() {
        match replacement_column(column) {
            Some(col) => columns.push(col),
            None => {
                return Err(IngestError::UnknownColumn {
                    table: "replacements",
                    column: column.to_string(),
                });
            }
        }
    }

    let mut replacements = Replacements::default();
    for record in reader.records() {
        let record = record?;
        for kind in ObjectKind::ALL {
            let Some(pattern) = cell(&record, &columns, ReplacementColumn::Pattern(kind))
            else {
                continue;
            };
            if pattern.is_empty() {
                continue;
            }
            let repl = cell(&record, &columns, ReplacementColumn::Repl(kind)).unwrap_or("");
            replacements
                .rules_mut(kind)
                .push((pattern.to_string(), repl.to_string()));
        }
    }
    debug!(
        "parsed replacements table: {} rules",
        ObjectKind::ALL
            .iter()
            .map(|k| replacements.rules(*k).len())
            .sum::<usize>()
    );
    Ok(replacements)
}
