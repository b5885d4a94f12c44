//! CSV input: taxon lists written by earlier runs and CSV payloads from services.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{OutputError, Result};

/// One CSV row keyed by header name.
pub type Row = BTreeMap<String, String>;

/// Read a CSV file into header-keyed rows.
///
/// Header names lose any byte-order mark and surrounding whitespace; cell
/// values are trimmed.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let file = std::fs::File::open(path).map_err(|e| OutputError::io(path, e))?;
    rows_from_reader(file, &path.display().to_string())
}

/// Parse CSV text, e.g. a service export, into header-keyed rows.
pub fn read_rows_from_str(text: &str, origin: &str) -> Result<Vec<Row>> {
    rows_from_reader(text.as_bytes(), origin)
}

/// Distinct non-empty values of `column`, in first-seen order.
pub fn read_column(path: &Path, column: &str) -> Result<Vec<String>> {
    let rows = read_rows(path)?;
    distinct_column(&rows, column, &path.display().to_string())
}

/// Distinct non-empty values of `column` across `rows`, in first-seen order.
///
/// An empty row set has no header to check and yields no values.
pub fn distinct_column(rows: &[Row], column: &str, origin: &str) -> Result<Vec<String>> {
    if let Some(first) = rows.first()
        && !first.contains_key(column)
    {
        return Err(OutputError::MissingColumn {
            column: column.to_string(),
            origin: origin.to_string(),
        });
    }
    let mut seen = BTreeSet::new();
    let mut values = Vec::new();
    for row in rows {
        let Some(value) = row.get(column).filter(|v| !v.is_empty()) else {
            continue;
        };
        if seen.insert(value.clone()) {
            values.push(value.clone());
        }
    }
    Ok(values)
}

fn rows_from_reader<R: Read>(input: R, origin: &str) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| OutputError::csv(origin, e))?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| OutputError::csv(origin, e))?;
        let mut row = Row::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).unwrap_or("").trim().to_string();
            row.insert(header.clone(), value);
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_and_whitespace() {
        let rows = read_rows_from_str("\u{feff}ID , Genus\n 1 , Abies \n2,\n", "memory").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["ID"], "1");
        assert_eq!(rows[0]["Genus"], "Abies");
        assert_eq!(rows[1]["Genus"], "");
    }

    #[test]
    fn test_short_records_are_padded() {
        let rows = read_rows_from_str("a,b,c\n1\n", "memory").unwrap();
        assert_eq!(rows[0]["c"], "");
    }

    #[test]
    fn test_distinct_column() {
        let rows = read_rows_from_str("id\nx\n\ny\nx\n", "memory").unwrap();
        assert_eq!(distinct_column(&rows, "id", "memory").unwrap(), vec!["x", "y"]);
        let err = distinct_column(&rows, "other", "memory").unwrap_err();
        assert!(matches!(err, OutputError::MissingColumn { .. }));
    }
}
