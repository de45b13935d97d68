use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use log::{debug, info};

use super::model::{PointDataset, PointValue};
use crate::error::{QueryError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a point dataset from a CSV file.
///
/// Layout: no header row, one record per line, `x,y,value`.
/// * Fields are split exactly as written; the float parser tolerates
///   surrounding whitespace, so `"  5.00,   5.00,  15.00"` loads.
/// * Fields after the third are ignored.
/// * A blank line, or the first record that fails to parse, aborts the
///   whole load.
pub fn load_file(path: &Path) -> Result<PointDataset> {
    let file = std::fs::File::open(path).map_err(|source| QueryError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_from_reader(file, path)?;
    info!(
        "loaded {} points from {} ({} duplicate keys overwritten)",
        dataset.len(),
        path.display(),
        dataset.overwritten()
    );
    Ok(dataset)
}

/// Load records from any byte stream. `origin` only labels read errors.
pub fn load_from_reader<R: Read>(reader: R, origin: &Path) -> Result<PointDataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .quoting(false)
        .trim(Trim::None)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_reader(reader);

    let mut dataset = PointDataset::new();
    let mut record = StringRecord::new();
    let read_err = |source| QueryError::InputRead {
        path: origin.to_path_buf(),
        source,
    };

    // The reader silently drops empty lines. A record starts where the
    // previous one ended, so consuming more than one line means the lines
    // in between were blank.
    let mut end_line = reader.position().line();
    while reader.read_record(&mut record).map_err(read_err)? {
        let line = line_of(&record);
        end_line = reader.position().line();
        if end_line > line + 1 {
            return Err(blank_line(line));
        }

        let point = parse_record(&record)?;
        if let Some(previous) = dataset.insert(point) {
            debug!(
                "line {line}: {} overwrites value {previous} with {}",
                point.key(),
                point.value
            );
        }
    }
    if reader.position().line() > end_line {
        return Err(blank_line(end_line));
    }

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Record parsing
// ---------------------------------------------------------------------------

const FIELDS: [&str; 3] = ["x", "y", "value"];

fn parse_record(record: &StringRecord) -> Result<PointValue> {
    let line = line_of(record);
    let mut parsed = [0.0_f64; 3];
    for (idx, field) in FIELDS.into_iter().enumerate() {
        let text = record
            .get(idx)
            .ok_or(QueryError::MissingField { line, field })?;
        parsed[idx] = text.trim().parse::<f64>().map_err(|_| QueryError::InvalidNumber {
            line,
            field,
            text: text.to_string(),
        })?;
    }
    let [x, y, value] = parsed;
    Ok(PointValue { x, y, value })
}

fn blank_line(line: u64) -> QueryError {
    QueryError::MissingField {
        line,
        field: FIELDS[0],
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}
