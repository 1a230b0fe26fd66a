use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use super::errors::LoadError;
use super::lines::Rows;
use super::model::{RawSeries, Series};
use super::transform::transform;

/// Field delimiter of the log format.  There is no quoting, so a `;` can never
/// appear inside a field.
pub const FIELD_DELIMITER: char = ';';

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a log file from disk and decode it into series.
///
/// Bytes are decoded as UTF-8 (invalid sequences replaced) and a leading
/// byte-order mark is dropped before parsing.
pub fn load_file(path: &Path) -> Result<Vec<Series<f64>>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let decoded = String::from_utf8_lossy(&bytes);
    let text = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded[..]);
    let series = parse(text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(series)
}

/// Parse log text into decoded, uniquely named, sorted series.
pub fn parse(text: &str) -> Result<Vec<Series<f64>>, LoadError> {
    let started = Instant::now();
    let raw = parse_raw(text)?;
    let series = transform(raw);
    log::info!(
        "Parsed {} columns x {} rows in {:.1} ms",
        series.len(),
        super::model::row_count(&series),
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok(series)
}

// ---------------------------------------------------------------------------
// Column parser
// ---------------------------------------------------------------------------

/// Split log text into raw, untyped columns.
///
/// The first row names the columns.  Each later row contributes one token per
/// column; short rows leave `None` in the trailing columns.  A row with more
/// fields than the header grows extra columns with an empty header, padded
/// with `None` for the rows before it.
pub fn parse_raw(text: &str) -> Result<Vec<RawSeries>, LoadError> {
    let mut rows = Rows::new(text);

    let header_row = rows
        .next()
        .ok_or_else(|| LoadError::malformed("input is empty"))?;
    if header_row.is_empty() {
        return Err(LoadError::malformed("header row has no columns"));
    }

    let mut columns: Vec<RawSeries> = header_row
        .split(FIELD_DELIMITER)
        .map(RawSeries::new)
        .collect();
    let header_count = columns.len();
    let mut row_count = 0usize;
    let mut long_rows = 0usize;

    for row in rows {
        let mut fields = 0usize;
        for (i, token) in row.split(FIELD_DELIMITER).enumerate() {
            if i == columns.len() {
                let mut overflow = RawSeries::new("");
                overflow.values.resize(row_count, None);
                columns.push(overflow);
            }
            columns[i].values.push(Some(token.to_string()));
            fields += 1;
        }
        if fields > header_count {
            long_rows += 1;
        }
        for column in &mut columns[fields..] {
            column.values.push(None);
        }
        row_count += 1;
    }

    if columns.len() > header_count {
        log::warn!(
            "{} row(s) carried more fields than the {} headers; added {} unnamed column(s)",
            long_rows,
            header_count,
            columns.len() - header_count
        );
    }
    log::debug!("Split {} rows into {} raw columns", row_count, columns.len());

    Ok(columns)
}
