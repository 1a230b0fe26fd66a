use std::fmt;

use serde::Serialize;

/// Literal header of the time column.  Its values are milliseconds in the
/// file and seconds after decoding.
pub const TIME_HEADER: &str = "time(ms)";

// ---------------------------------------------------------------------------
// RawSeries – one undecoded input column
// ---------------------------------------------------------------------------

/// One input column exactly as it was read from the file.
///
/// `values[i]` is the token of row `i`, or `None` when that row had fewer
/// fields than this column's index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSeries {
    pub header: String,
    pub values: Vec<Option<String>>,
}

impl RawSeries {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            values: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Series – one named, time-aligned column of values
// ---------------------------------------------------------------------------

/// A named column of values, one per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<T> {
    pub header: String,
    pub values: Vec<T>,
}

impl<T> Series<T> {
    pub fn new(header: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            header: header.into(),
            values,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether this is the time column.
    pub fn is_time(&self) -> bool {
        self.header == TIME_HEADER
    }
}

impl<T> fmt::Display for Series<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} rows)", self.header, self.values.len())
    }
}

/// Look up the time column in a decoded collection.
pub fn time_series<T>(series: &[Series<T>]) -> Option<&Series<T>> {
    series.iter().find(|s| s.is_time())
}

/// Headers the user may enable for plotting: everything except the time column.
pub fn selectable_headers<T>(series: &[Series<T>]) -> Vec<String> {
    series
        .iter()
        .filter(|s| !s.is_time())
        .map(|s| s.header.clone())
        .collect()
}

/// Row count shared by every series in the collection (0 when empty).
pub fn row_count<T>(series: &[Series<T>]) -> usize {
    series.first().map(Series::len).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Series<f64>> {
        vec![
            Series::new(TIME_HEADER, vec![0.0, 1.0]),
            Series::new("A", vec![1.0, 3.0]),
            Series::new("B", vec![2.0, 4.0]),
        ]
    }

    #[test]
    fn test_selectable_headers_skip_time() {
        assert_eq!(selectable_headers(&sample()), vec!["A", "B"]);
    }

    #[test]
    fn test_time_series_lookup() {
        let series = sample();
        assert_eq!(time_series(&series).map(|s| s.values.clone()), Some(vec![0.0, 1.0]));
        assert!(time_series(&series[1..]).is_none());
    }

    #[test]
    fn test_row_count() {
        let series = sample();
        assert_eq!(row_count(&series), 2);
        assert_eq!(row_count::<f64>(&[]), 0);
    }
}
