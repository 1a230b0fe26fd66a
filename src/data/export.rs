use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::dataset::Chart;
use super::model::{row_count, Series};

/// Header written for the decoded time column, whose values are seconds.
pub const EXPORTED_TIME_HEADER: &str = "time(s)";

/// Write decoded series as a semicolon-separated, CRLF-terminated table.
///
/// NaN values are written as empty fields.  Fields are never quoted: the log
/// format has no quoting.
pub fn write_series_csv<W: Write>(series: &[Series<f64>], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(out);

    writer
        .write_record(series.iter().map(|s| {
            if s.is_time() {
                EXPORTED_TIME_HEADER
            } else {
                s.header.as_str()
            }
        }))
        .context("writing header row")?;

    for row in 0..row_count(series) {
        let record: Vec<String> = series
            .iter()
            .map(|s| match s.values.get(row) {
                Some(v) if !v.is_nan() => v.to_string(),
                _ => String::new(),
            })
            .collect();
        writer
            .write_record(&record)
            .with_context(|| format!("writing row {row}"))?;
    }

    writer.flush().context("flushing CSV output")?;
    Ok(())
}

pub fn export_series_csv(series: &[Series<f64>], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_series_csv(series, std::io::BufWriter::new(file))?;
    log::info!("Exported {} series to {}", series.len(), path.display());
    Ok(())
}

/// Write the chart (spec and dataset) as pretty JSON.  NaN becomes `null`.
pub fn export_chart_json(chart: &Chart, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, chart).context("serializing chart")?;
    writer.flush().context("flushing chart JSON")?;
    log::info!(
        "Exported {} plotted series to {}",
        chart.dataset.series.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::axes::AxisAssignment;
    use crate::data::dataset::{build_chart, InteractionHints};
    use crate::data::model::TIME_HEADER;

    #[test]
    fn test_csv_export_layout() {
        let series = vec![
            Series::new(TIME_HEADER, vec![0.0, 1.5]),
            Series::new("A", vec![1.0, f64::NAN]),
        ];
        let mut out = Vec::new();
        write_series_csv(&series, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "time(s);A\r\n0;1\r\n1.5;\r\n");
    }

    #[test]
    fn test_csv_export_never_quotes() {
        let series = vec![Series::new("Boost \"raw\"", vec![1.0])];
        let mut out = Vec::new();
        write_series_csv(&series, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Boost \"raw\"\r\n1\r\n");
    }

    #[test]
    fn test_csv_export_reloads_with_same_headers() {
        let series = vec![
            Series::new("Boost \"raw\"", vec![1.0, 2.0]),
            Series::new("RPM", vec![900.0, f64::NAN]),
        ];
        let mut out = Vec::new();
        write_series_csv(&series, &mut out).unwrap();

        let reloaded = crate::data::loader::parse(&String::from_utf8(out).unwrap()).unwrap();
        let headers: Vec<&str> = reloaded.iter().map(|s| s.header.as_str()).collect();
        assert_eq!(headers, vec!["Boost \"raw\"", "RPM"]);
        assert!(reloaded[1].values[1].is_nan());
    }

    fn small_chart() -> Chart {
        let series = vec![
            Series::new(TIME_HEADER, vec![0.0]),
            Series::new("A", vec![1.0]),
        ];
        let mut assignment = AxisAssignment::new();
        assignment.set("A", true, "y1");
        build_chart(&series, &assignment, InteractionHints::default()).unwrap()
    }

    #[test]
    fn test_chart_json_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        export_chart_json(&small_chart(), &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["dataset"]["series"][0]["label"], "A");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_chart_json_write_failure_is_reported() {
        let result = export_chart_json(&small_chart(), Path::new("/dev/full"));
        assert!(result.is_err());
    }

    #[test]
    fn test_chart_json_nan_is_null() {
        let series = vec![
            Series::new(TIME_HEADER, vec![0.0]),
            Series::new("A", vec![f64::NAN]),
        ];
        let mut assignment = AxisAssignment::new();
        assignment.set("A", true, "y1");
        let chart = build_chart(&series, &assignment, InteractionHints::default()).unwrap();

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["dataset"]["series"][0]["label"], "A");
        assert!(json["dataset"]["series"][0]["points"][0]["y"].is_null());
        assert_eq!(json["spec"]["y_axes"][0]["id"], "y1");
    }
}
