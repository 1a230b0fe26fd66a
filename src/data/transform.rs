use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::model::{RawSeries, Series, TIME_HEADER};

// ---------------------------------------------------------------------------
// ColumnKind – how a column's tokens are decoded
// ---------------------------------------------------------------------------

/// Value reported by the EGR error channel when the commanded EGR is zero.
pub const EGR_ZERO_SENTINEL: f64 = 99.22;

/// Decoded value for enum tokens that match no known state.
pub const UNKNOWN_STATE: f64 = -1.0;

/// Decoding rule for a column, resolved once from its original header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// `time(ms)`: milliseconds, decoded to seconds.
    Time,
    /// `M_GEAR`: gear names decoded to 0 (neutral) through 6.
    EnumGear,
    /// `COMP_BPV`: compressor bypass valve, `OFF` = 0 and `ON` = 100.
    EnumBpv,
    /// `EGR_ERR#1(%)`: percentage with a sensor sentinel mapped to 0.
    SentinelPercent,
    /// Everything else: plain number.
    Generic,
}

impl ColumnKind {
    pub fn from_header(header: &str) -> Self {
        match header {
            TIME_HEADER => ColumnKind::Time,
            "M_GEAR" => ColumnKind::EnumGear,
            "COMP_BPV" => ColumnKind::EnumBpv,
            "EGR_ERR#1(%)" => ColumnKind::SentinelPercent,
            _ => ColumnKind::Generic,
        }
    }

    /// Decode one token.  Missing and unparsable numbers become NaN.
    pub fn decode(self, token: Option<&str>) -> f64 {
        match self {
            ColumnKind::Time => parse_number(token) / 1000.0,
            ColumnKind::EnumGear => match token {
                Some("Neutral") => 0.0,
                Some("1st gear") => 1.0,
                Some("2nd gear") => 2.0,
                Some("3rd gear") => 3.0,
                Some("4th gear") => 4.0,
                Some("5th gear") => 5.0,
                Some("6th gear") => 6.0,
                _ => UNKNOWN_STATE,
            },
            ColumnKind::EnumBpv => match token {
                Some("OFF") => 0.0,
                Some("ON") => 100.0,
                _ => UNKNOWN_STATE,
            },
            ColumnKind::SentinelPercent => {
                let value = parse_number(token);
                if value == EGR_ZERO_SENTINEL {
                    0.0
                } else {
                    value
                }
            }
            ColumnKind::Generic => parse_number(token),
        }
    }
}

fn parse_number(token: Option<&str>) -> f64 {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .and_then(|t| t.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// Header disambiguation
// ---------------------------------------------------------------------------

/// Give every header a unique name, keeping column order.
///
/// The first occurrence keeps its name; the second becomes `"<header> 1"`,
/// the third `"<header> 2"` and so on.  A generated name that clashes with a
/// header already emitted skips to the next number.
pub fn disambiguate_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    let mut repeats: HashMap<&str, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut names = Vec::with_capacity(headers.len());

    for header in headers {
        let header = header.as_ref();
        let repeat = repeats.entry(header).or_insert(0);
        let mut name = if *repeat == 0 {
            header.to_string()
        } else {
            format!("{header} {}", *repeat)
        };
        while taken.contains(&name) {
            *repeat += 1;
            name = format!("{header} {}", *repeat);
        }
        *repeat += 1;
        taken.insert(name.clone());
        names.push(name);
    }
    names
}

// ---------------------------------------------------------------------------
// Column transform
// ---------------------------------------------------------------------------

/// Decode raw columns, make headers unique and sort the result.
///
/// Decoding is keyed by the original header, so a repeated `time(ms)` column
/// is still converted to seconds even though only the first keeps the name.
pub fn transform(raw: Vec<RawSeries>) -> Vec<Series<f64>> {
    let names = disambiguate_headers(&raw.iter().map(|c| c.header.as_str()).collect::<Vec<_>>());

    let mut series: Vec<Series<f64>> = raw
        .into_iter()
        .zip(names)
        .map(|(column, name)| {
            let kind = ColumnKind::from_header(&column.header);
            if name != column.header {
                log::debug!("Renamed duplicate column '{}' to '{name}'", column.header);
            }
            let values = column
                .values
                .iter()
                .map(|token| kind.decode(token.as_deref()))
                .collect();
            Series::new(name, values)
        })
        .collect();

    sort_series(&mut series);
    series
}

/// Time column first, the rest by header (ordinal, case-sensitive).
pub fn sort_series<T>(series: &mut [Series<T>]) {
    series.sort_by(|a, b| match (a.is_time(), b.is_time()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.header.cmp(&b.header),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(header: &str, tokens: &[Option<&str>]) -> RawSeries {
        RawSeries {
            header: header.to_string(),
            values: tokens.iter().map(|t| t.map(str::to_string)).collect(),
        }
    }

    #[test]
    fn test_column_kind_from_header() {
        assert_eq!(ColumnKind::from_header("time(ms)"), ColumnKind::Time);
        assert_eq!(ColumnKind::from_header("M_GEAR"), ColumnKind::EnumGear);
        assert_eq!(ColumnKind::from_header("COMP_BPV"), ColumnKind::EnumBpv);
        assert_eq!(ColumnKind::from_header("EGR_ERR#1(%)"), ColumnKind::SentinelPercent);
        assert_eq!(ColumnKind::from_header("m_gear"), ColumnKind::Generic);
        assert_eq!(ColumnKind::from_header("RPM"), ColumnKind::Generic);
    }

    #[test]
    fn test_time_converts_to_seconds() {
        assert_eq!(ColumnKind::Time.decode(Some("1500")), 1.5);
        assert!(ColumnKind::Time.decode(None).is_nan());
    }

    #[test]
    fn test_bpv_states() {
        assert_eq!(ColumnKind::EnumBpv.decode(Some("ON")), 100.0);
        assert_eq!(ColumnKind::EnumBpv.decode(Some("OFF")), 0.0);
        assert_eq!(ColumnKind::EnumBpv.decode(Some("weird")), -1.0);
        assert_eq!(ColumnKind::EnumBpv.decode(None), -1.0);
    }

    #[test]
    fn test_gear_states() {
        assert_eq!(ColumnKind::EnumGear.decode(Some("Neutral")), 0.0);
        assert_eq!(ColumnKind::EnumGear.decode(Some("1st gear")), 1.0);
        assert_eq!(ColumnKind::EnumGear.decode(Some("2nd gear")), 2.0);
        assert_eq!(ColumnKind::EnumGear.decode(Some("3rd gear")), 3.0);
        assert_eq!(ColumnKind::EnumGear.decode(Some("4th gear")), 4.0);
        assert_eq!(ColumnKind::EnumGear.decode(Some("5th gear")), 5.0);
        assert_eq!(ColumnKind::EnumGear.decode(Some("6th gear")), 6.0);
        assert_eq!(ColumnKind::EnumGear.decode(Some("7th gear")), -1.0);
        assert_eq!(ColumnKind::EnumGear.decode(Some("")), -1.0);
    }

    #[test]
    fn test_egr_sentinel() {
        assert_eq!(ColumnKind::SentinelPercent.decode(Some("99.22")), 0.0);
        assert_eq!(ColumnKind::SentinelPercent.decode(Some("50.00")), 50.0);
        assert_eq!(ColumnKind::SentinelPercent.decode(Some("99.2")), 99.2);
        assert!(ColumnKind::SentinelPercent.decode(Some("n/a")).is_nan());
    }

    #[test]
    fn test_generic_numbers() {
        assert_eq!(ColumnKind::Generic.decode(Some(" 12.5 ")), 12.5);
        assert_eq!(ColumnKind::Generic.decode(Some("-3")), -3.0);
        assert!(ColumnKind::Generic.decode(Some("")).is_nan());
        assert!(ColumnKind::Generic.decode(Some("abc")).is_nan());
        assert!(ColumnKind::Generic.decode(None).is_nan());
    }

    #[test]
    fn test_duplicate_headers_numbered_from_one() {
        assert_eq!(
            disambiguate_headers(&["X", "Y", "X", "X"]),
            vec!["X", "Y", "X 1", "X 2"]
        );
    }

    #[test]
    fn test_duplicate_numbering_is_per_header() {
        assert_eq!(
            disambiguate_headers(&["A", "B", "B", "A", "B"]),
            vec!["A", "B", "B 1", "A 1", "B 2"]
        );
    }

    #[test]
    fn test_generated_name_skips_existing_header() {
        assert_eq!(
            disambiguate_headers(&["X", "X 1", "X"]),
            vec!["X", "X 1", "X 2"]
        );
    }

    #[test]
    fn test_transform_sorts_with_time_first() {
        let series = transform(vec![
            raw("b", &[Some("1")]),
            raw("time(ms)", &[Some("2000")]),
            raw("B", &[Some("2")]),
            raw("a", &[Some("3")]),
        ]);
        let headers: Vec<&str> = series.iter().map(|s| s.header.as_str()).collect();
        assert_eq!(headers, vec!["time(ms)", "B", "a", "b"]);
        assert_eq!(series[0].values, vec![2.0]);
    }

    #[test]
    fn test_repeated_special_header_keeps_its_decoding() {
        let series = transform(vec![
            raw("time(ms)", &[Some("1000")]),
            raw("COMP_BPV", &[Some("ON")]),
            raw("COMP_BPV", &[Some("OFF")]),
        ]);
        let headers: Vec<&str> = series.iter().map(|s| s.header.as_str()).collect();
        assert_eq!(headers, vec!["time(ms)", "COMP_BPV", "COMP_BPV 1"]);
        assert_eq!(series[1].values, vec![100.0]);
        assert_eq!(series[2].values, vec![0.0]);
    }

    #[test]
    fn test_missing_tokens_become_nan() {
        let series = transform(vec![raw("A", &[Some("1"), None])]);
        assert_eq!(series[0].values[0], 1.0);
        assert!(series[0].values[1].is_nan());
    }
}
