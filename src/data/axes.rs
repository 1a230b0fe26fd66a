use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::model::Series;

// ---------------------------------------------------------------------------
// Axis assignment: which series are plotted, and on which scale
// ---------------------------------------------------------------------------

/// User selection for one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesSelection {
    pub enabled: bool,
    pub axis_id: String,
}

/// Per-series selection state: maps header → selection.
/// A header that is absent is treated as disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AxisAssignment {
    entries: BTreeMap<String, SeriesSelection>,
}

impl AxisAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the selection for `header`, replacing any earlier one.
    pub fn set(&mut self, header: impl Into<String>, enabled: bool, axis_id: impl Into<String>) {
        self.entries.insert(
            header.into(),
            SeriesSelection {
                enabled,
                axis_id: axis_id.into(),
            },
        );
    }

    pub fn get(&self, header: &str) -> Option<&SeriesSelection> {
        self.entries.get(header)
    }

    /// Selection of `header` if it is enabled.
    pub fn enabled(&self, header: &str) -> Option<&SeriesSelection> {
        self.entries.get(header).filter(|sel| sel.enabled)
    }

    pub fn is_enabled(&self, header: &str) -> bool {
        self.enabled(header).is_some()
    }

    /// Number of enabled entries.
    pub fn enabled_count(&self) -> usize {
        self.entries.values().filter(|sel| sel.enabled).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// Axis groups
// ---------------------------------------------------------------------------

/// One y scale of the chart.  Its label is the axis id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct AxisGroup {
    pub id: String,
    pub label: String,
}

impl AxisGroup {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: id.to_string(),
        }
    }
}

/// Distinct axis ids among the enabled, non-time series, sorted by id.
///
/// Ids are accepted as-is: an id the UI never offered simply becomes another
/// axis.
pub fn axis_groups<T>(assignment: &AxisAssignment, series: &[Series<T>]) -> Vec<AxisGroup> {
    let ids: BTreeSet<&str> = series
        .iter()
        .filter(|s| !s.is_time())
        .filter_map(|s| assignment.enabled(&s.header))
        .map(|sel| sel.axis_id.as_str())
        .collect();
    ids.into_iter().map(AxisGroup::new).collect()
}
