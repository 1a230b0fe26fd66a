use serde::Serialize;

use super::axes::{axis_groups, AxisAssignment, AxisGroup};
use super::errors::DatasetError;
use super::model::{time_series, Series, TIME_HEADER};

// ---------------------------------------------------------------------------
// RenderDataset – what the chart paints for one draw
// ---------------------------------------------------------------------------

/// One sample: x is seconds since the log started, y the decoded value.
/// Either may be NaN; the renderer spans the gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSeries {
    pub label: String,
    pub axis_id: String,
    pub points: Vec<RenderPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderDataset {
    pub series: Vec<RenderSeries>,
}

impl RenderDataset {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of points over all series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Build the dataset for the enabled series, in collection order.
///
/// Every row produces a point, NaN values included.  Fails when the
/// collection has no `time(ms)` column, even if nothing is enabled.
pub fn build_dataset(
    series: &[Series<f64>],
    assignment: &AxisAssignment,
) -> Result<RenderDataset, DatasetError> {
    let time = time_series(series).ok_or(DatasetError::MissingTimeAxis {
        header: TIME_HEADER,
    })?;

    let series = series
        .iter()
        .filter(|s| !s.is_time())
        .filter_map(|s| {
            let selection = assignment.enabled(&s.header)?;
            let points = time
                .values
                .iter()
                .zip(&s.values)
                .map(|(&x, &y)| RenderPoint { x, y })
                .collect();
            Some(RenderSeries {
                label: s.header.clone(),
                axis_id: selection.axis_id.clone(),
                points,
            })
        })
        .collect();

    Ok(RenderDataset { series })
}

// ---------------------------------------------------------------------------
// ChartSpec – declarative description of the chart around the dataset
// ---------------------------------------------------------------------------

/// Label of the shared x axis.
pub const X_AXIS_LABEL: &str = "seconds";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScaleKind {
    Linear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleSpec {
    pub id: String,
    pub label: String,
    pub kind: ScaleKind,
}

/// How the renderer should behave.  Zoom, pan and hit-testing act along x
/// only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionHints {
    pub nearest_along_x: bool,
    /// Above this many points per series the renderer min-max decimates.
    pub decimation_threshold: usize,
    pub animate: bool,
    pub span_gaps: bool,
}

impl Default for InteractionHints {
    fn default() -> Self {
        Self {
            nearest_along_x: true,
            decimation_threshold: 2000,
            animate: false,
            span_gaps: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub x_axis: ScaleSpec,
    pub y_axes: Vec<ScaleSpec>,
    pub interaction: InteractionHints,
}

impl ChartSpec {
    pub fn new(groups: &[AxisGroup], interaction: InteractionHints) -> Self {
        Self {
            x_axis: ScaleSpec {
                id: "x".to_string(),
                label: X_AXIS_LABEL.to_string(),
                kind: ScaleKind::Linear,
            },
            y_axes: groups
                .iter()
                .map(|g| ScaleSpec {
                    id: g.id.clone(),
                    label: g.label.clone(),
                    kind: ScaleKind::Linear,
                })
                .collect(),
            interaction,
        }
    }

    pub fn axis_count(&self) -> usize {
        self.y_axes.len()
    }
}

/// Dataset and chart description for one draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub spec: ChartSpec,
    pub dataset: RenderDataset,
}

/// Group axes and build the dataset in one step.
pub fn build_chart(
    series: &[Series<f64>],
    assignment: &AxisAssignment,
    interaction: InteractionHints,
) -> Result<Chart, DatasetError> {
    let dataset = build_dataset(series, assignment)?;
    let groups = axis_groups(assignment, series);
    Ok(Chart {
        spec: ChartSpec::new(&groups, interaction),
        dataset,
    })
}
