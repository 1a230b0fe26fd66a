use std::collections::HashMap;

use eframe::egui::Ui;
use egui_plot::{Corner, Legend, Line, Plot, PlotPoint, PlotPoints};
use rusty_logview::data::dataset::{Chart, RenderPoint, RenderSeries};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Per-axis scaling
// ---------------------------------------------------------------------------

/// Finite value range of one axis group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub span: f64,
}

impl AxisRange {
    /// Map a value into 0..=1 within this range.
    pub fn to_unit(&self, y: f64) -> f64 {
        if self.span == 0.0 {
            0.5
        } else {
            (y - self.min) / self.span
        }
    }

    pub fn from_unit(&self, u: f64) -> f64 {
        self.min + u * self.span
    }
}

/// Range of every axis id over the finite values plotted on it.
pub fn axis_ranges(series: &[RenderSeries]) -> HashMap<String, AxisRange> {
    let mut bounds: HashMap<&str, (f64, f64)> = HashMap::new();
    for s in series {
        for p in s.points.iter().filter(|p| p.y.is_finite()) {
            let entry = bounds
                .entry(s.axis_id.as_str())
                .or_insert((f64::INFINITY, f64::NEG_INFINITY));
            entry.0 = entry.0.min(p.y);
            entry.1 = entry.1.max(p.y);
        }
    }
    bounds
        .into_iter()
        .map(|(id, (min, max))| (id.to_string(), AxisRange { min, span: max - min }))
        .collect()
}

// ---------------------------------------------------------------------------
// Decimation
// ---------------------------------------------------------------------------

/// Drop NaN samples so the line spans the gap, then min-max decimate when
/// more than `threshold` points remain.
///
/// Points are cut into `threshold / 2` buckets along x; each bucket keeps its
/// lowest and highest sample in x order.
pub fn decimate_min_max(points: &[RenderPoint], threshold: usize) -> Vec<[f64; 2]> {
    let finite: Vec<[f64; 2]> = points
        .iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .map(|p| [p.x, p.y])
        .collect();

    let buckets = threshold / 2;
    if buckets == 0 || finite.len() <= threshold {
        return finite;
    }

    let bucket_len = finite.len().div_ceil(buckets);
    let mut out = Vec::with_capacity(buckets * 2);
    for chunk in finite.chunks(bucket_len) {
        let (mut lo, mut hi) = (0, 0);
        for (i, p) in chunk.iter().enumerate() {
            if p[1] < chunk[lo][1] {
                lo = i;
            }
            if p[1] > chunk[hi][1] {
                hi = i;
            }
        }
        out.push(chunk[lo.min(hi)]);
        if lo != hi {
            out.push(chunk[lo.max(hi)]);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart in the central panel.
///
/// The plot keeps one id so zoom/pan survive redraws; the view is only reset
/// after a new log is loaded.
pub fn chart_plot(ui: &mut Ui, state: &mut AppState) {
    let reset = state.pipeline.chart().is_some() && state.take_view_reset();
    let state = &*state;
    let Some(chart) = state.pipeline.chart() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let hint = if state.pipeline.is_loaded() {
                "Enable series on the left to plot them"
            } else {
                "Open a log to plot it  (File → Open…)"
            };
            ui.heading(hint);
        });
        return;
    };

    // With several axes each group is scaled into 0..=1 so they share the
    // plot area; hover labels map back to real values.
    let shared = chart.spec.axis_count() > 1;
    let ranges = axis_ranges(&chart.dataset.series);
    let hover_ranges = ranges.clone();
    let axis_of: HashMap<String, String> = chart
        .dataset
        .series
        .iter()
        .map(|s| (s.label.clone(), s.axis_id.clone()))
        .collect();

    let y_label = y_axis_label(chart);

    let mut plot = Plot::new("chart");
    if reset {
        plot = plot.reset();
    }

    plot.legend(Legend::default().position(Corner::RightTop))
        .x_axis_label(chart.spec.x_axis.label.clone())
        .y_axis_label(y_label)
        .show_axes([true, !shared])
        .allow_boxed_zoom(false)
        .allow_drag([true, false])
        .allow_scroll([true, false])
        .allow_zoom([true, false])
        .label_formatter(move |name: &str, value: &PlotPoint| {
            if name.is_empty() {
                return format!("t = {:.3} s", value.x);
            }
            let axis = axis_of.get(name).map(String::as_str).unwrap_or("");
            let y = match hover_ranges.get(axis) {
                Some(range) if shared => range.from_unit(value.y),
                _ => value.y,
            };
            format!("{name} [{axis}]\nt = {:.3} s\n{y:.3}", value.x)
        })
        .show(ui, |plot_ui| {
            let threshold = chart.spec.interaction.decimation_threshold;
            for s in &chart.dataset.series {
                let mut points = decimate_min_max(&s.points, threshold);
                if let Some(range) = ranges.get(&s.axis_id).filter(|_| shared) {
                    for p in &mut points {
                        p[1] = range.to_unit(p[1]);
                    }
                }

                let line = Line::new(PlotPoints::from(points))
                    .name(&s.label)
                    .color(state.colors.color_for(&s.label))
                    .width(state.config.line_width);

                plot_ui.line(line);
            }
        });
}

fn y_axis_label(chart: &Chart) -> String {
    match chart.spec.y_axes.as_slice() {
        [] => String::new(),
        [only] => only.label.clone(),
        axes => axes
            .iter()
            .map(|a| a.label.as_str())
            .collect::<Vec<_>>()
            .join(" / "),
    }
}
