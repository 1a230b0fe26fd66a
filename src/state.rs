use std::path::Path;

use anyhow::Result;
use rusty_logview::config::ViewerConfig;
use rusty_logview::data::export::{export_chart_json, export_series_csv};
use rusty_logview::data::loader::load_file;
use rusty_logview::data::model::Series;
use rusty_logview::PipelineController;

use crate::color::SeriesColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.  Widgets only read from and
/// write through this; the pipeline's assignment is the source of truth.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded log, axis assignment and current chart.
    pub pipeline: PipelineController,

    /// Colour per selectable series of the loaded log.
    pub colors: SeriesColors,

    /// Axis ids typed in by the user on top of the configured ones.
    pub extra_axes: Vec<String>,

    /// Text buffer of the "new axis" field.
    pub new_axis: String,

    /// Name of the loaded file.
    pub file_name: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Plot zoom/pan should be reset on the next frame (new log loaded).
    reset_view: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            pipeline: PipelineController::new(config.interaction_hints()),
            config,
            colors: SeriesColors::default(),
            extra_axes: Vec::new(),
            new_axis: String::new(),
            file_name: None,
            status_message: None,
            reset_view: false,
        }
    }

    /// Load a log from disk; errors end up in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(series) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_series(series, name);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded log and reset the selection.
    pub fn set_series(&mut self, series: Vec<Series<f64>>, name: String) {
        self.pipeline.replace_series(series);
        let headers = self.pipeline.selectable_headers();
        log::info!("Loaded '{name}' with {} selectable series", headers.len());
        self.colors = SeriesColors::new(&headers);
        self.file_name = Some(name);
        self.status_message = None;
        self.reset_view = true;
    }

    /// Whether the plot view should be reset, clearing the request.
    pub fn take_view_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset_view)
    }

    /// Axis ids to offer: configured ones, then user-added ones.
    pub fn axis_choices(&self) -> Vec<String> {
        let mut choices = self.config.axis_ids.clone();
        for id in &self.extra_axes {
            if !choices.contains(id) {
                choices.push(id.clone());
            }
        }
        choices
    }

    /// Add the axis typed into the "new axis" field.
    pub fn add_axis(&mut self) {
        let id = self.new_axis.trim().to_string();
        self.new_axis.clear();
        if id.is_empty() || self.axis_choices().contains(&id) {
            return;
        }
        self.extra_axes.push(id);
    }

    /// Current axis of `header`, or the configured default.
    pub fn axis_of(&self, header: &str) -> String {
        self.pipeline
            .assignment()
            .get(header)
            .map(|sel| sel.axis_id.clone())
            .unwrap_or_else(|| self.config.default_axis.clone())
    }

    pub fn is_enabled(&self, header: &str) -> bool {
        self.pipeline.assignment().is_enabled(header)
    }

    /// Record a selection change and redraw if configured to.
    pub fn set_assignment(&mut self, header: &str, enabled: bool, axis_id: &str) {
        self.pipeline.set_assignment(header, enabled, axis_id);
        if self.config.auto_redraw {
            self.redraw();
        }
    }

    /// Enable or disable every selectable series, keeping their axes.
    pub fn set_all(&mut self, enabled: bool) {
        for header in self.pipeline.selectable_headers() {
            let axis = self.axis_of(&header);
            self.pipeline.set_assignment(&header, enabled, &axis);
        }
        if self.config.auto_redraw {
            self.redraw();
        }
    }

    /// Rebuild the chart; a failure is shown in the status line.
    pub fn redraw(&mut self) {
        if !self.pipeline.is_loaded() {
            return;
        }
        match self.pipeline.draw() {
            Ok(_) => self.status_message = None,
            Err(e) => {
                log::error!("Draw failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn export_csv(&mut self, path: &Path) {
        let result = export_series_csv(self.pipeline.series(), path);
        self.report(result);
    }

    pub fn export_chart(&mut self, path: &Path) {
        let result = match self.pipeline.chart() {
            Some(chart) => export_chart_json(chart, path),
            None => Err(anyhow::anyhow!("nothing drawn yet")),
        };
        self.report(result);
    }

    fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            log::error!("Export failed: {e:#}");
            self.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusty_logview::parse;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        let series = parse("time(ms);A;B\r\n0;1;2\r\n1000;3;4\r\n").unwrap();
        state.set_series(series, "test.csv".to_string());
        state
    }

    #[test]
    fn test_auto_redraw_on_assignment() {
        let mut state = loaded();
        state.set_assignment("A", true, "y2");
        let chart = state.pipeline.chart().unwrap();
        assert_eq!(chart.dataset.series.len(), 1);
        assert_eq!(chart.spec.y_axes[0].id, "y2");
    }

    #[test]
    fn test_set_all_keeps_axes() {
        let mut state = loaded();
        state.set_assignment("B", false, "y3");
        state.set_all(true);
        assert!(state.is_enabled("A"));
        assert_eq!(state.axis_of("A"), "y1");
        assert_eq!(state.axis_of("B"), "y3");
        assert_eq!(state.pipeline.chart().unwrap().spec.axis_count(), 2);
    }

    #[test]
    fn test_missing_time_column_reported() {
        let mut state = AppState::default();
        state.set_series(parse("A\r\n1\r\n").unwrap(), "no-time.csv".to_string());
        state.set_assignment("A", true, "y1");
        assert!(state.pipeline.chart().is_none());
        assert!(state.status_message.as_deref().unwrap().contains("time(ms)"));
    }

    #[test]
    fn test_view_reset_only_on_new_log() {
        let mut state = loaded();
        assert!(state.take_view_reset());
        assert!(!state.take_view_reset());

        state.set_assignment("A", true, "y1");
        state.set_assignment("B", true, "y2");
        state.set_all(false);
        assert!(!state.take_view_reset());

        let series = parse("time(ms);C\r\n0;1\r\n").unwrap();
        state.set_series(series, "other.csv".to_string());
        assert!(state.take_view_reset());
    }

    #[test]
    fn test_add_axis_ignores_blank_and_duplicates() {
        let mut state = AppState::default();
        state.new_axis = " boost ".to_string();
        state.add_axis();
        state.new_axis = "y1".to_string();
        state.add_axis();
        state.new_axis = "   ".to_string();
        state.add_axis();
        assert_eq!(state.axis_choices(), vec!["y1", "y2", "y3", "y4", "boost"]);
    }

    #[test]
    fn test_colours_follow_loaded_series() {
        let state = loaded();
        assert_ne!(state.colors.color_for("A"), eframe::egui::Color32::GRAY);
        assert_ne!(state.colors.color_for("B"), state.colors.color_for("A"));
        assert_eq!(state.colors.color_for("time(ms)"), eframe::egui::Color32::GRAY);
    }
}
