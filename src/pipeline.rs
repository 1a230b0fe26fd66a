use crate::data::axes::AxisAssignment;
use crate::data::dataset::{build_chart, Chart, InteractionHints};
use crate::data::errors::{DatasetError, LoadError};
use crate::data::loader::parse;
use crate::data::model::{selectable_headers, Series};

// ---------------------------------------------------------------------------
// Pipeline controller
// ---------------------------------------------------------------------------

/// Owns the loaded series, the user's axis assignment and the current chart.
///
/// `load` replaces the series (and resets the assignment); `draw` releases
/// the previous chart and builds its replacement from the current state.
#[derive(Debug, Default)]
pub struct PipelineController {
    series: Vec<Series<f64>>,
    assignment: AxisAssignment,
    chart: Option<Chart>,
    hints: InteractionHints,
    /// Incremented on every successful draw.
    generation: u64,
}

impl PipelineController {
    pub fn new(hints: InteractionHints) -> Self {
        Self {
            hints,
            ..Self::default()
        }
    }

    /// Parse `text` and make it the loaded log.
    ///
    /// On failure the previously loaded state is left untouched.
    pub fn load(&mut self, text: &str) -> Result<&[Series<f64>], LoadError> {
        let series = parse(text)?;
        self.replace_series(series);
        Ok(&self.series)
    }

    /// Make already decoded series the loaded log.
    pub fn replace_series(&mut self, series: Vec<Series<f64>>) {
        self.release_chart();
        self.assignment.clear();
        self.series = series;
        log::debug!("Pipeline now holds {} series", self.series.len());
    }

    pub fn is_loaded(&self) -> bool {
        !self.series.is_empty()
    }

    pub fn series(&self) -> &[Series<f64>] {
        &self.series
    }

    /// Headers the user may plot (all but the time column).
    pub fn selectable_headers(&self) -> Vec<String> {
        selectable_headers(&self.series)
    }

    pub fn assignment(&self) -> &AxisAssignment {
        &self.assignment
    }

    pub fn set_assignment(&mut self, header: &str, enabled: bool, axis_id: &str) {
        log::debug!("Assign '{header}': enabled={enabled} axis={axis_id}");
        self.assignment.set(header, enabled, axis_id);
    }

    /// Rebuild the chart from the current series and assignment.
    ///
    /// The previous chart is released first, so a failed draw leaves none.
    pub fn draw(&mut self) -> Result<&Chart, DatasetError> {
        self.release_chart();
        let chart = build_chart(&self.series, &self.assignment, self.hints.clone())?;
        log::info!(
            "Drew {} series on {} axes ({} points)",
            chart.dataset.series.len(),
            chart.spec.axis_count(),
            chart.dataset.point_count()
        );
        self.generation += 1;
        Ok(self.chart.insert(chart))
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }

    /// Drop the current chart, if any.
    pub fn release_chart(&mut self) {
        if self.chart.take().is_some() {
            log::debug!("Released chart #{}", self.generation);
        }
    }

    /// Number of charts drawn so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "time(ms);A;B\r\n0;1;2\r\n1000;3;4\r\n";

    #[test]
    fn test_load_then_draw() {
        let mut pipeline = PipelineController::default();
        pipeline.load(LOG).unwrap();
        assert_eq!(pipeline.selectable_headers(), vec!["A", "B"]);

        pipeline.set_assignment("A", true, "y1");
        pipeline.set_assignment("B", false, "y1");
        let chart = pipeline.draw().unwrap();
        assert_eq!(chart.dataset.series.len(), 1);
        assert_eq!(chart.dataset.series[0].label, "A");
        assert_eq!(pipeline.generation(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_log() {
        let mut pipeline = PipelineController::default();
        pipeline.load(LOG).unwrap();
        assert!(pipeline.load("").is_err());
        assert_eq!(pipeline.series().len(), 3);
    }

    #[test]
    fn test_new_load_resets_assignment_and_chart() {
        let mut pipeline = PipelineController::default();
        pipeline.load(LOG).unwrap();
        pipeline.set_assignment("A", true, "y1");
        pipeline.draw().unwrap();

        pipeline.load("time(ms);C\r\n0;9\r\n").unwrap();
        assert!(pipeline.chart().is_none());
        assert_eq!(pipeline.assignment().enabled_count(), 0);
        assert_eq!(pipeline.selectable_headers(), vec!["C"]);
    }

    #[test]
    fn test_failed_draw_releases_previous_chart() {
        let mut pipeline = PipelineController::default();
        pipeline.load(LOG).unwrap();
        pipeline.draw().unwrap();
        assert!(pipeline.chart().is_some());

        pipeline.load("A;B\r\n1;2\r\n").unwrap();
        assert!(matches!(
            pipeline.draw(),
            Err(DatasetError::MissingTimeAxis { .. })
        ));
        assert!(pipeline.chart().is_none());
        assert_eq!(pipeline.generation(), 1);
    }
}
