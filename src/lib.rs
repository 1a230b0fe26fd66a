//! Rusty Logview - viewer for semicolon-separated ECU time-series logs.
//!
//! The library holds everything that does not need a window:
//!
//! - [`data`] - row scanning, column parsing, decoding, axis grouping and
//!   render dataset building
//! - [`pipeline`] - the controller that owns the loaded log, the axis
//!   assignment and the current chart
//! - [`config`] - viewer settings
//!
//! The `rusty-logview` binary wraps this in an egui shell.

pub mod config;
pub mod data;
pub mod pipeline;

pub use data::axes::{AxisAssignment, AxisGroup};
pub use data::dataset::{build_dataset, Chart, ChartSpec, RenderDataset};
pub use data::errors::{DatasetError, LoadError};
pub use data::loader::parse;
pub use data::model::{selectable_headers, Series, TIME_HEADER};
pub use pipeline::PipelineController;
