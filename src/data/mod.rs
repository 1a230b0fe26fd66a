/// Data layer: log parsing, decoding, axis grouping and dataset building.
///
/// Architecture:
/// ```text
///   raw text (CRLF rows, ';' fields)
///        │
///        ▼
///   ┌──────────┐
///   │  lines    │  offset-based CRLF row scanning
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  rows → Vec<RawSeries>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  decode per ColumnKind, unique headers, sort
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │   axes    │ ──▶  │ dataset   │  enabled series → RenderDataset + ChartSpec
///   └──────────┘      └──────────┘
/// ```

pub mod axes;
pub mod dataset;
pub mod errors;
pub mod export;
pub mod lines;
pub mod loader;
pub mod model;
pub mod transform;
