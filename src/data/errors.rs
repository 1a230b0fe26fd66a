use thiserror::Error;

/// Failure to turn file text into columns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },
}

impl LoadError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        LoadError::MalformedInput {
            reason: reason.into(),
        }
    }
}

/// Failure to build the render dataset for one draw.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("no '{header}' column to use as the x axis")]
    MissingTimeAxis { header: &'static str },
}
