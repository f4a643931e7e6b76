//! Error types for cube_sketch

use thiserror::Error;

/// Rejections raised by the analysis itself. Degenerate but well-formed
/// sketches are not errors; they surface as warnings on the result.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Expected exactly {expected} strokes but got {found}")]
    StrokeCount { expected: usize, found: usize },

    #[error("Stroke {index} has no points")]
    EmptyStroke { index: usize },

    #[error("Stroke {stroke} has a non-finite coordinate at point {point}")]
    NonFiniteCoordinate { stroke: usize, point: usize },

    #[error("Stroke {stroke} point {point} lies farther than {limit} from the origin on an axis")]
    CoordinateOutOfRange { stroke: usize, point: usize, limit: f64 },

    #[error("Invalid canvas size {width} x {height}: sides must be finite and positive")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("Canvas size {width} x {height} exceeds the configured limit of {limit} per side")]
    CanvasTooLarge { width: f64, height: f64, limit: f64 },

    #[error("Unable to encode visualization: {0}")]
    Encode(#[from] image::ImageError),
}

/// Error type for the command line driver
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("{failed} of {total} sketches could not be analyzed")]
    Failed { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
