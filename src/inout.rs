use crate::analysis::Warning;
use crate::error::Result;
use crate::geometry::{Point, Stroke};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One sketch as submitted: nine strokes on a `width` x `height` canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub strokes: Vec<Stroke>,
    pub width: f64,
    pub height: f64,
}

impl AnalysisRequest {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn write_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Everything reported back for one sketch. Convergence errors are 0 when
/// the matching vanishing point is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "imageData")]
    pub image_data: String,
    #[serde(rename = "lineScores")]
    pub line_scores: Vec<f64>,
    #[serde(rename = "averageLineScore")]
    pub average_line_score: f64,
    #[serde(rename = "leftVP")]
    pub left_vp: Option<Point>,
    #[serde(rename = "rightVP")]
    pub right_vp: Option<Point>,
    #[serde(rename = "convergenceErrorL")]
    pub convergence_error_l: f64,
    #[serde(rename = "convergenceErrorR")]
    pub convergence_error_r: f64,
    #[serde(rename = "perspectiveScore")]
    pub perspective_score: f64,
    pub warnings: Vec<Warning>,
}

impl AnalysisResult {
    pub fn write_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
