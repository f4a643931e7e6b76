use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How many strokes make up one cube sketch.
pub const STROKE_COUNT: usize = 9;

/// Fewest lines a group needs before a vanishing point is estimated.
pub const MIN_GROUP_SIZE: usize = 2;

/// What the perspective score does with a side whose vanishing point could
/// not be estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingVanishingPoint {
    /// Leave the side out of the average. No sides at all scores 0.
    #[default]
    Exclude,
    /// Count the side as off by a full canvas diagonal.
    Penalize,
    /// Count the side as converging perfectly.
    AssumePerfect,
}

impl core::str::FromStr for MissingVanishingPoint {
    type Err = String;
    fn from_str(string: &str) -> std::result::Result<Self, Self::Err> {
        match string {
            "exclude" => Ok(MissingVanishingPoint::Exclude),
            "penalize" => Ok(MissingVanishingPoint::Penalize),
            "assume-perfect" => Ok(MissingVanishingPoint::AssumePerfect),
            _ => Err(format!("Invalid missing vanishing point policy: \"{}\"", string)),
        }
    }
}

/// Tuning knobs for the analysis. The defaults are calibrated for canvases a
/// few hundred pixels across.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Below this x-variance (canvas units squared) a stroke is fitted as vertical.
    pub vertical_variance: f64,
    /// Lines whose absolute angle lies strictly inside this band are vertical.
    pub vertical_band_min: f64,
    pub vertical_band_max: f64,
    /// Slopes closer than this are treated as parallel.
    pub parallel_slope_tolerance: f64,
    /// RMSE at which the straightness score has decayed to 100/e.
    pub rmse_sensitivity: f64,
    /// Multiplier on the diagonal-normalised convergence error.
    pub perspective_sensitivity: f64,
    pub missing_vanishing_point: MissingVanishingPoint,
    /// Largest accepted canvas width or height, in pixels.
    pub max_canvas_side: f64,
    /// Largest accepted absolute stroke coordinate. Keeps the least-squares
    /// sums finite.
    pub max_coordinate: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            vertical_variance: 1.0,
            vertical_band_min: 70.0,
            vertical_band_max: 110.0,
            parallel_slope_tolerance: 0.001,
            rmse_sensitivity: 5.0,
            perspective_sensitivity: 10.0,
            missing_vanishing_point: MissingVanishingPoint::default(),
            max_canvas_side: 8192.0,
            max_coordinate: 1.0e9,
        }
    }
}

impl Thresholds {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
