use crate::config::{MissingVanishingPoint, Thresholds};
use crate::vanishing::VanishingPoint;

const MAX_SCORE: f64 = 100.0;

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, MAX_SCORE)
}

/// Maps a fit's RMSE to 0..=100. A perfect line scores 100, and the score
/// falls to 100/e once the RMSE reaches `sensitivity`.
pub fn straightness(rmse: f64, sensitivity: f64) -> f64 {
    clamp_score(MAX_SCORE * (-rmse / sensitivity).exp())
}

/// Maps a mean convergence error to 0..=100, normalised by the canvas
/// diagonal so the same drawing scores the same at any resolution.
pub fn perspective_from_error(mean_error: f64, width: f64, height: f64, sensitivity: f64) -> f64 {
    let diagonal = (width * width + height * height).sqrt();
    let normalized_error = mean_error / diagonal;
    clamp_score(MAX_SCORE * (-normalized_error * sensitivity).exp())
}

/// Aggregate perspective score over both convergent groups, with unavailable
/// sides handled per `thresholds.missing_vanishing_point`.
pub fn perspective(
    left: &VanishingPoint,
    right: &VanishingPoint,
    width: f64,
    height: f64,
    thresholds: &Thresholds,
) -> f64 {
    let diagonal = (width * width + height * height).sqrt();
    let errors: Vec<f64> = [left, right]
        .iter()
        .filter_map(|vp| match (vp.convergence_error(), thresholds.missing_vanishing_point) {
            (Some(error), _) => Some(error),
            (None, MissingVanishingPoint::Exclude) => None,
            (None, MissingVanishingPoint::Penalize) => Some(diagonal),
            (None, MissingVanishingPoint::AssumePerfect) => Some(0.0),
        })
        .collect();

    if errors.is_empty() {
        return 0.0;
    }
    let mean_error = errors.iter().sum::<f64>() / errors.len() as f64;
    perspective_from_error(mean_error, width, height, thresholds.perspective_sensitivity)
}
