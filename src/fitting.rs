use crate::config::Thresholds;
use crate::geometry::Point;
use crate::score;
use serde::Serialize;

/// The shape of an ideal line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind {
    /// `y = slope * x + intercept`
    Oblique { slope: f64, intercept: f64 },
    /// `x = x`
    Vertical { x: f64 },
    /// Fitted from fewer than two points, or from coordinates too large to
    /// sum; carries no direction.
    Degenerate,
}

/// The least-squares ideal line for one stroke, with its fit quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FittedLine {
    pub kind: LineKind,
    /// In `(-90, 90]`; exactly 90 for vertical lines.
    pub angle_degrees: f64,
    pub rmse: f64,
    pub straightness_score: f64,
}

impl FittedLine {
    pub fn degenerate() -> Self {
        Self {
            kind: LineKind::Degenerate,
            angle_degrees: 0.0,
            rmse: 0.0,
            straightness_score: 0.0,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.kind == LineKind::Degenerate
    }

    /// `None` for vertical and degenerate lines.
    pub fn slope(&self) -> Option<f64> {
        match self.kind {
            LineKind::Oblique { slope, .. } => Some(slope),
            _ => None,
        }
    }

    /// The y-intercept, or the x-position of a vertical line.
    pub fn intercept(&self) -> f64 {
        match self.kind {
            LineKind::Oblique { intercept, .. } => intercept,
            LineKind::Vertical { x } => x,
            LineKind::Degenerate => 0.0,
        }
    }

    /// `y` at `x`, or `None` for lines that are not functions of `x`.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match self.kind {
            LineKind::Oblique { slope, intercept } => Some(slope * x + intercept),
            _ => None,
        }
    }
}

fn rms<I: Iterator<Item = f64>>(residuals: I, n: f64) -> f64 {
    (residuals.map(|r| r * r).sum::<f64>() / n).sqrt()
}

/// Fits an ideal line to `stroke` by ordinary least squares. Strokes whose x
/// barely varies are fitted as vertical lines at their mean x, with the
/// residuals measured horizontally.
pub fn fit_line(stroke: &[Point], thresholds: &Thresholds) -> FittedLine {
    if stroke.len() < 2 {
        return FittedLine::degenerate();
    }
    let n = stroke.len() as f64;

    let mean_x = stroke.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = stroke.iter().map(|p| p.y).sum::<f64>() / n;

    let sum_xx: f64 = stroke.iter().map(|p| (p.x - mean_x) * (p.x - mean_x)).sum();
    if !sum_xx.is_finite() {
        return FittedLine::degenerate();
    }
    let variance_x = sum_xx / n;

    if variance_x < thresholds.vertical_variance {
        let rmse = rms(stroke.iter().map(|p| p.x - mean_x), n);
        return FittedLine {
            kind: LineKind::Vertical { x: mean_x },
            angle_degrees: 90.0,
            rmse,
            straightness_score: score::straightness(rmse, thresholds.rmse_sensitivity),
        };
    }

    let sum_xy: f64 = stroke
        .iter()
        .map(|p| (p.x - mean_x) * (p.y - mean_y))
        .sum();
    let slope = sum_xy / sum_xx;
    let intercept = mean_y - slope * mean_x;

    let rmse = rms(stroke.iter().map(|p| p.y - (slope * p.x + intercept)), n);
    if !(slope.is_finite() && intercept.is_finite() && rmse.is_finite()) {
        return FittedLine::degenerate();
    }

    FittedLine {
        kind: LineKind::Oblique { slope, intercept },
        angle_degrees: slope.atan().to_degrees(),
        rmse,
        straightness_score: score::straightness(rmse, thresholds.rmse_sensitivity),
    }
}
