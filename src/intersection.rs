use crate::config::Thresholds;
use crate::fitting::{FittedLine, LineKind};
use crate::geometry::Point;

/// Where two ideal lines cross, or `None` when they are parallel (both
/// vertical, or slopes within `parallel_slope_tolerance`) or either one is
/// degenerate.
pub fn intersect(a: &FittedLine, b: &FittedLine, thresholds: &Thresholds) -> Option<Point> {
    match (a.kind, b.kind) {
        (LineKind::Degenerate, _) | (_, LineKind::Degenerate) => None,
        (LineKind::Vertical { .. }, LineKind::Vertical { .. }) => None,
        (LineKind::Vertical { x }, LineKind::Oblique { slope, intercept })
        | (LineKind::Oblique { slope, intercept }, LineKind::Vertical { x }) => {
            Some(Point::new(x, slope * x + intercept))
        }
        (
            LineKind::Oblique {
                slope: m1,
                intercept: b1,
            },
            LineKind::Oblique {
                slope: m2,
                intercept: b2,
            },
        ) => {
            if (m1 - m2).abs() < thresholds.parallel_slope_tolerance {
                return None;
            }
            let x = (b2 - b1) / (m1 - m2);
            Some(Point::new(x, m1 * x + b1))
        }
    }
}
