use crate::config::{Thresholds, MIN_GROUP_SIZE};
use crate::fitting::FittedLine;
use crate::geometry::{Point, Vector};
use crate::intersection::intersect;
use log::debug;

/// Where a group of lines converges, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VanishingPoint {
    Estimated {
        centroid: Point,
        /// Mean distance of the pairwise intersections from `centroid`.
        convergence_error: f64,
    },
    Unavailable,
}

impl VanishingPoint {
    pub fn centroid(&self) -> Option<Point> {
        match self {
            Self::Estimated { centroid, .. } => Some(*centroid),
            Self::Unavailable => None,
        }
    }

    pub fn convergence_error(&self) -> Option<f64> {
        match self {
            Self::Estimated {
                convergence_error, ..
            } => Some(*convergence_error),
            Self::Unavailable => None,
        }
    }
}

/// Every crossing between two distinct members of `members`, parallel pairs
/// left out.
pub fn pairwise_intersections(
    lines: &[FittedLine],
    members: &[usize],
    thresholds: &Thresholds,
) -> Vec<Point> {
    members
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| members[i + 1..].iter().map(move |&b| (a, b)))
        .filter_map(|(a, b)| intersect(&lines[a], &lines[b], thresholds))
        .collect()
}

/// Estimates the vanishing point of the lines at `members` as the centroid of
/// all their pairwise intersections.
pub fn estimate(lines: &[FittedLine], members: &[usize], thresholds: &Thresholds) -> VanishingPoint {
    if members.len() < MIN_GROUP_SIZE {
        return VanishingPoint::Unavailable;
    }

    let intersections = pairwise_intersections(lines, members, thresholds);
    if intersections.is_empty() {
        debug!("No usable intersections among lines {:?}", members);
        return VanishingPoint::Unavailable;
    }

    let n = intersections.len() as f64;
    let centroid: Point = (intersections
        .iter()
        .fold(Vector::new(0.0, 0.0), |sum, p| sum + Vector::from(*p))
        / n)
        .into();
    let convergence_error = intersections
        .iter()
        .map(|p| p.distance(&centroid))
        .sum::<f64>()
        / n;

    debug!(
        "Lines {:?}: {} intersections, centroid {}, convergence error {:.3}",
        members,
        intersections.len(),
        centroid,
        convergence_error
    );

    VanishingPoint::Estimated {
        centroid,
        convergence_error,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fitting::LineKind;

    /// The line through `through` and `p`.
    fn toward(p: Point, through: Point) -> FittedLine {
        let slope = (through.y - p.y) / (through.x - p.x);
        FittedLine {
            kind: LineKind::Oblique {
                slope,
                intercept: p.y - slope * p.x,
            },
            angle_degrees: slope.atan().to_degrees(),
            rmse: 0.0,
            straightness_score: 100.0,
        }
    }

    fn oblique(slope: f64, intercept: f64) -> FittedLine {
        FittedLine {
            kind: LineKind::Oblique { slope, intercept },
            angle_degrees: slope.atan().to_degrees(),
            rmse: 0.0,
            straightness_score: 100.0,
        }
    }

    fn thresholds() -> Thresholds {
        Thresholds::default()
    }

    #[test]
    fn test_exact_convergence_has_zero_error() {
        let vp = Point::new(-400.0, 100.0);
        let lines = vec![
            toward(vp, Point::new(200.0, 400.0)),
            toward(vp, Point::new(200.0, 300.0)),
            toward(vp, Point::new(200.0, 160.0)),
        ];
        match estimate(&lines, &[0, 1, 2], &thresholds()) {
            VanishingPoint::Estimated {
                centroid,
                convergence_error,
            } => {
                assert!(centroid.distance(&vp) < 1e-6);
                assert!(convergence_error < 1e-6);
            }
            VanishingPoint::Unavailable => panic!("expected an estimate"),
        }
    }

    #[test]
    fn test_uses_every_pair() {
        // Lines y = 0, y = x, y = 10 - x cross at (0,0), (10,0) and (5,5).
        let lines = vec![oblique(0.0, 0.0), oblique(1.0, 0.0), oblique(-1.0, 10.0)];
        assert_eq!(3, pairwise_intersections(&lines, &[0, 1, 2], &thresholds()).len());

        let vp = estimate(&lines, &[0, 1, 2], &thresholds());
        let centroid = vp.centroid().unwrap();
        assert!(centroid.distance(&Point::new(5.0, 5.0 / 3.0)) < 1e-9);

        let expected_error = [(0.0, 0.0), (10.0, 0.0), (5.0, 5.0)]
            .iter()
            .map(|&(x, y)| Point::new(x, y).distance(&centroid))
            .sum::<f64>()
            / 3.0;
        assert!((vp.convergence_error().unwrap() - expected_error).abs() < 1e-9);
    }

    #[test]
    fn test_members_subset_only() {
        let lines = vec![oblique(0.0, 0.0), oblique(5.0, 0.0), oblique(1.0, 0.0)];
        assert_eq!(1, pairwise_intersections(&lines, &[0, 2], &thresholds()).len());
    }

    #[test]
    fn test_small_groups_are_unavailable() {
        let lines = vec![oblique(1.0, 0.0)];
        assert_eq!(VanishingPoint::Unavailable, estimate(&lines, &[], &thresholds()));
        assert_eq!(VanishingPoint::Unavailable, estimate(&lines, &[0], &thresholds()));
    }

    #[test]
    fn test_all_parallel_is_unavailable() {
        let lines = vec![oblique(0.3, 0.0), oblique(0.3, 50.0), oblique(0.3005, 90.0)];
        let vp = estimate(&lines, &[0, 1, 2], &thresholds());
        assert_eq!(VanishingPoint::Unavailable, vp);
        assert_eq!(None, vp.convergence_error());
    }

    #[test]
    fn test_parallel_pairs_are_dropped() {
        // Two parallel lines plus one crossing both.
        let lines = vec![oblique(0.5, 0.0), oblique(0.5, 20.0), oblique(-0.5, 100.0)];
        assert_eq!(2, pairwise_intersections(&lines, &[0, 1, 2], &thresholds()).len());
        assert!(estimate(&lines, &[0, 1, 2], &thresholds()).convergence_error().unwrap() > 0.0);
    }
}
