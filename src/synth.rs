use crate::geometry::{Point, Stroke};
use crate::inout::AnalysisRequest;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLES_PER_STROKE: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct SynthOptions {
    pub seed: u64,
    /// Largest offset, in canvas units, added to each coordinate.
    pub jitter: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            jitter: 2.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

/// `x` and the y at `x` on the line from `from` toward `vp`.
fn along(from: Point, vp: Point, x: f64) -> Point {
    let slope = (vp.y - from.y) / (vp.x - from.x);
    Point::new(x, from.y + slope * (x - from.x))
}

fn sample(a: Point, b: Point, rng: &mut StdRng, jitter: f64) -> Stroke {
    (0..SAMPLES_PER_STROKE)
        .map(|i| {
            let t = i as f64 / (SAMPLES_PER_STROKE - 1) as f64;
            let mut p = Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
            if jitter > 0.0 {
                p.x += rng.gen_range(-jitter..=jitter);
                p.y += rng.gen_range(-jitter..=jitter);
            }
            p
        })
        .collect()
}

/// A two-point perspective cube seen from slightly above, drawn as nine
/// strokes in the usual order: three verticals, three lines toward the left
/// vanishing point, three toward the right one. The same options always
/// give the same sketch.
pub fn cube(options: &SynthOptions) -> AnalysisRequest {
    let (w, h) = (options.width, options.height);
    let mut rng = StdRng::seed_from_u64(options.seed);

    let horizon = 0.35 * h;
    let left_vp = Point::new(-0.3 * w, horizon);
    let right_vp = Point::new(1.3 * w, horizon);

    let front_top = Point::new(0.5 * w, 0.45 * h);
    let front_bottom = Point::new(0.5 * w, 0.8 * h);
    let (left_x, right_x) = (0.3 * w, 0.7 * w);
    let left_top = along(front_top, left_vp, left_x);
    let left_bottom = along(front_bottom, left_vp, left_x);
    let right_top = along(front_top, right_vp, right_x);
    let right_bottom = along(front_bottom, right_vp, right_x);
    let back_span = 0.2 * w;

    let edges = [
        (left_top, left_bottom),
        (front_top, front_bottom),
        (right_top, right_bottom),
        (left_top, front_top),
        (left_bottom, front_bottom),
        (along(right_top, left_vp, right_x - back_span), right_top),
        (front_top, right_top),
        (front_bottom, right_bottom),
        (left_top, along(left_top, right_vp, left_x + back_span)),
    ];

    AnalysisRequest {
        strokes: edges
            .iter()
            .map(|&(a, b)| sample(a, b, &mut rng, options.jitter))
            .collect(),
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::analysis;
    use crate::config::Thresholds;

    fn with_jitter(seed: u64, jitter: f64) -> SynthOptions {
        SynthOptions {
            seed,
            jitter,
            ..SynthOptions::default()
        }
    }

    #[test]
    fn test_clean_cube_scores_perfectly() {
        let request = cube(&with_jitter(0, 0.0));
        assert_eq!(9, request.strokes.len());
        let analysis = analysis::run(&request, &Thresholds::default()).unwrap();
        assert_eq!(vec![0, 1, 2], analysis.groups.vertical);
        assert_eq!(vec![3, 4, 5], analysis.groups.left);
        assert_eq!(vec![6, 7, 8], analysis.groups.right);
        assert!((analysis.average_line_score - 100.0).abs() < 1e-6);
        assert!((analysis.perspective_score - 100.0).abs() < 1e-6);
        assert!(analysis
            .left
            .centroid()
            .unwrap()
            .distance(&Point::new(-240.0, 210.0))
            < 1e-6);
    }

    #[test]
    fn test_jitter_lowers_line_scores() {
        let thresholds = Thresholds::default();
        let steady = analysis::run(&cube(&with_jitter(7, 0.5)), &thresholds).unwrap();
        let shaky = analysis::run(&cube(&with_jitter(7, 8.0)), &thresholds).unwrap();
        assert!(shaky.average_line_score < steady.average_line_score);
        assert!(steady.average_line_score < 100.0);
    }

    #[test]
    fn test_same_seed_same_sketch() {
        assert_eq!(cube(&with_jitter(42, 3.0)), cube(&with_jitter(42, 3.0)));
        assert_ne!(cube(&with_jitter(42, 3.0)), cube(&with_jitter(43, 3.0)));
    }
}
