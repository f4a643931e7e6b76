use crate::clustering::{self, Group, Groups};
use crate::config::{Thresholds, MIN_GROUP_SIZE, STROKE_COUNT};
use crate::error::AnalysisError;
use crate::fitting::{self, FittedLine};
use crate::imagery::{self, Overlay};
use crate::inout::{AnalysisRequest, AnalysisResult};
use crate::score;
use crate::vanishing::{self, VanishingPoint};
use log::{debug, warn};
use serde::Serialize;

/// A sketch problem that lowers the scores without stopping the analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// No line could be fitted to the stroke: too few points, or coordinates
    /// too large to sum.
    DegenerateStroke { index: usize, points: usize },
    /// Too few lines were classified into a convergent group.
    SparseGroup { group: Group, members: usize },
    /// No pair of lines in the group meets, because they are all parallel.
    NoIntersections { group: Group },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            Self::DegenerateStroke { index, points } => {
                write!(f, "no line could be fitted to stroke {} ({} point(s))", index, points)
            }
            Self::SparseGroup { group, members } => {
                write!(f, "{:?} group has {} line(s), too few to converge", group, members)
            }
            Self::NoIntersections { group } => {
                write!(f, "{:?} group has only parallel lines", group)
            }
        }
    }
}

/// The full outcome of one analysis, before the overlay is encoded.
pub struct Analysis {
    pub lines: Vec<FittedLine>,
    pub groups: Groups,
    pub left: VanishingPoint,
    pub right: VanishingPoint,
    pub average_line_score: f64,
    pub perspective_score: f64,
    pub warnings: Vec<Warning>,
    pub overlay: Overlay,
}

impl Analysis {
    pub fn line_scores(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.straightness_score).collect()
    }

    pub fn to_result(&self) -> Result<AnalysisResult, AnalysisError> {
        Ok(AnalysisResult {
            image_data: self.overlay.data_uri()?,
            line_scores: self.line_scores(),
            average_line_score: self.average_line_score,
            left_vp: self.left.centroid(),
            right_vp: self.right.centroid(),
            convergence_error_l: self.left.convergence_error().unwrap_or(0.0),
            convergence_error_r: self.right.convergence_error().unwrap_or(0.0),
            perspective_score: self.perspective_score,
            warnings: self.warnings.clone(),
        })
    }
}

/// Checks the request's shape and returns the canvas size in whole pixels.
pub fn validate(
    request: &AnalysisRequest,
    thresholds: &Thresholds,
) -> Result<(u32, u32), AnalysisError> {
    if request.strokes.len() != STROKE_COUNT {
        return Err(AnalysisError::StrokeCount {
            expected: STROKE_COUNT,
            found: request.strokes.len(),
        });
    }
    for (index, stroke) in request.strokes.iter().enumerate() {
        if stroke.is_empty() {
            return Err(AnalysisError::EmptyStroke { index });
        }
        if let Some(point) = stroke.iter().position(|p| !p.is_finite()) {
            return Err(AnalysisError::NonFiniteCoordinate {
                stroke: index,
                point,
            });
        }
        let limit = thresholds.max_coordinate;
        if let Some(point) = stroke
            .iter()
            .position(|p| p.x.abs() > limit || p.y.abs() > limit)
        {
            return Err(AnalysisError::CoordinateOutOfRange {
                stroke: index,
                point,
                limit,
            });
        }
    }

    let (width, height) = (request.width, request.height);
    let positive = |side: f64| side.is_finite() && side > 0.0;
    if !positive(width) || !positive(height) {
        return Err(AnalysisError::InvalidCanvas { width, height });
    }
    let limit = thresholds.max_canvas_side;
    if width > limit || height > limit {
        return Err(AnalysisError::CanvasTooLarge {
            width,
            height,
            limit,
        });
    }
    // A sub-pixel side still gets a one pixel overlay.
    Ok(((width as u32).max(1), (height as u32).max(1)))
}

fn convergent(
    lines: &[FittedLine],
    members: &[usize],
    group: Group,
    thresholds: &Thresholds,
    warnings: &mut Vec<Warning>,
) -> VanishingPoint {
    let usable = members
        .iter()
        .filter(|&&i| !lines[i].is_degenerate())
        .count();
    if usable < MIN_GROUP_SIZE {
        warnings.push(Warning::SparseGroup {
            group,
            members: usable,
        });
        return VanishingPoint::Unavailable;
    }
    let vp = vanishing::estimate(lines, members, thresholds);
    if vp == VanishingPoint::Unavailable {
        warnings.push(Warning::NoIntersections { group });
    }
    vp
}

/// Fits, clusters, estimates both vanishing points, scores and draws one
/// sketch. Deterministic in its inputs.
pub fn run(request: &AnalysisRequest, thresholds: &Thresholds) -> Result<Analysis, AnalysisError> {
    let (width, height) = validate(request, thresholds)?;
    let mut warnings = Vec::new();

    let lines: Vec<FittedLine> = request
        .strokes
        .iter()
        .map(|stroke| fitting::fit_line(stroke, thresholds))
        .collect();
    lines
        .iter()
        .zip(&request.strokes)
        .enumerate()
        .filter(|(_, (line, _))| line.is_degenerate())
        .for_each(|(index, (_, stroke))| {
            warnings.push(Warning::DegenerateStroke {
                index,
                points: stroke.len(),
            })
        });

    let groups = clustering::cluster(&lines, thresholds);
    debug!(
        "Groups: vertical {:?}, left {:?}, right {:?}",
        groups.vertical, groups.left, groups.right
    );

    let left = convergent(
        &lines,
        &groups.left,
        Group::LeftConverging,
        thresholds,
        &mut warnings,
    );
    let right = convergent(
        &lines,
        &groups.right,
        Group::RightConverging,
        thresholds,
        &mut warnings,
    );

    let perspective_score =
        score::perspective(&left, &right, request.width, request.height, thresholds);
    let average_line_score =
        lines.iter().map(|l| l.straightness_score).sum::<f64>() / lines.len() as f64;

    warnings.iter().for_each(|w| warn!("{}", w));

    let overlay = imagery::render(
        &request.strokes,
        &lines,
        &groups,
        &left,
        &right,
        width,
        height,
    );

    Ok(Analysis {
        lines,
        groups,
        left,
        right,
        average_line_score,
        perspective_score,
        warnings,
        overlay,
    })
}

/// Runs the analysis and encodes the overlay into the result record.
pub fn analyze(
    request: &AnalysisRequest,
    thresholds: &Thresholds,
) -> Result<AnalysisResult, AnalysisError> {
    run(request, thresholds)?.to_result()
}
