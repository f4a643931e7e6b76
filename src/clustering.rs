use crate::config::Thresholds;
use crate::fitting::FittedLine;
use serde::Serialize;

/// The three line families of a two-point perspective cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Group {
    Vertical,
    /// Positive slope on a y-down canvas: heads toward the left vanishing point.
    LeftConverging,
    /// Negative slope on a y-down canvas: heads toward the right vanishing point.
    RightConverging,
}

/// Indices into the fitted lines, partitioned by [`Group`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Groups {
    pub vertical: Vec<usize>,
    pub left: Vec<usize>,
    pub right: Vec<usize>,
}

impl Groups {
    pub fn members(&self, group: Group) -> &[usize] {
        match group {
            Group::Vertical => &self.vertical,
            Group::LeftConverging => &self.left,
            Group::RightConverging => &self.right,
        }
    }
}

pub fn classify(angle_degrees: f64, thresholds: &Thresholds) -> Group {
    let abs_angle = angle_degrees.abs();
    if abs_angle > thresholds.vertical_band_min && abs_angle < thresholds.vertical_band_max {
        Group::Vertical
    } else if angle_degrees < 0.0 {
        Group::RightConverging
    } else {
        Group::LeftConverging
    }
}

pub fn cluster(lines: &[FittedLine], thresholds: &Thresholds) -> Groups {
    lines
        .iter()
        .enumerate()
        .fold(Groups::default(), |mut groups, (i, line)| {
            match classify(line.angle_degrees, thresholds) {
                Group::Vertical => groups.vertical.push(i),
                Group::LeftConverging => groups.left.push(i),
                Group::RightConverging => groups.right.push(i),
            }
            groups
        })
}
