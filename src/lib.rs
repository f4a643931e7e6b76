//! Scores hand-drawn two-point perspective cube sketches.
//!
//! Nine freehand strokes go in: three meant to be vertical and three heading
//! toward each of the two vanishing points. Each stroke gets an ideal line
//! and a straightness score; the lines are grouped by angle, each convergent
//! group's vanishing point is estimated from its pairwise intersections, and
//! the spread of those intersections becomes a perspective score. An overlay
//! image shows the fitted lines and vanishing points over the original
//! strokes.
//!
//! ```no_run
//! use cube_sketch::{analyze, AnalysisRequest, Thresholds};
//!
//! let request = AnalysisRequest::from_json_file("sketch.json").unwrap();
//! let result = analyze(&request, &Thresholds::default()).unwrap();
//! println!("perspective score {:.1}", result.perspective_score);
//! ```

pub mod analysis;
pub mod clustering;
pub mod config;
pub mod error;
pub mod fitting;
pub mod geometry;
pub mod imagery;
pub mod inout;
pub mod intersection;
pub mod score;
pub mod synth;
pub mod vanishing;

pub use analysis::{analyze, Analysis, Warning};
pub use config::{MissingVanishingPoint, Thresholds};
pub use error::{AnalysisError, Error};
pub use inout::{AnalysisRequest, AnalysisResult};
