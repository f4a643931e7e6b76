use crate::clustering::Groups;
use crate::fitting::{FittedLine, LineKind};
use crate::geometry::{Bounds, Point, Segment, Stroke, Vector};
use crate::vanishing::VanishingPoint;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageResult, Rgba, RgbaImage};
use std::collections::HashSet;

const STROKE_RGBA: Rgba<u8> = Rgba([200, 200, 200, 255]);
const FITTED_RGBA: Rgba<u8> = Rgba([0, 200, 0, 255]);
const RAY_RGBA: Rgba<u8> = Rgba([255, 0, 0, 120]);
const MARKER_RGBA: Rgba<u8> = Rgba([255, 0, 0, 255]);

const STROKE_WIDTH: f64 = 2.0;
const FITTED_WIDTH: f64 = 2.0;
const RAY_WIDTH: f64 = 1.0;
const MARKER_RADIUS: f64 = 8.0;

// Distance between samples when walking a segment.
const STEP_SIZE: f64 = 0.5;

/// The set of pixels one shape covers. Collecting first and compositing once
/// keeps translucent shapes from stacking on themselves.
#[derive(Debug, Default)]
pub struct PixShape(HashSet<(u32, u32)>);

impl PixShape {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.0.contains(&(x, y))
    }

    /// Pixels whose centres lie within `radius` of `center`, kept to the canvas.
    fn stamp(&mut self, center: Vector, radius: f64, width: u32, height: u32) {
        let x0 = (center.x - radius).floor().max(0.0) as i64;
        let y0 = (center.y - radius).floor().max(0.0) as i64;
        let x1 = (center.x + radius).floor().min(width as f64 - 1.0) as i64;
        let y1 = (center.y + radius).floor().min(height as f64 - 1.0) as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let pixel_center = Vector::new(x as f64 + 0.5, y as f64 + 0.5);
                if (pixel_center - center).len() <= radius {
                    self.0.insert((x as u32, y as u32));
                }
            }
        }
    }

    fn add_segment(&mut self, segment: Segment, line_width: f64, width: u32, height: u32) {
        if let Some(visible) = segment.clipped(width as f64, height as f64) {
            let radius = f64::max(line_width / 2.0, 0.5);
            visible
                .iter(STEP_SIZE)
                .chain(std::iter::once(visible.1))
                .for_each(|v| self.stamp(v, radius, width, height));
        }
    }

    pub fn segment<T: Into<Segment>>(segment: T, line_width: f64, width: u32, height: u32) -> Self {
        let mut shape = Self::default();
        shape.add_segment(segment.into(), line_width, width, height);
        shape
    }

    pub fn polyline(points: &[Point], line_width: f64, width: u32, height: u32) -> Self {
        let mut shape = Self::default();
        points
            .windows(2)
            .for_each(|w| shape.add_segment((w[0], w[1]).into(), line_width, width, height));
        shape
    }

    pub fn disc(center: Point, radius: f64, width: u32, height: u32) -> Self {
        let mut shape = Self::default();
        shape.stamp(center.into(), radius, width, height);
        shape
    }
}

/// An RGBA canvas the size of the drawing, transparent until painted.
pub struct Overlay(RgbaImage);

impl Overlay {
    pub fn new(width: u32, height: u32) -> Self {
        Self(RgbaImage::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }

    /// Composites `rgba` over every pixel of `shape`.
    pub fn fill(&mut self, shape: &PixShape, rgba: Rgba<u8>) -> &mut Self {
        shape.0.iter().for_each(|&(x, y)| {
            let pixel = self.0.get_pixel_mut(x, y);
            *pixel = source_over(rgba, *pixel);
        });
        self
    }

    pub fn png_bytes(&self) -> ImageResult<Vec<u8>> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes).write_image(
            self.0.as_raw(),
            self.width(),
            self.height(),
            ColorType::Rgba8,
        )?;
        Ok(bytes)
    }

    pub fn data_uri(&self) -> ImageResult<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(self.png_bytes()?);
        Ok(format!("data:image/png;base64,{}", encoded))
    }
}

fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let max = u8::MAX as f64;
    let sa = src[3] as f64 / max;
    let da = dst[3] as f64 / max;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        let c = (src[i] as f64 * sa + dst[i] as f64 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, max) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * max).round().clamp(0.0, max) as u8,
    ])
}

/// The ideal line drawn across its own stroke's span.
fn fitted_segment(line: &FittedLine, stroke: &[Point]) -> Option<Segment> {
    let bounds = Bounds::of(stroke)?;
    match line.kind {
        LineKind::Vertical { x } => Some(
            (
                Point::new(x, bounds.min_y),
                Point::new(x, bounds.max_y),
            )
                .into(),
        ),
        LineKind::Oblique { .. } => Some(
            (
                Point::new(bounds.min_x, line.y_at(bounds.min_x)?),
                Point::new(bounds.max_x, line.y_at(bounds.max_x)?),
            )
                .into(),
        ),
        LineKind::Degenerate => None,
    }
}

/// Draws the analysis over a transparent canvas: the strokes as drawn, each
/// stroke's ideal line, and for every estimated vanishing point a ray from
/// each member stroke's first point plus a marker.
pub fn render(
    strokes: &[Stroke],
    lines: &[FittedLine],
    groups: &Groups,
    left: &VanishingPoint,
    right: &VanishingPoint,
    width: u32,
    height: u32,
) -> Overlay {
    let mut overlay = Overlay::new(width, height);

    strokes.iter().for_each(|stroke| {
        overlay.fill(
            &PixShape::polyline(stroke, STROKE_WIDTH, width, height),
            STROKE_RGBA,
        );
    });

    strokes
        .iter()
        .zip(lines)
        .filter_map(|(stroke, line)| fitted_segment(line, stroke))
        .for_each(|segment| {
            overlay.fill(
                &PixShape::segment(segment, FITTED_WIDTH, width, height),
                FITTED_RGBA,
            );
        });

    for (members, vp) in [(&groups.left, left), (&groups.right, right)] {
        if let Some(centroid) = vp.centroid() {
            members
                .iter()
                .filter_map(|&i| strokes[i].first())
                .for_each(|start| {
                    overlay.fill(
                        &PixShape::segment((*start, centroid), RAY_WIDTH, width, height),
                        RAY_RGBA,
                    );
                });
            overlay.fill(
                &PixShape::disc(centroid, MARKER_RADIUS, width, height),
                MARKER_RGBA,
            );
        }
    }

    overlay
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Thresholds;
    use crate::fitting::fit_line;
    use image::GenericImageView;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_source_over() {
        let transparent = Rgba([0, 0, 0, 0]);
        assert_eq!(MARKER_RGBA, source_over(MARKER_RGBA, transparent));
        assert_eq!(RAY_RGBA, source_over(RAY_RGBA, transparent));
        assert_eq!(MARKER_RGBA, source_over(MARKER_RGBA, FITTED_RGBA));
        let mixed = source_over(RAY_RGBA, Rgba([255, 255, 255, 255]));
        assert_eq!(255, mixed[3]);
        assert_eq!(255, mixed[0]);
        assert!(mixed[1] > 100 && mixed[1] < 160);
    }

    #[test]
    fn test_horizontal_segment_pixels() {
        let shape = PixShape::segment((p(2.0, 5.5), p(8.0, 5.5)), 1.0, 20, 20);
        assert!(shape.contains(2, 5));
        assert!(shape.contains(5, 5));
        assert!(shape.contains(8, 5));
        assert!(!shape.contains(5, 7));
        assert!(!shape.contains(12, 5));
    }

    #[test]
    fn test_shapes_stay_on_canvas() {
        let shape = PixShape::segment((p(5.0, 5.0), p(-1.0e6, 5.0)), 2.0, 10, 10);
        assert!(!shape.0.is_empty());
        assert!(shape.0.iter().all(|&(x, y)| x < 10 && y < 10));

        let disc = PixShape::disc(p(0.0, 0.0), 8.0, 10, 10);
        assert!(disc.contains(0, 0));
        assert!(disc.0.iter().all(|&(x, y)| x < 10 && y < 10));

        assert!(PixShape::disc(p(500.0, 500.0), 8.0, 10, 10).0.is_empty());
    }

    #[test]
    fn test_polyline_of_one_point_is_empty() {
        assert!(PixShape::polyline(&[p(3.0, 3.0)], 2.0, 10, 10).0.is_empty());
    }

    #[test]
    fn test_translucent_shape_composites_once() {
        let mut overlay = Overlay::new(10, 10);
        let shape = PixShape::polyline(&[p(1.0, 5.5), p(8.0, 5.5), p(1.0, 5.5)], 1.0, 10, 10);
        overlay.fill(&shape, RAY_RGBA);
        assert_eq!(&RAY_RGBA, overlay.image().get_pixel(4, 5));
    }

    #[test]
    fn test_render_layers() {
        let strokes: Vec<Stroke> = vec![
            vec![p(20.5, 10.0), p(20.5, 60.0)],
            vec![p(10.0, 80.0), p(50.0, 100.0)],
            vec![p(10.0, 90.0), p(50.0, 110.0)],
        ];
        let thresholds = Thresholds::default();
        let lines: Vec<FittedLine> = strokes.iter().map(|s| fit_line(s, &thresholds)).collect();
        let groups = Groups {
            vertical: vec![0],
            left: vec![1, 2],
            right: vec![],
        };
        let vp = VanishingPoint::Estimated {
            centroid: p(100.5, 20.5),
            convergence_error: 0.0,
        };
        let overlay = render(
            &strokes,
            &lines,
            &groups,
            &vp,
            &VanishingPoint::Unavailable,
            120,
            120,
        );

        assert_eq!(120, overlay.width());
        assert_eq!(&FITTED_RGBA, overlay.image().get_pixel(20, 30));
        assert_eq!(&MARKER_RGBA, overlay.image().get_pixel(100, 20));
        assert_eq!(&Rgba([0, 0, 0, 0]), overlay.image().get_pixel(110, 110));
        assert_eq!(&Rgba([0, 0, 0, 0]), overlay.image().get_pixel(5, 5));
    }

    #[test]
    fn test_png_round_trip_keeps_size() {
        let overlay = Overlay::new(32, 24);
        let decoded = image::load_from_memory(&overlay.png_bytes().unwrap()).unwrap();
        assert_eq!(32, decoded.width());
        assert_eq!(24, decoded.height());
        assert!(overlay.data_uri().unwrap().starts_with("data:image/png;base64,"));
    }
}
