use serde::{Deserialize, Serialize};

/// A position on the drawing canvas. `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (Vector::from(*self) - Vector::from(*other)).len()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "({:>9.2}, {:>9.2})", self.x, self.y)
    }
}

/// Points in drawing order, as captured from the pen.
pub type Stroke = Vec<Point>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn len(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn basis(&self) -> Self {
        let len = self.len();
        if len > 0.0 {
            *self / len
        } else {
            Self::new(0.0, 0.0)
        }
    }
}

impl std::ops::Add for Vector {
    type Output = Self;
    fn add(self, rhs: Self) -> <Self as std::ops::Add>::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vector {
    type Output = Self;
    fn sub(self, rhs: Self) -> <Self as std::ops::Add>::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, num: f64) -> <Self as std::ops::Mul<f64>>::Output {
        Self::new(self.x * num, self.y * num)
    }
}

impl std::ops::Div<f64> for Vector {
    type Output = Self;
    fn div(self, num: f64) -> <Self as std::ops::Div<f64>>::Output {
        Self::new(self.x / num, self.y / num)
    }
}

impl std::convert::From<Point> for Vector {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

impl std::convert::From<Vector> for Point {
    fn from(vector: Vector) -> Self {
        Self::new(vector.x, vector.y)
    }
}

/// A finite straight segment between two canvas positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment(pub Vector, pub Vector);

impl Segment {
    pub fn iter(&self, step_size: f64) -> SegmentIter {
        let step = (self.1 - self.0).basis() * step_size;
        let current = self.0;
        let distance = (self.1 - self.0).len();

        SegmentIter {
            step,
            current,
            distance,
            step_size,
        }
    }

    /// Clips the segment to the rectangle `[0, width] x [0, height]`
    /// (Liang-Barsky). Returns `None` when nothing of it is visible.
    pub fn clipped(&self, width: f64, height: f64) -> Option<Self> {
        let d = self.1 - self.0;
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        let edges = [
            (-d.x, self.0.x),
            (d.x, width - self.0.x),
            (-d.y, self.0.y),
            (d.y, height - self.0.y),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
        Some(Self(self.0 + d * t0, self.0 + d * t1))
    }
}

impl<T: Into<Vector>> std::convert::From<(T, T)> for Segment {
    fn from((a, b): (T, T)) -> Self {
        Self(a.into(), b.into())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentIter {
    step: Vector,
    current: Vector,
    distance: f64,
    step_size: f64,
}

impl Iterator for SegmentIter {
    type Item = Vector;
    fn next(&mut self) -> std::option::Option<<Self as std::iter::Iterator>::Item> {
        if self.distance >= 0.0 {
            let current = self.current;
            self.current = self.current + self.step;
            self.distance -= self.step_size;
            Some(current)
        } else {
            None
        }
    }
}

/// Axis-aligned extent of a stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        Some(points.iter().fold(
            Self {
                min_x: first.x,
                max_x: first.x,
                min_y: first.y,
                max_y: first.y,
            },
            |b, p| Self {
                min_x: b.min_x.min(p.x),
                max_x: b.max_x.max(p.x),
                min_y: b.min_y.min(p.y),
                max_y: b.max_y.max(p.y),
            },
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn v(a: f64, b: f64) -> Vector {
        Vector::new(a, b)
    }

    fn origin() -> Vector {
        v(0.0, 0.0)
    }

    fn a() -> Vector {
        v(3.0, 4.0)
    }

    fn b() -> Vector {
        v(6.0, 0.0)
    }

    #[test]
    fn test_segment_iter() {
        let segment = Segment(origin(), a());
        let iter = segment.iter(1.0);
        assert_eq!(6, iter.count());
    }

    #[test]
    fn test_segment_iter_detail() {
        let segment = Segment(origin(), v(0.0, 10.0));
        let vectors: Vec<Vector> = segment.iter(10.0).collect();
        assert_eq!(vec![v(0.0, 0.0), v(0.0, 10.0)], vectors);

        let vectors: Vec<Vector> = segment.iter(2.0).collect();
        assert_eq!(
            vec![
                v(0.0, 0.0),
                v(0.0, 2.0),
                v(0.0, 4.0),
                v(0.0, 6.0),
                v(0.0, 8.0),
                v(0.0, 10.0)
            ],
            vectors
        );
    }

    #[test]
    fn test_zero_length_segment_yields_its_point_once() {
        let vectors: Vec<Vector> = Segment(a(), a()).iter(0.5).collect();
        assert_eq!(vec![a()], vectors);
    }

    #[test]
    fn test_vector_len() {
        assert_eq!(5.0, a().len());
        assert_eq!(6.0, b().len());
    }

    #[test]
    fn test_vector_basis() {
        assert_eq!(v(1.0, 0.0), b().basis());
        assert_eq!(origin(), origin().basis());
    }

    #[test]
    fn test_vector_arithmetic() {
        assert_eq!(v(9.0, 4.0), a() + b());
        assert_eq!(v(-3.0, 4.0), a() - b());
        assert_eq!(v(6.0, 8.0), a() * 2.0);
        assert_eq!(v(2.0, 0.0), b() / 3.0);
    }

    #[test]
    fn test_point_distance() {
        assert_eq!(5.0, Point::new(1.0, 1.0).distance(&Point::new(4.0, 5.0)));
    }

    #[test]
    fn test_clip_inside_is_unchanged() {
        let segment = Segment(v(1.0, 1.0), v(9.0, 9.0));
        assert_eq!(Some(segment), segment.clipped(10.0, 10.0));
    }

    #[test]
    fn test_clip_far_endpoint() {
        let clipped = Segment(v(5.0, 5.0), v(1005.0, 5.0))
            .clipped(10.0, 10.0)
            .unwrap();
        assert_eq!(v(5.0, 5.0), clipped.0);
        assert_eq!(v(10.0, 5.0), clipped.1);
    }

    #[test]
    fn test_clip_outside_is_none() {
        assert_eq!(None, Segment(v(-5.0, -5.0), v(-1.0, 20.0)).clipped(10.0, 10.0));
        assert_eq!(None, Segment(v(20.0, 3.0), v(30.0, 3.0)).clipped(10.0, 10.0));
    }

    #[test]
    fn test_bounds() {
        let stroke = vec![
            Point::new(3.0, 9.0),
            Point::new(-1.0, 4.0),
            Point::new(7.0, 2.0),
        ];
        let bounds = Bounds::of(&stroke).unwrap();
        assert_eq!(-1.0, bounds.min_x);
        assert_eq!(7.0, bounds.max_x);
        assert_eq!(2.0, bounds.min_y);
        assert_eq!(9.0, bounds.max_y);
        assert_eq!(None, Bounds::of(&[]));
    }
}
