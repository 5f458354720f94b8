//! Angle and annulus math shared by the layout engine and the sector widgets.
//!
//! Angles are measured in radians with 0 pointing up and increasing clockwise on
//! screen, so a point at distance `r` and angle `a` from `c` sits at
//! `(c.x + r * sin a, c.y - r * cos a)`.

use std::f64::consts::TAU;
use std::ops::{Add, Sub};

/// Tolerance used for every "same angle" comparison.
pub const ANGLE_EPSILON: f64 = 1e-6;

/// Smallest angular step used when discretizing an arc.
pub const MIN_SEGMENT_STEP: f64 = TAU / 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned box, used as the fallback hit region of widgets that have not
/// been laid out on a ring yet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x < self.origin.x + self.size.width
            && p.y >= self.origin.y
            && p.y < self.origin.y + self.size.height
    }
}

pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// True when `from` and `to` describe the same direction, i.e. a sweep between
/// them covers the whole circle.
pub fn is_full_circle(from: f64, to: f64) -> bool {
    let d = normalize_angle(to - from);
    d < ANGLE_EPSILON || TAU - d < ANGLE_EPSILON
}

/// Point at `radius` from `center` along `angle`.
pub fn polar_offset(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

/// Angle of `p` as seen from `center`, in [0, 2π).
pub fn polar_angle(center: Point, p: Point) -> f64 {
    let (dx, dy) = (p.x - center.x, center.y - p.y);
    normalize_angle(dx.atan2(dy))
}

/// Number of points per arc needed to draw a sweep from `from` to `to`.
pub fn arc_point_count(from: f64, to: f64) -> usize {
    let sweep = (to - from).abs();
    (sweep / MIN_SEGMENT_STEP).ceil() as usize + 1
}

fn arc_angles(from: f64, to: f64) -> impl Iterator<Item = f64> {
    let count = arc_point_count(from, to);
    let step = (to - from) / (count - 1).max(1) as f64;
    (0..count).map(move |k| from + step * k as f64)
}

/// Filled annulus sector as a triangle strip alternating outer and inner points.
pub fn annulus_sector_strip(
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    from: f64,
    to: f64,
) -> Vec<Point> {
    arc_angles(from, to)
        .flat_map(|a| {
            [
                polar_offset(center, outer_radius, a),
                polar_offset(center, inner_radius, a),
            ]
        })
        .collect()
}

/// Closed outline of an annulus sector as a line strip: outer arc forward,
/// inner arc backward, then back to the first point.
pub fn annulus_sector_outline(
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    from: f64,
    to: f64,
) -> Vec<Point> {
    let angles: Vec<f64> = arc_angles(from, to).collect();
    let mut points: Vec<Point> = angles
        .iter()
        .map(|&a| polar_offset(center, outer_radius, a))
        .collect();
    points.extend(
        angles
            .iter()
            .rev()
            .map(|&a| polar_offset(center, inner_radius, a)),
    );
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_normalize_angle() {
        assert!(close(normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2));
        assert!(close(normalize_angle(TAU + 1.0), 1.0));
        assert_eq!(normalize_angle(TAU), 0.0);
        assert_eq!(normalize_angle(-1e-18), 0.0);
    }

    #[test]
    fn test_is_full_circle() {
        assert!(is_full_circle(0.0, TAU));
        assert!(is_full_circle(1.0, 1.0));
        assert!(is_full_circle(0.0, -TAU));
        assert!(!is_full_circle(0.0, PI));
    }

    #[test]
    fn test_polar_round_trip_uses_screen_convention() {
        let c = Point::new(10.0, 10.0);
        let up = polar_offset(c, 5.0, 0.0);
        assert!(close(up.x, 10.0) && close(up.y, 5.0));

        let right = polar_offset(c, 5.0, FRAC_PI_2);
        assert!(close(right.x, 15.0) && close(right.y, 10.0));
        assert!(close(polar_angle(c, right), FRAC_PI_2));

        let left = Point::new(5.0, 10.0);
        assert!(close(polar_angle(c, left), 3.0 * FRAC_PI_2));
    }

    #[test]
    fn test_arc_point_count() {
        assert_eq!(arc_point_count(0.0, TAU), 33);
        assert_eq!(arc_point_count(0.0, MIN_SEGMENT_STEP * 1.5), 3);
        assert_eq!(arc_point_count(1.0, 1.0), 1);
    }

    #[test]
    fn test_outline_is_closed_and_walks_both_arcs() {
        let c = Point::default();
        let outline = annulus_sector_outline(c, 10.0, 20.0, 0.0, FRAC_PI_2);
        let per_arc = arc_point_count(0.0, FRAC_PI_2);
        assert_eq!(outline.len(), per_arc * 2 + 1);
        assert_eq!(outline.first(), outline.last());
        assert!(close(outline[per_arc - 1].x, 20.0));
        assert!(close(outline[per_arc].x, 10.0));
    }

    #[test]
    fn test_strip_alternates_radii() {
        let c = Point::default();
        let strip = annulus_sector_strip(c, 10.0, 20.0, 0.0, PI);
        assert_eq!(strip.len(), arc_point_count(0.0, PI) * 2);
        for pair in strip.chunks(2) {
            assert!(close(pair[0].distance_squared(c), 400.0));
            assert!(close(pair[1].distance_squared(c), 100.0));
        }
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
    }
}
