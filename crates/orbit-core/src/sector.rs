use crate::geometry::{
    self, Point, Rect, annulus_sector_outline, annulus_sector_strip, normalize_angle,
    polar_angle, polar_offset,
};
use crate::render::{Color, DrawContext, Topology};
use std::f64::consts::TAU;

/// Angular wedge and radial band of one item, as produced by the layout engine.
///
/// `angle_from` is normalized into [0, 2π); `angle_to` is always greater and may
/// exceed 2π when the wedge wraps past "up".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorGeometry {
    angle_from: f64,
    angle_to: f64,
    inner_radius: f64,
    outer_radius: f64,
}

impl SectorGeometry {
    /// Builds a wedge between two boundary angles given in either order.
    pub fn new(a: f64, b: f64, inner_radius: f64, outer_radius: f64) -> Self {
        let sweep = (b - a).abs().min(TAU);
        let angle_from = normalize_angle(a.min(b));
        Self {
            angle_from,
            angle_to: angle_from + sweep,
            inner_radius,
            outer_radius,
        }
    }

    pub fn angle_from(&self) -> f64 {
        self.angle_from
    }

    pub fn angle_to(&self) -> f64 {
        self.angle_to
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn sweep(&self) -> f64 {
        self.angle_to - self.angle_from
    }

    pub fn is_full_circle(&self) -> bool {
        geometry::is_full_circle(self.angle_from, self.angle_to)
    }

    /// Radial band test, `[inner, outer)`.
    pub fn contains_radius(&self, center: Point, p: Point) -> bool {
        let d2 = center.distance_squared(p);
        d2 >= self.inner_radius * self.inner_radius && d2 < self.outer_radius * self.outer_radius
    }

    /// Angular test, `[angle_from, angle_to)`.
    pub fn contains_angle(&self, angle: f64) -> bool {
        if self.is_full_circle() {
            return true;
        }
        normalize_angle(angle - self.angle_from) < self.sweep()
    }

    pub fn contains(&self, center: Point, p: Point) -> bool {
        self.contains_radius(center, p) && self.contains_angle(polar_angle(center, p))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorColors {
    pub background: Color,
    pub background_hover: Color,
    pub border: Color,
    pub separator: Color,
}

impl Default for SectorColors {
    fn default() -> Self {
        Self {
            background: Color::new(0.15, 0.15, 0.15, 0.5),
            background_hover: Color::new(0.4, 0.4, 0.8, 0.9),
            border: Color::new(0.25, 0.25, 0.25, 0.85),
            separator: Color::new(0.25, 0.25, 0.25, 0.85),
        }
    }
}

/// Which parts of a sector get drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorStyle {
    pub background: bool,
    pub border: bool,
    pub separators: bool,
}

impl Default for SectorStyle {
    fn default() -> Self {
        Self {
            background: true,
            border: false,
            separators: true,
        }
    }
}

/// Clickable annulus-sector region. Geometry and ring center are only ever set
/// by the layout engine through [`Sector::assign`].
#[derive(Debug, Clone, Default)]
pub struct Sector {
    geometry: Option<SectorGeometry>,
    ring_center: Option<Point>,
    pub style: SectorStyle,
}

impl Sector {
    pub fn new(style: SectorStyle) -> Self {
        Self {
            geometry: None,
            ring_center: None,
            style,
        }
    }

    pub fn assign(&mut self, ring_center: Point, geometry: SectorGeometry) {
        self.ring_center = Some(ring_center);
        self.geometry = Some(geometry);
    }

    pub fn geometry(&self) -> Option<&SectorGeometry> {
        self.geometry.as_ref()
    }

    pub fn ring_center(&self) -> Option<Point> {
        self.ring_center
    }

    /// Falls back to `bounds` until the sector has been placed on a ring.
    pub fn hit_test(&self, p: Point, bounds: Rect) -> bool {
        match (self.ring_center, &self.geometry) {
            (Some(center), Some(g)) => g.contains(center, p),
            _ => bounds.contains(p),
        }
    }

    pub fn draw<D: DrawContext + ?Sized>(&self, ctx: &mut D, colors: &SectorColors, hovered: bool) {
        let (Some(center), Some(g)) = (self.ring_center, &self.geometry) else {
            return;
        };

        if self.style.background {
            let color = if hovered {
                colors.background_hover
            } else {
                colors.background
            };
            let strip = annulus_sector_strip(
                center,
                g.inner_radius,
                g.outer_radius,
                g.angle_from,
                g.angle_to,
            );
            ctx.draw_primitives(Topology::TriangleStrip, &strip, color);
        }

        if self.style.border {
            let outline = annulus_sector_outline(
                center,
                g.inner_radius,
                g.outer_radius,
                g.angle_from,
                g.angle_to,
            );
            ctx.draw_primitives(Topology::LineStrip, &outline, colors.border);
        }

        if self.style.separators && !g.is_full_circle() {
            for angle in [g.angle_from, g.angle_to] {
                ctx.draw_line(
                    polar_offset(center, g.inner_radius, angle),
                    polar_offset(center, g.outer_radius, angle),
                    colors.separator,
                );
            }
        }
    }
}
