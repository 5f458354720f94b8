use crate::geometry::{Point, annulus_sector_strip};
use crate::render::{Color, DrawContext, Topology};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use strum::Display as StrumDisplay;

/// What the center control currently does when clicked.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    StrumDisplay,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CenterStyle {
    #[default]
    None,
    Back,
    Close,
}

/// The button in the middle of the ring. Its hit region is everything that is
/// not the ring: the hole inside `inner_radius` plus all space from
/// `outer_radius` outwards.
#[derive(Debug, Clone, Default)]
pub struct CenterControl {
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    pub style: CenterStyle,
}

impl CenterControl {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            ..Self::default()
        }
    }

    /// Matches the ring of a layer whose items sit at `layer_radius`.
    pub fn fit_to_ring(&mut self, center: Point, layer_radius: f64) {
        self.center = center;
        self.inner_radius = layer_radius / 2.0;
        self.outer_radius = layer_radius * 2.0;
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn hit_test(&self, p: Point) -> bool {
        let d2 = self.center.distance_squared(p);
        d2 < self.inner_radius * self.inner_radius || d2 >= self.outer_radius * self.outer_radius
    }

    /// Draws the visible part of the control: a disc filling the ring's hole.
    pub fn draw<D: DrawContext + ?Sized>(&self, ctx: &mut D, color: Color) {
        if self.inner_radius <= 0.0 {
            return;
        }
        let disc = annulus_sector_strip(self.center, 0.0, self.inner_radius, 0.0, TAU);
        ctx.draw_primitives(Topology::TriangleStrip, &disc, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polar_offset;
    use crate::render::DrawList;

    #[test]
    fn test_hit_region_is_ring_complement() {
        let mut control = CenterControl::new(Point::default());
        control.fit_to_ring(Point::new(100.0, 100.0), 120.0);
        assert_eq!(control.inner_radius(), 60.0);
        assert_eq!(control.outer_radius(), 240.0);

        let c = control.center();
        assert!(control.hit_test(c));
        assert!(control.hit_test(polar_offset(c, 59.0, 1.0)));
        assert!(!control.hit_test(polar_offset(c, 60.5, 1.0)));
        assert!(!control.hit_test(polar_offset(c, 200.0, 4.0)));
        assert!(control.hit_test(polar_offset(c, 241.0, 4.0)));
    }

    #[test]
    fn test_style_names() {
        assert_eq!(CenterStyle::Back.to_string(), "back");
        assert_eq!(CenterStyle::Close.to_string(), "close");
        assert_eq!(CenterStyle::default(), CenterStyle::None);
    }

    #[test]
    fn test_unfitted_control_draws_nothing() {
        let mut list = DrawList::new();
        CenterControl::default().draw(&mut list, Color::new(0.0, 0.0, 0.0, 1.0));
        assert!(list.commands.is_empty());
    }
}
