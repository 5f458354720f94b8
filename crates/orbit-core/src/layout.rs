//! Even radial placement of a layer's items.
//!
//! Items and the gaps between them are treated as equally wide slots: with `n`
//! items there are `2n` slots, items sit on the odd ones. The placement radius
//! grows with the slot count so dense layers don't collide.

use crate::geometry::{ANGLE_EPSILON, Point, Size, normalize_angle, polar_offset};
use crate::sector::SectorGeometry;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::TAU;
use strum::{Display as StrumDisplay, EnumString};

pub const BASE_RADIUS: f64 = 100.0;
pub const RADIUS_INCREMENT: f64 = 5.0;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[strum(to_string = "clockwise", serialize = "cw")]
    Clockwise,
    #[strum(
        to_string = "anticlockwise",
        serialize = "counterclockwise",
        serialize = "ccw"
    )]
    Anticlockwise,
}

/// Something the layout engine can place on a ring.
pub trait RadialChild {
    fn is_visible(&self) -> bool;

    fn desired_size(&self) -> Size;

    /// Top-left corner of the child in menu coordinates.
    fn place(&mut self, position: Point);

    /// Only sector-aware children care about their wedge.
    fn assign_sector(&mut self, _ring_center: Point, _geometry: SectorGeometry) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialLayout {
    /// Start and end of the placement arc, in radians.
    pub angular_range: (f64, f64),
    pub direction: Direction,
    pub reserve_space_for_hidden: bool,
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self {
            angular_range: (0.0, 0.0),
            direction: Direction::Clockwise,
            reserve_space_for_hidden: false,
        }
    }
}

/// Numbers derived by one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrangement {
    pub element_count: usize,
    pub radius: f64,
    pub arc: f64,
    pub full_circle: bool,
    pub divisor: usize,
    pub step_angle: f64,
}

impl Arrangement {
    pub fn slot_angle(&self, start: f64, slot: usize) -> f64 {
        start + self.step_angle * slot as f64
    }
}

impl RadialLayout {
    pub fn new(angular_range: (f64, f64), direction: Direction) -> Self {
        Self {
            angular_range,
            direction,
            ..Self::default()
        }
    }

    pub fn with_reserved_hidden(mut self, reserve: bool) -> Self {
        self.reserve_space_for_hidden = reserve;
        self
    }

    /// Arc swept from the range start, in (0, 2π]. Equal bounds mean a full circle.
    pub fn arc(&self) -> f64 {
        let (start, end) = self.angular_range;
        let raw = match self.direction {
            Direction::Clockwise => end - start,
            Direction::Anticlockwise => start - end,
        };
        let arc = normalize_angle(raw);
        if arc < ANGLE_EPSILON { TAU } else { arc }
    }

    pub fn arrangement(&self, item_count: usize) -> Arrangement {
        let element_count = item_count * 2;
        let radius = BASE_RADIUS + element_count as f64 * RADIUS_INCREMENT;
        let arc = self.arc();
        let full_circle = (arc - TAU).abs() < ANGLE_EPSILON;
        let divisor = if full_circle {
            element_count
        } else {
            element_count.saturating_sub(1)
        };

        let step_angle = match divisor {
            0 => 0.0,
            d => {
                let step = arc / d as f64;
                match self.direction {
                    Direction::Clockwise => step,
                    Direction::Anticlockwise => -step,
                }
            }
        };

        Arrangement {
            element_count,
            radius,
            arc,
            full_circle,
            divisor,
            step_angle,
        }
    }

    /// Places `children` around `center` and returns the derived numbers.
    pub fn arrange<C: RadialChild>(&self, center: Point, children: &mut [C]) -> Arrangement {
        let item_count = if self.reserve_space_for_hidden {
            children.len()
        } else {
            children.iter().filter(|c| c.is_visible()).count()
        };
        let arrangement = self.arrangement(item_count);
        let start = self.angular_range.0;
        let radius = arrangement.radius;

        let placed = children
            .iter_mut()
            .filter(|c| self.reserve_space_for_hidden || c.is_visible());

        for (i, child) in placed.enumerate() {
            let slot = 2 * i + 1;
            let angle = arrangement.slot_angle(start, slot);
            let anchor = polar_offset(center, radius, angle);
            child.place(anchor - child.desired_size().half());
            child.assign_sector(
                center,
                SectorGeometry::new(
                    arrangement.slot_angle(start, slot - 1),
                    arrangement.slot_angle(start, slot + 1),
                    radius / 2.0,
                    radius * 2.0,
                ),
            );
        }

        log::trace!(
            "arranged {} items: radius {}, step {:.4}",
            item_count,
            radius,
            arrangement.step_angle
        );
        arrangement
    }
}
