//! Geometry and navigation engine for layered radial menus.

pub mod center;
pub mod geometry;
pub mod layout;
pub mod macros;
pub mod menu;
pub mod render;
pub mod sector;

pub use center::{CenterControl, CenterStyle};
pub use geometry::{Point, Rect, Size};
pub use layout::{Arrangement, Direction, RadialChild, RadialLayout};
pub use menu::{Hover, Item, Layer, LayerName, MenuEvent, MenuState, RadialMenu};
pub use render::{Color, DrawCommand, DrawContext, DrawList, Scaled, Topology};
pub use sector::{Sector, SectorColors, SectorGeometry, SectorStyle};
