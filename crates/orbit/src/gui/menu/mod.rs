pub mod model;
pub mod view;

pub use model::{ClickAction, MenuModel};
pub use view::draw;

pub const REFERENCE_HEIGHT: f64 = 1440.0;
pub const LABEL_WIDTH: f64 = 96.0; // label box, in menu units
pub const LABEL_HEIGHT: f64 = 24.0;
pub const LABEL_FONT_SIZE: f64 = 13.0;
pub const CENTER_GLYPH_SIZE: f64 = 22.0;
