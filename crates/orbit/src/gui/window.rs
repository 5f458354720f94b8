use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, Layer, LayerShell};
use orbit_core::Point;

pub fn get_cursor_position(window: &gtk::ApplicationWindow) -> Option<Point> {
    gdk::Display::default()
        .and_then(|d| d.default_seat())
        .and_then(|s| s.pointer())
        .zip(window.surface())
        .and_then(|(p, s)| s.device_position(&p))
        .map(|(x, y, _)| Point::new(x, y))
}

/// Middle of the window, for when the pointer can't be queried.
pub fn window_center(window: &gtk::ApplicationWindow) -> Point {
    Point::new(window.width() as f64 / 2.0, window.height() as f64 / 2.0)
}

pub fn init_layer_shell(window: &gtk::ApplicationWindow) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("orbit"));
    window.set_exclusive_zone(-1);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::OnDemand);
}

/// Height of the monitor the window is on.
pub fn monitor_height(window: &gtk::ApplicationWindow) -> Option<f64> {
    let display = gdk::Display::default()?;
    let surface = window.surface()?;
    display
        .monitor_at_surface(&surface)
        .map(|m| m.geometry().height() as f64)
}
