use crate::config::{Config, LayerConfig, SETUP_COMMAND};
use crate::gui::menu::{LABEL_HEIGHT, LABEL_WIDTH, REFERENCE_HEIGHT};
use crate::sys::launcher::ExecCommand;
use orbit_core::{Item, Layer, LayerName, MenuEvent, Point, RadialMenu, Size};
use std::collections::HashMap;

/// The menu engine plus what the app does when an item is picked.
///
/// Pointer positions come in as window pixels; the engine works in menu units,
/// which are pixels divided by `scale_factor`.
pub struct MenuModel {
    pub menu: RadialMenu,
    pub scale_factor: f64,
    actions: HashMap<(LayerName, usize), ExecCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    Nothing,
    Redraw,
    Hide,
    Launch(ExecCommand),
    OpenConfig,
}

impl MenuModel {
    pub fn from_config(config: &Config) -> Self {
        let mut model = Self {
            menu: RadialMenu::new(Point::default()),
            scale_factor: 1.0,
            actions: HashMap::new(),
        };
        model.load(config);
        model
    }

    fn build_layer(cfg: &LayerConfig) -> Layer {
        let items = cfg.items.iter().map(|item| {
            let built = Item::new(item.label.clone())
                .with_size(Size::new(LABEL_WIDTH, LABEL_HEIGHT))
                .with_target(item.target.clone().unwrap_or_default());
            if item.hidden { built.hidden() } else { built }
        });
        Layer::new(cfg.name.clone(), cfg.layout()).with_items(items)
    }

    /// Replaces all layers, keeping the current position and scale.
    pub fn load(&mut self, config: &Config) {
        let center = self.menu.center();
        let was_open = self.menu.is_open();

        self.menu = RadialMenu::new(center).with_layers(config.layers.iter().map(Self::build_layer));
        self.actions = config
            .layers
            .iter()
            .flat_map(|layer| {
                layer.items.iter().enumerate().filter_map(|(i, item)| {
                    item.exec
                        .clone()
                        .map(|exec| ((LayerName::new(layer.name.clone()), i), exec))
                })
            })
            .collect();

        if !was_open {
            self.menu.close();
        }
    }

    /// Opens the menu around `cursor` (window pixels).
    pub fn refresh(&mut self, cursor: Point, monitor_height: f64) {
        self.scale_factor = (monitor_height / REFERENCE_HEIGHT).max(0.1);
        let center = self.to_menu_space(cursor);
        self.menu.open_at(center);
    }

    pub fn to_menu_space(&self, p: Point) -> Point {
        p.scale(1.0 / self.scale_factor)
    }

    pub fn update_cursor(&mut self, p: Point) -> bool {
        let p = self.to_menu_space(p);
        self.menu.update_cursor(p)
    }

    pub fn click(&mut self, p: Point) -> ClickAction {
        let p = self.to_menu_space(p);
        match self.menu.click(p) {
            MenuEvent::Navigated(_) | MenuEvent::Back(_) => ClickAction::Redraw,
            MenuEvent::Closed => ClickAction::Hide,
            MenuEvent::Selected { layer, index } => {
                let action = match self.actions.get(&(layer, index)) {
                    Some(exec) if exec.as_str() == SETUP_COMMAND => ClickAction::OpenConfig,
                    Some(exec) => ClickAction::Launch(exec.clone()),
                    None => ClickAction::Hide,
                };
                self.menu.close();
                action
            }
            MenuEvent::Ignored => ClickAction::Nothing,
        }
    }

    /// Same as clicking the center control.
    pub fn back(&mut self) -> ClickAction {
        if !self.menu.is_open() {
            return ClickAction::Nothing;
        }
        self.menu.go_back();
        if self.menu.is_open() {
            ClickAction::Redraw
        } else {
            ClickAction::Hide
        }
    }

    pub fn hide(&mut self) {
        self.menu.close();
    }
}
