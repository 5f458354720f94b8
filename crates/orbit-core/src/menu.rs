use crate::center::{CenterControl, CenterStyle};
use crate::geometry::{Point, Rect, Size};
use crate::layout::{Arrangement, BASE_RADIUS, RadialChild, RadialLayout};
use crate::render::{Color, DrawContext};
use crate::sector::{Sector, SectorColors, SectorGeometry, SectorStyle};
use derive_more::{AsRef, Deref, Display, From, Into};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct LayerName(String);

crate::impl_name_newtype!(LayerName);

#[derive(Debug, Clone)]
pub struct Item {
    pub label: String,
    target: Option<LayerName>,
    visible: bool,
    size: Size,
    position: Point,
    sector: Option<Sector>,
}

impl Item {
    /// A sector-aware button.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
            visible: true,
            size: Size::default(),
            position: Point::default(),
            sector: Some(Sector::default()),
        }
    }

    /// A button that is only placed on the ring and keeps its rectangular hit box.
    pub fn plain(label: impl Into<String>, size: Size) -> Self {
        Self {
            sector: None,
            size,
            ..Self::new(label)
        }
    }

    /// Empty targets mean "no navigation".
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        let target = target.into();
        self.target = (!target.is_empty()).then(|| LayerName::new(target));
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_sector_style(mut self, style: SectorStyle) -> Self {
        if let Some(sector) = &mut self.sector {
            sector.style = style;
        }
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn target(&self) -> Option<&LayerName> {
        self.target.as_ref()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Where the item's content should be centered.
    pub fn anchor(&self) -> Point {
        self.position + self.size.half()
    }

    pub fn sector(&self) -> Option<&Sector> {
        self.sector.as_ref()
    }

    pub fn sector_geometry(&self) -> Option<&SectorGeometry> {
        self.sector.as_ref().and_then(Sector::geometry)
    }

    pub fn hit_test(&self, p: Point) -> bool {
        if !self.visible {
            return false;
        }
        match &self.sector {
            Some(sector) => sector.hit_test(p, self.bounds()),
            None => self.bounds().contains(p),
        }
    }
}

impl RadialChild for Item {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn desired_size(&self) -> Size {
        self.size
    }

    fn place(&mut self, position: Point) {
        self.position = position;
    }

    fn assign_sector(&mut self, ring_center: Point, geometry: SectorGeometry) {
        if let Some(sector) = &mut self.sector {
            sector.assign(ring_center, geometry);
        }
    }
}

/// A named ring of items. Every mutation re-runs the layout.
#[derive(Debug, Clone)]
pub struct Layer {
    name: LayerName,
    layout: RadialLayout,
    items: Vec<Item>,
    visible: bool,
    center: Point,
    arrangement: Arrangement,
}

impl Layer {
    pub fn new(name: impl Into<String>, layout: RadialLayout) -> Self {
        let arrangement = layout.arrangement(0);
        Self {
            name: LayerName::new(name),
            layout,
            items: Vec::new(),
            visible: false,
            center: Point::default(),
            arrangement,
        }
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self.rebuild();
        self
    }

    pub fn name(&self) -> &LayerName {
        &self.name
    }

    pub fn layout(&self) -> &RadialLayout {
        &self.layout
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.arrangement.radius
    }

    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    pub fn push_item(&mut self, item: Item) {
        self.items.push(item);
        self.rebuild();
    }

    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| {
            let item = self.items.remove(index);
            self.rebuild();
            item
        })
    }

    pub fn set_item_visible(&mut self, index: usize, visible: bool) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        if item.visible != visible {
            item.visible = visible;
            self.rebuild();
        }
        true
    }

    pub fn set_layout(&mut self, layout: RadialLayout) {
        self.layout = layout;
        self.rebuild();
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
        self.rebuild();
    }

    /// Recomputes radius and per-item placement from the current item list.
    pub fn rebuild(&mut self) {
        self.arrangement = self.layout.arrange(self.center, &mut self.items);
    }

    pub fn item_at(&self, p: Point) -> Option<usize> {
        self.items.iter().position(|item| item.hit_test(p))
    }

    fn show(&mut self) {
        self.visible = true;
        self.rebuild();
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Open,
    Closed,
}

/// What a click on the menu resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// An item with a target switched the active layer.
    Navigated(LayerName),
    /// The center control stepped back one layer.
    Back(LayerName),
    /// The center control closed the menu.
    Closed,
    /// An item without a target was picked; acting on it is up to the caller.
    Selected { layer: LayerName, index: usize },
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hover {
    #[default]
    Nothing,
    Center,
    Item(usize),
}

pub struct RadialMenu {
    center: Point,
    layers: Vec<Layer>,
    active: Option<usize>,
    history: Vec<usize>,
    center_control: CenterControl,
    state: MenuState,
    hover: Hover,
}

impl RadialMenu {
    pub fn new(center: Point) -> Self {
        let mut center_control = CenterControl::new(center);
        center_control.fit_to_ring(center, BASE_RADIUS);
        Self {
            center,
            layers: Vec::new(),
            active: None,
            history: Vec::new(),
            center_control,
            state: MenuState::Open,
            hover: Hover::Nothing,
        }
    }

    pub fn with_layers(mut self, layers: impl IntoIterator<Item = Layer>) -> Self {
        for layer in layers {
            self.attach_layer(layer);
        }
        self
    }

    /// Adds a layer. The first layer attached while nothing is active becomes
    /// active; the rest start hidden. Names must be unique.
    pub fn attach_layer(&mut self, mut layer: Layer) -> bool {
        if layer.name.is_empty() || self.find_layer(&layer.name).is_some() {
            log::warn!("Rejecting layer with empty or duplicate name '{}'", layer.name);
            return false;
        }

        layer.center = self.center;
        layer.hide();
        layer.rebuild();
        self.layers.push(layer);

        if self.state == MenuState::Open && self.active.is_none() {
            let index = self.layers.len() - 1;
            self.activate(index);
            self.center_control.style = CenterStyle::Close;
        }
        true
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.find_layer(name).map(|i| &self.layers[i])
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.active.map(|i| &self.layers[i])
    }

    pub fn center_control(&self) -> &CenterControl {
        &self.center_control
    }

    pub fn center_style(&self) -> CenterStyle {
        self.center_control.style
    }

    pub fn hover(&self) -> Hover {
        self.hover
    }

    /// Names of the layers on the navigation stack, oldest first.
    pub fn history(&self) -> Vec<&LayerName> {
        self.history.iter().map(|&i| &self.layers[i].name).collect()
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Mutates a layer in place, then re-runs its layout and refits the center
    /// control if it is the active one.
    pub fn update_layer(&mut self, name: &str, f: impl FnOnce(&mut Layer)) -> bool {
        let Some(index) = self.find_layer(name) else {
            return false;
        };
        let layer = &mut self.layers[index];
        f(layer);
        layer.center = self.center;
        layer.rebuild();
        if self.active == Some(index) {
            self.fit_center_control();
        }
        true
    }

    /// Moves the whole menu. Every layer is laid out again around the new center.
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
        for layer in &mut self.layers {
            layer.set_center(center);
        }
        self.fit_center_control();
    }

    /// Forward transition. Returns false without touching any state when the
    /// name is empty or unknown, or when no layer is active.
    pub fn go_to(&mut self, name: &str) -> bool {
        if name.is_empty() {
            log::debug!("Ignoring navigation to empty layer name");
            return false;
        }
        let Some(previous) = self.active else {
            log::debug!("Ignoring navigation to '{}': no active layer", name);
            return false;
        };
        let Some(target) = self.find_layer(name) else {
            log::debug!("Ignoring navigation to unknown layer '{}'", name);
            return false;
        };

        self.activate(target);
        self.history.push(previous);
        self.center_control.style = CenterStyle::Back;
        log::debug!("Navigated to '{}' (depth {})", name, self.history.len());
        true
    }

    /// Back transition. With an empty stack this closes the menu.
    pub fn go_back(&mut self) {
        if self.state == MenuState::Closed {
            return;
        }
        let Some(previous) = self.history.pop() else {
            self.close();
            return;
        };

        self.activate(previous);
        if self.history.is_empty() {
            self.center_control.style = CenterStyle::Close;
        }
        log::debug!(
            "Went back to '{}' (depth {})",
            self.layers[previous].name,
            self.history.len()
        );
    }

    pub fn close(&mut self) {
        for layer in &mut self.layers {
            layer.hide();
        }
        self.active = None;
        self.history.clear();
        self.hover = Hover::Nothing;
        self.center_control.style = CenterStyle::None;
        self.state = MenuState::Closed;
        log::debug!("Menu closed");
    }

    /// Opens the menu again at `center`, on its first layer with an empty stack.
    pub fn open_at(&mut self, center: Point) {
        self.state = MenuState::Open;
        self.history.clear();
        self.hover = Hover::Nothing;
        self.center = center;
        for layer in &mut self.layers {
            layer.center = center;
        }

        if self.layers.is_empty() {
            self.active = None;
            self.center_control.style = CenterStyle::None;
            self.fit_center_control();
        } else {
            self.activate(0);
            self.center_control.style = CenterStyle::Close;
        }
    }

    /// Routes a click: the center control steps back, items with a target
    /// navigate, other items are reported as selected.
    pub fn click(&mut self, p: Point) -> MenuEvent {
        if self.state == MenuState::Closed {
            return MenuEvent::Ignored;
        }

        if self.center_control.hit_test(p) {
            self.go_back();
            return match self.active_layer() {
                Some(layer) => MenuEvent::Back(layer.name.clone()),
                None => MenuEvent::Closed,
            };
        }

        let Some(layer) = self.active_layer() else {
            return MenuEvent::Ignored;
        };
        let Some(index) = layer.item_at(p) else {
            return MenuEvent::Ignored;
        };

        let layer_name = layer.name.clone();
        match layer.items[index].target.clone() {
            Some(target) if self.go_to(&target) => MenuEvent::Navigated(target),
            Some(_) => MenuEvent::Ignored,
            None => MenuEvent::Selected {
                layer: layer_name,
                index,
            },
        }
    }

    /// Tracks what the pointer is over. Returns true when that changed.
    pub fn update_cursor(&mut self, p: Point) -> bool {
        let hover = if self.state == MenuState::Closed {
            Hover::Nothing
        } else if self.center_control.hit_test(p) {
            Hover::Center
        } else {
            self.active_layer()
                .and_then(|layer| layer.item_at(p))
                .map_or(Hover::Nothing, Hover::Item)
        };
        let changed = hover != self.hover;
        self.hover = hover;
        changed
    }

    /// Draws the center disc and the active layer's sectors. Labels are left to
    /// the caller.
    pub fn draw<D: DrawContext + ?Sized>(
        &self,
        ctx: &mut D,
        colors: &SectorColors,
        center_color: Color,
    ) {
        let Some(layer) = self.active_layer() else {
            return;
        };

        self.center_control.draw(ctx, center_color);

        for (i, item) in layer.items.iter().enumerate() {
            if let (true, Some(sector)) = (item.visible, &item.sector) {
                sector.draw(ctx, colors, self.hover == Hover::Item(i));
            }
        }
    }

    fn find_layer(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name.as_str() == name)
    }

    fn activate(&mut self, index: usize) {
        for (i, layer) in self.layers.iter_mut().enumerate() {
            if i != index {
                layer.hide();
            }
        }
        self.layers[index].show();
        self.active = Some(index);
        self.hover = Hover::Nothing;
        self.fit_center_control();
    }

    fn fit_center_control(&mut self) {
        let radius = self.active_layer().map_or(BASE_RADIUS, Layer::radius);
        self.center_control.fit_to_ring(self.center, radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polar_offset;
    use crate::layout::Direction;
    use crate::render::DrawList;
    use std::f64::consts::PI;

    fn main_and_sub() -> RadialMenu {
        let main = Layer::new("Main", RadialLayout::default()).with_items([
            Item::new("Open Sub").with_target("Sub"),
            Item::new("Run"),
            Item::new("Nowhere").with_target("Missing"),
        ]);
        let sub = Layer::new("Sub", RadialLayout::default())
            .with_items([Item::new("A"), Item::new("B").with_target("Main")]);
        RadialMenu::new(Point::new(400.0, 300.0)).with_layers([main, sub])
    }

    fn visible_names(menu: &RadialMenu) -> Vec<&str> {
        menu.layers()
            .iter()
            .filter(|l| l.visible())
            .map(|l| l.name().as_str())
            .collect()
    }

    /// Point in the middle of an item's wedge.
    fn inside(menu: &RadialMenu, index: usize) -> Point {
        let layer = menu.active_layer().unwrap();
        let g = layer.items()[index].sector_geometry().unwrap();
        let angle = (g.angle_from() + g.angle_to()) / 2.0;
        polar_offset(layer.center(), layer.radius(), angle)
    }

    #[test]
    fn test_first_layer_becomes_active() {
        let menu = main_and_sub();
        assert_eq!(visible_names(&menu), vec!["Main"]);
        assert_eq!(menu.depth(), 0);
        assert_eq!(menu.center_style(), CenterStyle::Close);
    }

    #[test]
    fn test_menu_without_layers() {
        let mut menu = RadialMenu::new(Point::default());
        assert!(menu.active_layer().is_none());
        assert_eq!(menu.center_style(), CenterStyle::None);
        assert!(!menu.go_to("Main"));
        assert!(menu.attach_layer(Layer::new("Main", RadialLayout::default())));
        assert_eq!(menu.active_layer().unwrap().name().as_str(), "Main");
    }

    #[test]
    fn test_duplicate_layer_is_rejected() {
        let mut menu = main_and_sub();
        assert!(!menu.attach_layer(Layer::new("Sub", RadialLayout::default())));
        assert!(!menu.attach_layer(Layer::new("", RadialLayout::default())));
        assert_eq!(menu.layers().len(), 2);
    }

    #[test]
    fn test_main_sub_scenario() {
        let mut menu = main_and_sub();

        assert!(menu.go_to("Sub"));
        assert_eq!(visible_names(&menu), vec!["Sub"]);
        assert_eq!(menu.history(), vec![&LayerName::from("Main")]);
        assert_eq!(menu.center_style(), CenterStyle::Back);

        menu.go_back();
        assert_eq!(visible_names(&menu), vec!["Main"]);
        assert!(menu.history().is_empty());
        assert_eq!(menu.center_style(), CenterStyle::Close);

        menu.go_back();
        assert_eq!(menu.state(), MenuState::Closed);
        assert!(visible_names(&menu).is_empty());
        assert!(menu.active_layer().is_none());
    }

    #[test]
    fn test_invalid_navigation_changes_nothing() {
        let mut menu = main_and_sub();
        menu.go_to("Sub");

        for name in ["", "Nonexistent"] {
            assert!(!menu.go_to(name));
            assert_eq!(visible_names(&menu), vec!["Sub"]);
            assert_eq!(menu.depth(), 1);
            assert_eq!(menu.center_style(), CenterStyle::Back);
        }
    }

    #[test]
    fn test_navigation_after_close_is_ignored() {
        let mut menu = main_and_sub();
        menu.close();
        assert!(!menu.go_to("Sub"));
        menu.go_back();
        assert_eq!(menu.state(), MenuState::Closed);
        assert!(visible_names(&menu).is_empty());
    }

    #[test]
    fn test_back_keeps_back_style_while_stack_is_deep() {
        let mut menu = main_and_sub();
        menu.go_to("Sub");
        menu.go_to("Main");
        assert_eq!(menu.depth(), 2);

        menu.go_back();
        assert_eq!(menu.active_layer().unwrap().name().as_str(), "Sub");
        assert_eq!(menu.center_style(), CenterStyle::Back);
    }

    #[test]
    fn test_center_control_follows_active_layer() {
        let mut menu = main_and_sub();
        let main_radius = menu.layer("Main").unwrap().radius();
        assert_eq!(menu.center_control().inner_radius(), main_radius / 2.0);

        menu.go_to("Sub");
        let sub_radius = menu.layer("Sub").unwrap().radius();
        assert_ne!(main_radius, sub_radius);
        assert_eq!(menu.center_control().outer_radius(), sub_radius * 2.0);
    }

    #[test]
    fn test_update_layer_relayouts_and_refits() {
        let mut menu = main_and_sub();
        assert!(menu.update_layer("Main", |layer| layer.push_item(Item::new("Extra"))));
        let radius = menu.active_layer().unwrap().radius();
        assert_eq!(radius, 100.0 + 8.0 * 5.0);
        assert_eq!(menu.center_control().inner_radius(), radius / 2.0);
        assert!(!menu.update_layer("Missing", |_| {}));
    }

    #[test]
    fn test_item_changes_rebuild_the_ring() {
        let mut layer = Layer::new("Dyn", RadialLayout::default())
            .with_items([Item::new("a"), Item::new("b"), Item::new("c")]);
        assert_eq!(layer.radius(), 130.0);

        assert!(layer.set_item_visible(1, false));
        assert_eq!(layer.radius(), 120.0);
        assert!(layer.items()[2].sector_geometry().is_some());
        assert!(!layer.set_item_visible(7, false));

        let removed = layer.remove_item(0).unwrap();
        assert_eq!(removed.label, "a");
        assert_eq!(layer.radius(), 110.0);
        assert!(layer.remove_item(5).is_none());

        layer.set_layout(RadialLayout::default().with_reserved_hidden(true));
        assert_eq!(layer.arrangement().element_count, 4);
    }

    #[test]
    fn test_click_routing() {
        let mut menu = main_and_sub();
        let c = menu.center();

        let run = inside(&menu, 1);
        assert_eq!(
            menu.click(run),
            MenuEvent::Selected {
                layer: LayerName::from("Main"),
                index: 1
            }
        );

        let broken = inside(&menu, 2);
        assert_eq!(menu.click(broken), MenuEvent::Ignored);
        assert_eq!(menu.depth(), 0);

        let sub = inside(&menu, 0);
        assert_eq!(menu.click(sub), MenuEvent::Navigated(LayerName::from("Sub")));

        assert_eq!(menu.click(c), MenuEvent::Back(LayerName::from("Main")));
        assert_eq!(menu.click(Point::new(c.x + 5000.0, c.y)), MenuEvent::Closed);
        assert_eq!(menu.click(c), MenuEvent::Ignored);
    }

    #[test]
    fn test_hover_tracking() {
        let mut menu = main_and_sub();
        let p = inside(&menu, 1);
        assert!(menu.update_cursor(p));
        assert_eq!(menu.hover(), Hover::Item(1));
        assert!(!menu.update_cursor(p));

        assert!(menu.update_cursor(menu.center()));
        assert_eq!(menu.hover(), Hover::Center);
    }

    #[test]
    fn test_reopen_resets_navigation() {
        let mut menu = main_and_sub();
        menu.go_to("Sub");
        menu.close();

        menu.open_at(Point::new(10.0, 20.0));
        assert!(menu.is_open());
        assert_eq!(visible_names(&menu), vec!["Main"]);
        assert_eq!(menu.depth(), 0);
        assert_eq!(menu.center_control().center(), Point::new(10.0, 20.0));
        assert_eq!(menu.center_style(), CenterStyle::Close);
        assert_eq!(menu.active_layer().unwrap().center(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_plain_items_use_their_box() {
        let layer = Layer::new("Plain", RadialLayout::new((0.0, PI), Direction::Clockwise))
            .with_items([Item::plain("box", Size::new(40.0, 40.0))]);
        let mut menu = RadialMenu::new(Point::default()).with_layers([layer]);
        let item = &menu.active_layer().unwrap().items()[0];
        assert!(item.sector().is_none());
        let anchor = item.anchor();
        assert!(matches!(menu.click(anchor), MenuEvent::Selected { index: 0, .. }));
    }

    #[test]
    fn test_draw_only_renders_active_layer() {
        let menu = main_and_sub();
        let mut list = DrawList::new();
        menu.draw(&mut list, &SectorColors::default(), Color::new(0.1, 0.1, 0.1, 0.5));
        // center disc plus one background strip per item, two separators each
        assert_eq!(list.commands.len(), 1 + 3 * 3);

        let mut closed = main_and_sub();
        closed.close();
        let mut list = DrawList::new();
        closed.draw(&mut list, &SectorColors::default(), Color::new(0.1, 0.1, 0.1, 0.5));
        assert!(list.commands.is_empty());
    }
}
