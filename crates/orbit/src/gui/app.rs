use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::menu::{self, ClickAction, MenuModel, REFERENCE_HEIGHT};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use crate::sys::launcher;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit_core::Point;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub model: Rc<RefCell<MenuModel>>,
    pub visible: bool,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Back,
    Click { button: u32, point: Point },
    CursorMove(Point),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Back => AppMsg::Back,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (MenuModel, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Orbit"),
            #[watch]
            set_visible: model.visible,
            #[watch]
            set_opacity: if model.visible { 1.0 } else { 0.0 },
            add_css_class: "orbit-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => {
                            sender.input(AppMsg::Hide);
                            glib::Propagation::Stop
                        }
                        gtk::gdk::Key::BackSpace => {
                            sender.input(AppMsg::Back);
                            glib::Propagation::Stop
                        }
                        _ => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "orbit-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::CursorMove(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 0, // Listen to all buttons
                    connect_released[sender] => move |gesture, _, x, y| {
                        sender.input(AppMsg::Click {
                            button: gesture.current_button(),
                            point: Point::new(x, y),
                        });
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (menu_model, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let model = AppModel {
            model: Rc::new(RefCell::new(menu_model)),
            visible: false,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let model_draw = model.model.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = menu::draw(cr, &model_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                self.visible = true;

                let monitor_height =
                    window::monitor_height(&self.root).unwrap_or(REFERENCE_HEIGHT);
                let cursor_pos = window::get_cursor_position(&self.root)
                    .unwrap_or_else(|| window::window_center(&self.root));

                self.model.borrow_mut().refresh(cursor_pos, monitor_height);
                self.drawing_area.queue_draw();
            }
            AppMsg::Hide => self.hide(),
            AppMsg::Back => {
                if !self.visible {
                    return;
                }
                let action = self.model.borrow_mut().back();
                self.apply(action);
            }
            AppMsg::Click { button, point } => {
                if !self.visible {
                    return;
                }
                if button != 1 {
                    self.hide();
                    return;
                }
                let action = self.model.borrow_mut().click(point);
                self.apply(action);
            }
            AppMsg::CursorMove(point) => {
                if !self.visible {
                    return;
                }
                if self.model.borrow_mut().update_cursor(point) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let new_config = if new_config.layers.is_empty() {
                        Config::setup()
                    } else {
                        new_config
                    };
                    self.model.borrow_mut().load(&new_config);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn hide(&mut self) {
        self.visible = false;
        self.model.borrow_mut().hide();
    }

    fn apply(&mut self, action: ClickAction) {
        match action {
            ClickAction::Nothing => {}
            ClickAction::Redraw => self.drawing_area.queue_draw(),
            ClickAction::Hide => self.hide(),
            ClickAction::Launch(exec) => {
                if let Err(e) = launcher::launch(&exec) {
                    log::error!("Failed to launch '{}': {}", exec, e);
                }
                self.hide();
            }
            ClickAction::OpenConfig => {
                match config::write_default_config() {
                    Ok(path) => {
                        if let Err(e) = std::process::Command::new("xdg-open").arg(&path).spawn() {
                            log::error!("Failed to open {}: {}", path.display(), e);
                        }
                    }
                    Err(e) => log::error!("Failed to write default config: {}", e),
                }
                self.hide();
            }
        }
    }
}
