use orbit::config;
use orbit::gui::app::AppModel;
use orbit::gui::menu::MenuModel;
use orbit::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let model = MenuModel::from_config(&config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx.clone());

    let app = RelmApp::new("org.troia.orbit");

    app.run::<AppModel>((model, rx));
}
