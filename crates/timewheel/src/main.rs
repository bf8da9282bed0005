use epochs::panel::Panel;
use relm4::prelude::*;
use timewheel::config;
use timewheel::gui::app::AppModel;
use timewheel::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match config::write_default_config() {
        Ok(path) => log::debug!("Config at {}", path.display()),
        Err(e) => log::warn!("Could not seed config file: {}", e),
    }

    let (sections, timings) = config::load_or_default()?;
    let panel = Panel::new(sections, timings);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    if let Err(e) = runtime::start_background_services(tx) {
        log::error!("Failed to start background services: {}", e);
    }

    let app = RelmApp::new("org.timewheel.Timewheel");

    app.run::<AppModel>((panel, rx));
    Ok(())
}
