mod app;
mod color;
mod state;
mod ui;

use app::RustyLogviewApp;
use eframe::egui;
use rusty_logview::config::ViewerConfig;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::load();
    let mut state = AppState::new(config);

    // A log path on the command line is opened straight away.
    if let Some(path) = std::env::args_os().nth(1) {
        state.load_path(std::path::Path::new(&path));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Logview",
        options,
        Box::new(|_cc| Ok(Box::new(RustyLogviewApp::new(state)))),
    )
}
