//! LingoTalks Launcher - GUI Application
//!
//! Run with: cargo run --bin lingotalks-launcher

use iced::application;

// Import from the library
use lingotalks::config::Config;
use lingotalks::gui::LingoApp;

fn main() -> iced::Result {
    let config = Config::load().unwrap_or_default();
    if let Err(e) = lingotalks::logging::init(false, &config.log_level) {
        eprintln!("Logging disabled: {}", e);
    }

    // Close requests go through update() so audio is cleaned up first
    application(LingoApp::title, LingoApp::update, LingoApp::view)
        .theme(LingoApp::theme)
        .subscription(LingoApp::subscription)
        .exit_on_close_request(false)
        .window_size((1000.0, 700.0))
        .run_with(LingoApp::new)
}
