// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::ViewportBuilder;
use fest_results::{
    cli,
    config::{consts::APP_TITLE, state::GuiState},
    gui,
};

fn main() {
    // Optional `--url <URL>` skips the configure screen.
    let url = cli::url_arg(std::env::args().skip(1));

    let size = GuiState::default();
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([size.window_w, size.window_h]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, url) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
