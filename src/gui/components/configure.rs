// src/gui/components/configure.rs
//
// First screen: ask for the endpoint URL. Submitting raises `want_configure`;
// the app applies it after the frame is drawn.

use eframe::egui;

use crate::{
    config::consts::{APP_TITLE, URL_HINT},
    gui::app::App,
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.add_space(ui.available_height() * 0.25);
    ui.vertical_centered(|ui| {
        ui.heading(APP_TITLE);
        ui.add_space(8.0);
        ui.label("Paste the results endpoint (the web app URL that serves the sheet as CSV).");
        ui.add_space(8.0);

        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.url_input)
                .hint_text(URL_HINT)
                .desired_width(520.0),
        );
        let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(6.0);
        let ready = !app.state.gui.url_input.trim().is_empty();
        if ui.add_enabled(ready, egui::Button::new("Load results")).clicked() || (enter && ready) {
            app.want_configure = true;
        }

        if let Some(err) = &app.config_error {
            let red = ui.visuals().error_fg_color;
            ui.add_space(6.0);
            ui.colored_label(red, err.as_str());
        }
    });
}
