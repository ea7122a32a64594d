// src/gui/components/status.rs
//
// Loading spinner, error banner with retry, and the two empty states.

use eframe::egui::{self, RichText, widgets::Spinner};

use crate::{data::Phase, gui::app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    match app.phase() {
        Phase::Loading => {
            ui.horizontal(|ui| {
                ui.add(Spinner::new());
                ui.label(app.status_text());
            });
        }
        Phase::Failed(msg) => {
            let title = app.store.error().map(|e| e.title()).unwrap_or("Error");
            let red = ui.visuals().error_fg_color;
            egui::Frame::new()
                .stroke(egui::Stroke::new(1.0, red))
                .corner_radius(6.0)
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(title).strong().color(red));
                    ui.label(msg);
                    if ui.button("Try again").clicked() {
                        app.want_refetch = true;
                    }
                });
            ui.add_space(6.0);
        }
        Phase::NoData => empty(ui, "No data available", "The source answered, but without any results."),
        Phase::NoMatches => empty(ui, "No results found", "Try a different search term or filter."),
        Phase::Unconfigured | Phase::Ready => {}
    }
}

fn empty(ui: &mut egui::Ui, title: &str, hint: &str) {
    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        ui.heading(title);
        ui.weak(hint);
    });
}
