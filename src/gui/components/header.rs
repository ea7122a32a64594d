// src/gui/components/header.rs
//
// Title, summary badges and the source actions (refresh, copy, export, reconfigure).

use eframe::egui::{self, Align, Layout, RichText, widgets::Spinner};

use crate::{
    config::consts::APP_TITLE,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let summary = app
        .views
        .refresh(app.store.generation(), app.store.entries(), &app.state.filters)
        .summary;
    let loading = app.store.is_loading();

    ui.horizontal(|ui| {
        ui.heading(APP_TITLE);
        ui.add_space(12.0);
        badge(ui, summary.programs, "programs");
        badge(ui, summary.results, "results");
        badge(ui, summary.teams, "teams");
        if loading {
            ui.add(Spinner::new());
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("Reconfigure").on_hover_text("Forget this source and enter another URL").clicked() {
                app.want_reconfigure = true;
            }
            if ui.add_enabled(!loading, egui::Button::new("Refresh")).clicked() {
                app.want_refetch = true;
            }
            let ctx = ui.ctx().clone();
            if ui.button("Copy").on_hover_text("Copy the filtered results as TSV").clicked() {
                actions::copy(app, &ctx);
            }
            if ui.button("Export CSV").clicked() {
                actions::export(app);
            }
        });
    });
    ui.add_space(2.0);
}

fn badge(ui: &mut egui::Ui, n: usize, what: &str) {
    egui::Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(format!("{n} {what}")).small());
        });
}
