// src/gui/components/filter_bar.rs
//
// Search box + category and team selectors. Editing here only touches
// `app.state.filters`; the view cache notices on the next refresh.

use std::sync::Arc;

use eframe::egui;

use crate::{
    config::{
        consts::{ALL_CATEGORIES_LABEL, ALL_TEAMS_LABEL},
        options::Selector,
    },
    gui::app::App,
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let vocab = Arc::clone(
        &app.views
            .refresh(app.store.generation(), app.store.entries(), &app.state.filters)
            .vocabulary,
    );
    let before = app.state.filters.clone();
    let filters = &mut app.state.filters;

    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut filters.search)
                .hint_text("Search candidates, teams, programs…")
                .desired_width(280.0),
        );

        egui::ComboBox::from_id_salt("category_filter")
            .selected_text(label(&filters.category, ALL_CATEGORIES_LABEL))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filters.category, Selector::All, ALL_CATEGORIES_LABEL);
                for c in &vocab.categories {
                    ui.selectable_value(&mut filters.category, Selector::Only(c.clone()), c.as_str());
                }
            });

        egui::ComboBox::from_id_salt("team_filter")
            .selected_text(label(&filters.team, ALL_TEAMS_LABEL))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filters.team, Selector::All, ALL_TEAMS_LABEL);
                for t in &vocab.teams {
                    ui.selectable_value(&mut filters.team, Selector::Only(t.clone()), t.as_str());
                }
            });

        if !filters.is_unfiltered() && ui.button("Clear").clicked() {
            filters.clear();
        }
    });

    if app.state.filters != before {
        logd!("UI: filters → {:?}", app.state.filters);
    }
}

fn label(sel: &Selector, all: &str) -> String {
    match sel {
        Selector::All => s!(all),
        Selector::Only(v) => v.clone(),
    }
}
