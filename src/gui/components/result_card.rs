// src/gui/components/result_card.rs
//
// One card per program group: code badge, name, section, member table.
// Rows without a program code get a trailing "No program" card.
// Purely a view; reads the cached DerivedView, writes nothing back.
// Drawn only in the Ready phase.

use eframe::egui::{self, Color32, RichText};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::{
    gui::app::App,
    model::{GradeTier, ResultEntry},
};

const ROW_H: f32 = 20.0;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    if !app.phase().shows_results() {
        return;
    }
    let records = app.store.records();
    let view = app.views.refresh(app.store.generation(), &records, &app.state.filters);
    if view.filtered.is_empty() {
        return;
    }
    let loose = view.ungrouped(&records);

    egui::ScrollArea::vertical()
        .id_salt("results_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for g in &view.groups {
                let title = if g.section.is_empty() {
                    g.name.clone()
                } else {
                    format!("{} · {}", g.name, g.section)
                };
                let entries: Vec<&ResultEntry> = g.entries(&records).collect();
                card(ui, &g.code, &title, &entries);
                ui.add_space(8.0);
            }
            if !loose.is_empty() {
                let entries: Vec<&ResultEntry> = loose.iter().filter_map(|&ix| records.get(ix)).collect();
                card(ui, "-", "No program", &entries);
            }
        });
}

fn card(ui: &mut egui::Ui, code: &str, title: &str, entries: &[&ResultEntry]) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(RichText::new(code).monospace().strong());
            ui.label(RichText::new(title).heading());
            ui.weak(format!("({})", entries.len()));
        });
        ui.separator();

        TableBuilder::new(ui)
            .id_salt(("program_table", code))
            .striped(true)
            .vscroll(false)
            .column(TableColumn::exact(64.0))
            .column(TableColumn::exact(72.0))
            .column(TableColumn::remainder().at_least(160.0).clip(true))
            .column(TableColumn::exact(80.0))
            .column(TableColumn::exact(56.0))
            .header(ROW_H, |mut header| {
                for h in ["Pos", "Chest No", "Candidate", "Team", "Grade"] {
                    header.col(|ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|mut body| {
                for e in entries {
                    body.row(ROW_H, |mut row| {
                        row.col(|ui| {
                            let pos = match e.podium() {
                                Some(p) => format!("{} {}", p.symbol(), e.display_position()),
                                None => s!(e.display_position()),
                            };
                            ui.label(pos);
                        });
                        row.col(|ui| {
                            ui.monospace(e.chest_no.as_str());
                        });
                        row.col(|ui| {
                            ui.label(e.candidate_name.as_str());
                        });
                        row.col(|ui| {
                            ui.label(e.team_code.as_str());
                        });
                        row.col(|ui| {
                            grade(ui, e);
                        });
                    });
                }
            });
    });
}

fn grade(ui: &mut egui::Ui, e: &ResultEntry) {
    let color = match e.grade_tier() {
        GradeTier::A => Color32::from_rgb(0x2e, 0x9e, 0x4f),
        GradeTier::B => Color32::from_rgb(0x3b, 0x82, 0xd6),
        GradeTier::C => Color32::from_rgb(0xd9, 0x8a, 0x1c),
        GradeTier::Other => ui.visuals().text_color(),
        GradeTier::None => return,
    };
    ui.label(RichText::new(e.grade.trim()).strong().color(color));
}
