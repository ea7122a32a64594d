// src/gui/actions/copy.rs
use eframe::egui;

use crate::{config::consts::TSV_SEP, csv::to_delimited_string, gui::app::App, schema::canonical_headers};

/// Filtered results → clipboard as TSV (pastes straight into a spreadsheet).
pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let rows = super::filtered_rows(app);
    if rows.is_empty() {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but there's nothing to copy");
        return;
    }

    let headers = canonical_headers();
    let txt = to_delimited_string(Some(headers.as_slice()), &rows, TSV_SEP);
    logf!("Copy: rows={}", rows.len());

    ui_ctx.copy_text(txt);
    app.status(format!("Copied {} results to clipboard", rows.len()));
}
