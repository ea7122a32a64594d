// src/gui/actions/export.rs
use std::path::Path;

use crate::{
    config::consts::{CSV_SEP, EXPORT_PATH},
    csv::to_delimited_string,
    file,
    gui::app::App,
    schema::canonical_headers,
};

/// Filtered results → `EXPORT_PATH` as CSV with the canonical header.
pub fn export(app: &mut App) {
    let rows = super::filtered_rows(app);
    if rows.is_empty() {
        logd!("Export: Clicked, but there's nothing to export");
        app.status("Nothing to export");
        return;
    }

    let headers = canonical_headers();
    let contents = to_delimited_string(Some(headers.as_slice()), &rows, CSV_SEP);
    logf!("Export: Begin rows={} → {}", rows.len(), EXPORT_PATH);

    let msg = match file::write_output(Path::new(EXPORT_PATH), &contents) {
        Ok(path) => {
            logf!("Export: OK {}", path.display());
            format!("Exported {} results to {}", rows.len(), path.display())
        }
        Err(e) => {
            loge!("Export: Failed: {}", e);
            format!("Export failed: {e}")
        }
    };
    app.status(msg);
}
