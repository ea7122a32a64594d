// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{copy, export}.

mod copy;    // src/gui/actions/copy.rs
mod export;  // src/gui/actions/export.rs

pub use copy::copy;
pub use export::export;

use crate::gui::app::App;

/// Filtered rows in canonical column order, as the export formats want them.
pub(super) fn filtered_rows(app: &mut App) -> Vec<Vec<String>> {
    let records = app.store.records();
    let view = app.views.refresh(app.store.generation(), &records, &app.state.filters);
    view.filtered_entries(&records).map(|e| e.to_row()).collect()
}
