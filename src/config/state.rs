// src/config/state.rs
use super::consts::{WINDOW_H, WINDOW_W};
use super::options::FilterCriteria;
use super::source::SourceConfig;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Text of the URL field on the configure screen
    pub url_input: String,

    pub window_w: f32,
    pub window_h: f32,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            url_input: s!(),
            window_w: WINDOW_W,
            window_h: WINDOW_H,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub source: SourceConfig,
    pub filters: FilterCriteria,
    pub gui: GuiState,
}
