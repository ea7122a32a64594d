// src/config/consts.rs

// Net config
pub const HTTP_TIMEOUT_SECS: u64 = 20;
pub const USER_AGENT: &str = concat!("fest_results/", env!("CARGO_PKG_VERSION"));

// Payload
pub const CSV_SEP: char = ',';
pub const TSV_SEP: char = '\t';

// Filters
pub const ALL_SENTINEL: &str = "all";
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";
pub const ALL_TEAMS_LABEL: &str = "All Teams";

// Logging
pub const LOG_FILE: &str = ".store/debug.log";

// GUI
pub const APP_TITLE: &str = "Fest Results";
pub const WINDOW_W: f32 = 1100.0;
pub const WINDOW_H: f32 = 760.0;
pub const URL_HINT: &str = "https://script.google.com/macros/s/.../exec";

// Export
pub const EXPORT_PATH: &str = "out/results.csv";
