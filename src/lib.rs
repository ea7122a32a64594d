// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod error;
pub mod fetch;
pub mod file;
pub mod gui;
pub mod model;
pub mod progress;
pub mod schema;
pub mod store;
