// src/gui/components/mod.rs
pub mod configure;
pub mod filter_bar;
pub mod header;
pub mod result_card;
pub mod status;
