//! BGG Hotness - daily views history dashboard
//!
//! Loads the scraped hotness CSV, derives daily new views per game and renders
//! an interactive comparison by game or by rank, plus a single-day ranking table.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod view;
