//! Charts module - Chart rendering

mod plotter;

pub use plotter::{ChartPlotter, TableSort, HIGHLIGHT_COLOR, MUTED_COLOR, PALETTE};
