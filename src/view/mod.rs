//! View controller - turns the prepared table and the current widget values
//! into render commands.
//!
//! The GUI calls [`render`] once per frame. Everything that must survive
//! between frames lives in [`SessionState`]; every other value is derived anew.

mod commands;
mod day_table;
mod session;
mod timeseries;

pub use commands::{
    DayRow, DayTable, GameChart, GameSeries, HighlightLine, Placement, RankChart, RankLine,
    RankPoint, SeriesColor, UiCommand, DAY_TABLE_COLUMNS,
};
pub use day_table::{day_rows, render_day_table};
pub use session::{
    GameAction, RankAction, SessionState, SessionValue, DEFAULT_RANKS, SELECTED_GAMES,
    SELECTED_RANKS, TOP_GAMES_LARGE, TOP_GAMES_SMALL,
};
pub use timeseries::{
    filter_date_range, game_options, names_by_rank, pivot_views, rank_options, render_timeseries,
    INVERTED_RANGE_ERROR, NO_GAMES_WARNING, NO_RANGE_DATA_WARNING, NO_RANKS_WARNING,
};

use crate::data::PreparedTable;
use chrono::NaiveDate;

/// Games that can be toggled for emphasis, in sidebar order.
pub const HIGHLIGHT_GAMES: [&str; 3] = ["Final Titan", "Mindbug", "Agent Avenue"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    ByGame,
    ByRank,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::ByGame => "By Game",
            ViewMode::ByRank => "By Rank",
        }
    }
}

/// Highlight checkbox states, indexed like [`HIGHLIGHT_GAMES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlights(pub [bool; 3]);

impl Default for Highlights {
    fn default() -> Self {
        Self([true, false, false])
    }
}

impl Highlights {
    pub fn none() -> Self {
        Self([false; 3])
    }

    pub fn only(name: &str) -> Self {
        Self(HIGHLIGHT_GAMES.map(|g| g == name))
    }

    pub fn enabled_names(&self) -> Vec<&'static str> {
        HIGHLIGHT_GAMES
            .iter()
            .zip(self.0)
            .filter(|(_, on)| *on)
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|on| *on)
    }
}

/// Widget values for one frame.
///
/// `*_action` and `*_edit` are one-shot: the GUI clears them after the frame
/// that consumed them.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetInputs {
    pub mode: ViewMode,
    pub highlights: Highlights,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub game_action: Option<GameAction>,
    pub game_edit: Option<Vec<String>>,
    pub rank_action: Option<RankAction>,
    pub rank_edit: Option<Vec<i64>>,
    pub single_day: NaiveDate,
}

impl WidgetInputs {
    /// Defaults bounded to the table's date range; `None` for an empty table.
    pub fn for_table(table: &PreparedTable) -> Option<Self> {
        let min = table.min_date()?;
        let max = table.max_date()?;
        Some(Self {
            mode: ViewMode::default(),
            highlights: Highlights::default(),
            start_date: min,
            end_date: max,
            game_action: None,
            game_edit: None,
            rank_action: None,
            rank_edit: None,
            single_day: max,
        })
    }

    /// Whether this frame carries a selection change not yet applied.
    pub fn has_pending(&self) -> bool {
        self.game_action.is_some()
            || self.game_edit.is_some()
            || self.rank_action.is_some()
            || self.rank_edit.is_some()
    }

    pub fn clear_pending(&mut self) {
        self.game_action = None;
        self.game_edit = None;
        self.rank_action = None;
        self.rank_edit = None;
    }
}

/// Run both dashboard sections for one frame.
pub fn render(
    table: &PreparedTable,
    session: &mut SessionState,
    inputs: &WidgetInputs,
) -> Vec<UiCommand> {
    let mut commands = render_timeseries(table, session, inputs);
    commands.extend(render_day_table(table, inputs.single_day));
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_highlights_enable_final_titan_only() {
        assert_eq!(Highlights::default().enabled_names(), vec!["Final Titan"]);
        assert!(!Highlights::none().any());
        assert_eq!(Highlights::only("Mindbug").enabled_names(), vec!["Mindbug"]);
    }

    #[test]
    fn empty_table_has_no_inputs() {
        assert!(WidgetInputs::for_table(&PreparedTable::default()).is_none());
    }
}
