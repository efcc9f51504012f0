//! Render commands produced by the view controller and painted by the GUI.

use chrono::NaiveDate;

/// Where a command is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Sidebar,
    Main,
}

/// Color role of a chart series; the GUI maps roles to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesColor {
    Highlighted,
    Muted,
    /// Index into the default categorical palette
    Palette(usize),
}

/// One game column of the pivoted by-game table.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSeries {
    pub name: String,
    /// One value per entry of [`GameChart::dates`]
    pub values: Vec<i64>,
    pub color: SeriesColor,
}

/// Dense date x game pivot of `views_diff`.
#[derive(Debug, Clone, PartialEq)]
pub struct GameChart {
    pub dates: Vec<NaiveDate>,
    pub series: Vec<GameSeries>,
}

impl GameChart {
    /// Sum of all series at the given date index.
    pub fn total_at(&self, index: usize) -> i64 {
        self.series
            .iter()
            .filter_map(|s| s.values.get(index))
            .sum()
    }
}

/// A single point of the rank chart, carrying its tooltip fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RankPoint {
    pub date: NaiveDate,
    pub rank: i64,
    pub views_diff: i64,
    pub name: String,
}

/// A line of the base rank layer, grouped by (tag, rank).
#[derive(Debug, Clone, PartialEq)]
pub struct RankLine {
    pub rank: i64,
    /// "Highlighted", "Normal", or the rank itself when no highlight is on
    pub tag: String,
    pub color: SeriesColor,
    pub points: Vec<RankPoint>,
}

/// Heavier overlay line for one highlighted game.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightLine {
    pub name: String,
    pub points: Vec<RankPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankChart {
    pub legend_title: String,
    pub lines: Vec<RankLine>,
    pub overlay: Vec<HighlightLine>,
}

impl RankChart {
    pub fn ranks(&self) -> Vec<i64> {
        let mut ranks: Vec<i64> = self.lines.iter().map(|l| l.rank).collect();
        ranks.dedup();
        ranks
    }
}

/// Columns of the single-day table, in display order.
pub const DAY_TABLE_COLUMNS: [&str; 6] = ["rank", "game_id", "name", "year", "views", "views_diff"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRow {
    pub rank: i64,
    pub game_id: i64,
    pub name: String,
    pub year: i64,
    pub views: i64,
    pub views_diff: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTable {
    pub date: NaiveDate,
    pub rows: Vec<DayRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    Title(String),
    Header(String),
    Subheader(String),
    Text(String),
    /// Non-fatal problem shown in the main area
    Warning(String),
    /// Validation message shown under the sidebar controls
    SidebarError(String),
    GameSelector {
        options: Vec<String>,
        selected: Vec<String>,
    },
    RankSelector {
        options: Vec<i64>,
        selected: Vec<i64>,
    },
    DayPicker {
        value: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },
    GameChart(GameChart),
    RankChart(RankChart),
    DayTable(DayTable),
}

impl UiCommand {
    pub fn placement(&self) -> Placement {
        match self {
            UiCommand::SidebarError(_)
            | UiCommand::GameSelector { .. }
            | UiCommand::RankSelector { .. } => Placement::Sidebar,
            _ => Placement::Main,
        }
    }

    pub fn is_chart(&self) -> bool {
        matches!(self, UiCommand::GameChart(_) | UiCommand::RankChart(_))
    }
}
