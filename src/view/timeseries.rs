//! Time-series section: daily new views compared by game or by rank.

use super::commands::{
    GameChart, GameSeries, HighlightLine, RankChart, RankLine, RankPoint, SeriesColor, UiCommand,
};
use super::session::{SessionState, DEFAULT_RANKS, TOP_GAMES_SMALL};
use super::{ViewMode, WidgetInputs};
use crate::data::{HotnessRecord, PreparedTable};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

pub const TITLE: &str = "BGG Hotness Daily Views – By Game or By Rank";
pub const INVERTED_RANGE_ERROR: &str =
    "Start date cannot be after end date. Please adjust your selection.";
pub const NO_GAMES_WARNING: &str =
    "No games selected. Please pick at least one game from the sidebar.";
pub const NO_RANKS_WARNING: &str =
    "No ranks selected. Please pick at least one rank from the sidebar.";
pub const NO_RANGE_DATA_WARNING: &str = "No data in the selected date range.";

const HIGHLIGHTED_TAG: &str = "Highlighted";
const NORMAL_TAG: &str = "Normal";

/// Records with `start <= date <= end`. An inverted range yields nothing.
pub fn filter_date_range(
    table: &PreparedTable,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&HotnessRecord> {
    table
        .records()
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .collect()
}

/// Distinct names ordered by each name's most recently seen rank, ties by name.
pub fn names_by_rank<'a>(records: impl IntoIterator<Item = &'a HotnessRecord>) -> Vec<String> {
    let mut latest: HashMap<&str, (NaiveDate, i64)> = HashMap::new();
    for record in records {
        latest
            .entry(record.name.as_str())
            .and_modify(|seen| {
                if record.date > seen.0 || (record.date == seen.0 && record.rank < seen.1) {
                    *seen = (record.date, record.rank);
                }
            })
            .or_insert((record.date, record.rank));
    }

    let mut names: Vec<(i64, &str)> = latest
        .into_iter()
        .map(|(name, (_, rank))| (rank, name))
        .collect();
    names.sort();
    names.into_iter().map(|(_, name)| name.to_string()).collect()
}

/// Candidate games over the whole table, and the ranking at `end_date`.
pub fn game_options(table: &PreparedTable, end_date: NaiveDate) -> (Vec<String>, Vec<String>) {
    let all_games = names_by_rank(table.records());
    let most_recent = names_by_rank(table.records().iter().filter(|r| r.date == end_date));
    (all_games, most_recent)
}

/// Every distinct rank in the table, ascending.
pub fn rank_options(table: &PreparedTable) -> Vec<i64> {
    table
        .records()
        .iter()
        .map(|r| r.rank)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Pivot rows into a dense date x name table of summed `views_diff`.
/// Dates ascend, names are lexical, missing cells are 0.
pub fn pivot_views(rows: &[&HotnessRecord]) -> (Vec<NaiveDate>, Vec<(String, Vec<i64>)>) {
    let dates: Vec<NaiveDate> = rows
        .iter()
        .map(|r| r.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let index: HashMap<NaiveDate, usize> = dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

    let mut columns: BTreeMap<&str, Vec<i64>> = BTreeMap::new();
    for row in rows {
        let values = columns
            .entry(row.name.as_str())
            .or_insert_with(|| vec![0; dates.len()]);
        values[index[&row.date]] += row.views_diff;
    }

    let columns = columns
        .into_iter()
        .map(|(name, values)| (name.to_string(), values))
        .collect();
    (dates, columns)
}

pub fn render_timeseries(
    table: &PreparedTable,
    session: &mut SessionState,
    inputs: &WidgetInputs,
) -> Vec<UiCommand> {
    let mut commands = vec![UiCommand::Title(TITLE.to_string())];

    if inputs.start_date > inputs.end_date {
        commands.push(UiCommand::SidebarError(INVERTED_RANGE_ERROR.to_string()));
    }

    let filtered = filter_date_range(table, inputs.start_date, inputs.end_date);
    let highlighted = inputs.highlights.enabled_names();

    match inputs.mode {
        ViewMode::ByGame => {
            render_by_game(table, &filtered, &highlighted, session, inputs, &mut commands)
        }
        ViewMode::ByRank => {
            render_by_rank(table, &filtered, &highlighted, session, inputs, &mut commands)
        }
    }

    commands
}

fn render_by_game(
    table: &PreparedTable,
    filtered: &[&HotnessRecord],
    highlighted: &[&str],
    session: &mut SessionState,
    inputs: &WidgetInputs,
    commands: &mut Vec<UiCommand>,
) {
    let (all_games, most_recent) = game_options(table, inputs.end_date);

    if session.selected_games().is_none() {
        session.set_selected_games(most_recent.iter().take(TOP_GAMES_SMALL).cloned().collect());
    }
    if let Some(edit) = &inputs.game_edit {
        session.set_selected_games(edit.clone());
    }
    if let Some(action) = inputs.game_action {
        session.set_selected_games(action.apply(&all_games, &most_recent));
    }

    let selected = session.selected_games().unwrap_or_default().to_vec();
    commands.push(UiCommand::GameSelector {
        options: all_games,
        selected: selected.clone(),
    });

    // Highlighted games are always charted
    let mut effective: Vec<&str> = selected.iter().map(String::as_str).collect();
    for name in highlighted {
        if !effective.contains(name) {
            effective.push(*name);
        }
    }
    if effective.is_empty() {
        commands.push(UiCommand::Warning(NO_GAMES_WARNING.to_string()));
        return;
    }

    let wanted: HashSet<&str> = effective.into_iter().collect();
    let rows: Vec<&HotnessRecord> = filtered
        .iter()
        .copied()
        .filter(|r| wanted.contains(r.name.as_str()))
        .collect();
    if rows.is_empty() {
        commands.push(UiCommand::Warning(NO_RANGE_DATA_WARNING.to_string()));
        return;
    }

    let (dates, columns) = pivot_views(&rows);
    let series = columns
        .into_iter()
        .enumerate()
        .map(|(i, (name, values))| {
            let color = if highlighted.is_empty() {
                SeriesColor::Palette(i)
            } else if highlighted.contains(&name.as_str()) {
                SeriesColor::Highlighted
            } else {
                SeriesColor::Muted
            };
            GameSeries { name, values, color }
        })
        .collect();

    commands.push(UiCommand::Subheader("Number of Page Views per Game".to_string()));
    commands.push(UiCommand::GameChart(GameChart { dates, series }));
}

fn render_by_rank(
    table: &PreparedTable,
    filtered: &[&HotnessRecord],
    highlighted: &[&str],
    session: &mut SessionState,
    inputs: &WidgetInputs,
    commands: &mut Vec<UiCommand>,
) {
    let all_ranks = rank_options(table);

    if session.selected_ranks().is_none() {
        session.set_selected_ranks(DEFAULT_RANKS.collect());
    }
    if let Some(edit) = &inputs.rank_edit {
        session.set_selected_ranks(edit.clone());
    }
    if let Some(action) = inputs.rank_action {
        session.set_selected_ranks(action.apply(&all_ranks));
    }

    let selected: BTreeSet<i64> = session
        .selected_ranks()
        .unwrap_or_default()
        .iter()
        .copied()
        .collect();
    commands.push(UiCommand::RankSelector {
        options: all_ranks,
        selected: selected.iter().copied().collect(),
    });

    if selected.is_empty() {
        commands.push(UiCommand::Warning(NO_RANKS_WARNING.to_string()));
        return;
    }

    let is_highlighted = |r: &HotnessRecord| highlighted.contains(&r.name.as_str());

    // Selected ranks plus every enabled highlighted game, each row once
    let mut base: Vec<&HotnessRecord> = filtered
        .iter()
        .copied()
        .filter(|r| selected.contains(&r.rank) || is_highlighted(*r))
        .collect();
    if base.is_empty() {
        commands.push(UiCommand::Warning(NO_RANGE_DATA_WARNING.to_string()));
        return;
    }
    base.sort_by_key(|r| r.date);

    let tag_of = |r: &HotnessRecord| -> String {
        if highlighted.is_empty() {
            r.rank.to_string()
        } else if is_highlighted(r) {
            HIGHLIGHTED_TAG.to_string()
        } else {
            NORMAL_TAG.to_string()
        }
    };
    let point_of = |r: &HotnessRecord| RankPoint {
        date: r.date,
        rank: r.rank,
        views_diff: r.views_diff,
        name: r.name.clone(),
    };

    let mut grouped: BTreeMap<(i64, String), Vec<RankPoint>> = BTreeMap::new();
    for record in base.iter().copied().filter(|r| selected.contains(&r.rank)) {
        grouped
            .entry((record.rank, tag_of(record)))
            .or_default()
            .push(point_of(record));
    }

    let palette_index: HashMap<i64, usize> = grouped
        .keys()
        .map(|(rank, _)| *rank)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(i, rank)| (rank, i))
        .collect();

    let lines = grouped
        .into_iter()
        .map(|((rank, tag), points)| {
            let color = if highlighted.is_empty() {
                SeriesColor::Palette(palette_index[&rank])
            } else if tag == HIGHLIGHTED_TAG {
                SeriesColor::Highlighted
            } else {
                SeriesColor::Muted
            };
            RankLine {
                rank,
                tag,
                color,
                points,
            }
        })
        .collect();

    let overlay = highlighted
        .iter()
        .filter_map(|name| {
            let points: Vec<RankPoint> = base
                .iter()
                .copied()
                .filter(|r| r.name == *name)
                .map(point_of)
                .collect();
            (!points.is_empty()).then(|| HighlightLine {
                name: name.to_string(),
                points,
            })
        })
        .collect();

    let legend_title = if highlighted.is_empty() {
        "Rank"
    } else {
        "Highlight Status"
    };

    commands.push(UiCommand::Subheader("Number of Page Views per Rank".to_string()));
    commands.push(UiCommand::RankChart(RankChart {
        legend_title: legend_title.to_string(),
        lines,
        overlay,
    }));
}
