//! Single-day hotness table.

use super::commands::{DayRow, DayTable, UiCommand};
use crate::data::PreparedTable;
use chrono::NaiveDate;

pub const HEADER: &str = "View of old Hotness List";

/// Rows of one day, ordered by rank.
pub fn day_rows(table: &PreparedTable, day: NaiveDate) -> Vec<DayRow> {
    let mut rows: Vec<DayRow> = table
        .records()
        .iter()
        .filter(|r| r.date == day)
        .map(|r| DayRow {
            rank: r.rank,
            game_id: r.game_id,
            name: r.name.clone(),
            year: r.year,
            views: r.views,
            views_diff: r.views_diff,
        })
        .collect();
    rows.sort_by_key(|r| r.rank);
    rows
}

pub fn render_day_table(table: &PreparedTable, day: NaiveDate) -> Vec<UiCommand> {
    let mut commands = vec![UiCommand::Header(HEADER.to_string())];

    let (Some(min), Some(max)) = (table.min_date(), table.max_date()) else {
        commands.push(UiCommand::Warning("No data loaded.".to_string()));
        return commands;
    };
    let day = day.clamp(min, max);
    commands.push(UiCommand::DayPicker {
        value: day,
        min,
        max,
    });

    let rows = day_rows(table, day);
    if rows.is_empty() {
        commands.push(UiCommand::Warning(format!("No data found for {day}.")));
        return commands;
    }

    commands.push(UiCommand::Text(format!("Hotness for {day}:")));
    commands.push(UiCommand::DayTable(DayTable { date: day, rows }));
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::HotnessRecord;

    fn record(game_id: i64, day: u32, rank: i64) -> HotnessRecord {
        HotnessRecord {
            game_id,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            name: format!("Game {game_id}"),
            year: 2020,
            rank,
            views: 500,
            views_diff: 5,
        }
    }

    #[test]
    fn rows_are_ranked() {
        let table =
            PreparedTable::from_prepared(vec![record(1, 2, 3), record(2, 2, 1), record(3, 2, 2)]);
        let day = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let ranks: Vec<i64> = day_rows(&table, day).iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn gap_day_warns_without_table() {
        // Coverage has a hole on the 3rd
        let table = PreparedTable::from_prepared(vec![record(1, 2, 1), record(1, 4, 1)]);
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let commands = render_day_table(&table, day);

        assert!(commands
            .iter()
            .any(|c| matches!(c, UiCommand::Warning(w) if w == "No data found for 2024-06-03.")));
        assert!(!commands.iter().any(|c| matches!(c, UiCommand::DayTable(_))));
    }

    #[test]
    fn out_of_range_day_is_clamped() {
        let table = PreparedTable::from_prepared(vec![record(1, 2, 1), record(1, 4, 1)]);
        let late = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let commands = render_day_table(&table, late);

        let max = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        assert!(commands
            .iter()
            .any(|c| matches!(c, UiCommand::DayPicker { value, .. } if *value == max)));
        assert!(commands
            .iter()
            .any(|c| matches!(c, UiCommand::DayTable(t) if t.date == max)));
    }
}
