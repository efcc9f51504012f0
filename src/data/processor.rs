//! Data Processor Module
//! Turns the raw hotness CSV into the prepared table: sanitize names, sort by
//! (game_id, date), diff the cumulative views and drop the first calendar day.

use chrono::{NaiveDate, TimeDelta};
use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

/// Columns the hotness CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = ["game_id", "date", "name", "year", "rank", "views"];

/// Days between 0001-01-01 (CE day 1) and the unix epoch.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Invalid or missing value in column '{column}' at row {row}")]
    InvalidValue { column: &'static str, row: usize },
    #[error("Unparseable date at row {0}")]
    InvalidDate(usize),
    #[error("CSV contains no data rows")]
    Empty,
}

/// One row of the prepared table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotnessRecord {
    pub game_id: i64,
    pub date: NaiveDate,
    pub name: String,
    pub year: i64,
    pub rank: i64,
    pub views: i64,
    /// Views gained since the previous snapshot of the same game.
    pub views_diff: i64,
}

/// The cleaned, sorted, diffed and cutoff-filtered dataset.
///
/// Records stay ordered by `(game_id, date)`. The table is never mutated once
/// built; views derive filtered copies from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreparedTable {
    records: Vec<HotnessRecord>,
}

impl PreparedTable {
    /// Wrap records that already carry their final `views_diff`.
    /// Only the `(game_id, date)` ordering is restored.
    pub fn from_prepared(mut records: Vec<HotnessRecord>) -> Self {
        records.sort_by(|a, b| (a.game_id, a.date).cmp(&(b.game_id, b.date)));
        Self { records }
    }

    pub fn records(&self) -> &[HotnessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).min()
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }
}

/// Handles preparation of the hotness history.
pub struct DataProcessor;

impl DataProcessor {
    /// Parse CSV content and run the full preparation pipeline.
    pub fn prepare_csv(bytes: &[u8]) -> Result<PreparedTable, ParseError> {
        let raw = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        for column in REQUIRED_COLUMNS {
            if raw.column(column).is_err() {
                return Err(ParseError::MissingColumn(column));
            }
        }
        if raw.height() == 0 {
            return Err(ParseError::Empty);
        }

        // Normalize dtypes and order rows; dates come out as days since epoch
        let sorted = raw
            .lazy()
            .select([
                col("game_id").cast(DataType::Int64),
                col("date").cast(DataType::Date).cast(DataType::Int32),
                col("name").cast(DataType::String),
                col("year").cast(DataType::Int64),
                col("rank").cast(DataType::Int64),
                col("views").cast(DataType::Int64),
            ])
            .sort(
                ["game_id", "date"],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;

        let mut records = Self::extract_records(&sorted)?;
        Self::diff_views(&mut records);
        let records = Self::drop_first_day(records);

        debug!(rows = records.len(), "prepared hotness table");
        Ok(PreparedTable { records })
    }

    /// Build records from the normalized frame, sanitizing names on the way.
    fn extract_records(df: &DataFrame) -> Result<Vec<HotnessRecord>, ParseError> {
        let game_ids = df.column("game_id")?.as_materialized_series().i64()?.clone();
        let dates = df.column("date")?.as_materialized_series().i32()?.clone();
        let names = df.column("name")?.as_materialized_series().str()?.clone();
        let years = df.column("year")?.as_materialized_series().i64()?.clone();
        let ranks = df.column("rank")?.as_materialized_series().i64()?.clone();
        let views = df.column("views")?.as_materialized_series().i64()?.clone();

        let int_at = |ca: &Int64Chunked, column: &'static str, row: usize| {
            ca.get(row).ok_or(ParseError::InvalidValue { column, row })
        };

        (0..df.height())
            .map(|row| -> Result<HotnessRecord, ParseError> {
                let days = dates.get(row).ok_or(ParseError::InvalidDate(row))?;
                let date = days_to_date(days).ok_or(ParseError::InvalidDate(row))?;
                let name = names
                    .get(row)
                    .ok_or(ParseError::InvalidValue { column: "name", row })?;

                Ok(HotnessRecord {
                    game_id: int_at(&game_ids, "game_id", row)?,
                    date,
                    name: sanitize_name(name),
                    year: int_at(&years, "year", row)?,
                    rank: int_at(&ranks, "rank", row)?,
                    views: int_at(&views, "views", row)?,
                    views_diff: 0,
                })
            })
            .collect()
    }

    /// First difference of `views` per game. Expects records sorted by
    /// `(game_id, date)`; the first record of each game gets 0.
    pub fn diff_views(records: &mut [HotnessRecord]) {
        let mut previous: Option<(i64, i64)> = None;
        for record in records.iter_mut() {
            record.views_diff = match previous {
                Some((game_id, views)) if game_id == record.game_id => record.views - views,
                _ => 0,
            };
            previous = Some((record.game_id, record.views));
        }
    }

    /// Drop every record before `min(date) + 1 day`, computed over the whole table.
    pub fn drop_first_day(records: Vec<HotnessRecord>) -> Vec<HotnessRecord> {
        let Some(min_date) = records.iter().map(|r| r.date).min() else {
            return records;
        };
        let Some(cutoff) = min_date.checked_add_signed(TimeDelta::days(1)) else {
            return Vec::new();
        };
        records.into_iter().filter(|r| r.date >= cutoff).collect()
    }
}

/// Strip apostrophes so names render and quote cleanly downstream.
pub fn sanitize_name(name: &str) -> String {
    name.replace('\'', "")
}

fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(EPOCH_DAYS_FROM_CE)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn record(game_id: i64, day: u32, views: i64) -> HotnessRecord {
        HotnessRecord {
            game_id,
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            name: format!("Game {game_id}"),
            year: 2023,
            rank: game_id,
            views,
            views_diff: 0,
        }
    }

    #[test]
    fn epoch_days_map_to_dates() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(days_to_date(0), Some(epoch));
        assert_eq!(days_to_date(19_782), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn diff_restarts_at_each_game() {
        let mut records = vec![
            record(1, 1, 100),
            record(1, 2, 120),
            record(2, 1, 50),
            record(2, 2, 80),
        ];
        DataProcessor::diff_views(&mut records);
        let diffs: Vec<i64> = records.iter().map(|r| r.views_diff).collect();
        assert_eq!(diffs, vec![0, 20, 0, 30]);
    }

    #[test]
    fn cutoff_is_global_not_per_game() {
        // Game 2 first appears on day 2; its first row survives with diff 0
        let mut records = vec![
            record(1, 1, 10),
            record(1, 2, 15),
            record(2, 2, 40),
            record(2, 3, 44),
        ];
        DataProcessor::diff_views(&mut records);
        let kept = DataProcessor::drop_first_day(records);

        assert!(kept.iter().all(|r| r.date > NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[1].game_id, 2);
        assert_eq!(kept[1].views_diff, 0);
    }

    #[test]
    fn apostrophes_are_stripped() {
        assert_eq!(sanitize_name("King's Hall"), "Kings Hall");
        assert_eq!(sanitize_name("'Quoted'"), "Quoted");
        assert_eq!(sanitize_name("Plain"), "Plain");
    }

    #[test]
    fn prepares_two_games_over_three_days() {
        let csv = "game_id,date,name,year,rank,views\n\
                   2,2024-03-01,Beta,2022,2,50\n\
                   1,2024-03-01,Alpha,2023,1,100\n\
                   1,2024-03-02,Alpha,2023,1,120\n\
                   2,2024-03-02,Beta,2022,2,80\n\
                   1,2024-03-03,Alpha,2023,1,135\n\
                   2,2024-03-03,Beta,2022,2,95\n";
        let table = DataProcessor::prepare_csv(csv.as_bytes()).unwrap();

        let rows: Vec<(i64, u32, i64)> = table
            .records()
            .iter()
            .map(|r| (r.game_id, r.date.day(), r.views_diff))
            .collect();
        assert_eq!(rows, vec![(1, 2, 20), (1, 3, 15), (2, 2, 30), (2, 3, 15)]);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "game_id,date,name,year,rank\n1,2024-03-01,Alpha,2023,1\n";
        let err = DataProcessor::prepare_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn("views")));
    }

    #[test]
    fn header_only_csv_is_empty() {
        let csv = "game_id,date,name,year,rank,views\n";
        let err = DataProcessor::prepare_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::Empty | ParseError::Csv(_)));
    }

    #[test]
    fn malformed_date_fails() {
        let csv = "game_id,date,name,year,rank,views\n\
                   1,not-a-date,Alpha,2023,1,100\n\
                   1,2024-03-02,Alpha,2023,1,120\n";
        assert!(DataProcessor::prepare_csv(csv.as_bytes()).is_err());
    }
}
