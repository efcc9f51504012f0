use bgg_hotness::data::{DataLoader, DataProcessor, HotnessRecord, LoadError};
use chrono::NaiveDate;
use proptest::prelude::*;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

/// Build a CSV with one row per (game, day); `views[g][d]` is cumulative.
fn csv_from(views: &[Vec<i64>], names: &[&str]) -> String {
    let mut csv = String::from("game_id,date,name,year,rank,views\n");
    for (g, series) in views.iter().enumerate() {
        for (d, v) in series.iter().enumerate() {
            csv.push_str(&format!(
                "{},{},{},2020,{},{}\n",
                g + 1,
                day(d as u32 + 1),
                names[g % names.len()],
                g + 1,
                v
            ));
        }
    }
    csv
}

#[test]
fn two_games_three_days_scenario() {
    let csv = csv_from(&[vec![100, 120, 135], vec![50, 80, 95]], &["Alpha", "Beta"]);
    let table = DataProcessor::prepare_csv(csv.as_bytes()).expect("valid csv");

    let by_key: HashMap<(i64, NaiveDate), i64> = table
        .records()
        .iter()
        .map(|r| ((r.game_id, r.date), r.views_diff))
        .collect();

    assert_eq!(by_key.len(), 4);
    assert!(table.records().iter().all(|r| r.date != day(1)));
    assert_eq!(by_key[&(1, day(2))], 20);
    assert_eq!(by_key[&(2, day(2))], 30);
    assert_eq!(by_key[&(1, day(3))], 15);
    assert_eq!(by_key[&(2, day(3))], 15);
}

#[test]
fn apostrophes_are_removed_from_names() {
    let csv = "game_id,date,name,year,rank,views\n\
               7,2024-01-01,King's Hall,2021,3,10\n\
               7,2024-01-02,King's Hall,2021,3,18\n";
    let table = DataProcessor::prepare_csv(csv.as_bytes()).expect("valid csv");
    assert_eq!(table.records()[0].name, "Kings Hall");
}

#[test]
fn unsorted_input_is_ordered_by_game_then_date() {
    let csv = "game_id,date,name,year,rank,views\n\
               2,2024-01-03,B,2020,2,30\n\
               1,2024-01-03,A,2020,1,9\n\
               2,2024-01-02,B,2020,2,20\n\
               1,2024-01-01,A,2020,1,1\n\
               1,2024-01-02,A,2020,1,4\n";
    let table = DataProcessor::prepare_csv(csv.as_bytes()).expect("valid csv");
    let rows: Vec<(i64, NaiveDate, i64)> = table
        .records()
        .iter()
        .map(|r| (r.game_id, r.date, r.views_diff))
        .collect();

    // Game 2's first surviving row has no prior day inside its own history
    assert_eq!(
        rows,
        vec![(1, day(2), 3), (1, day(3), 5), (2, day(2), 0), (2, day(3), 10)]
    );
}

#[test]
fn loader_reads_files_and_reuses_cache() {
    let csv = csv_from(&[vec![1, 2, 3]], &["Solo"]);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(csv.as_bytes()).unwrap();

    let mut loader = DataLoader::new();
    let first = loader.load_path(file.path()).expect("loads");
    let second = loader.load_path(file.path()).expect("loads again");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.get_file_path().map(|p| p.as_path()), Some(file.path()));
    assert_eq!(first.len(), 2);
}

#[test]
fn loader_reports_parse_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"game_id,date,name\n1,2024-01-01,A\n").unwrap();

    let mut loader = DataLoader::new();
    let err = loader.load_path(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
    assert!(loader.cache().is_empty());
}

fn views_strategy() -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(
        prop::collection::vec(0i64..10_000, 1..6).prop_map(|mut v| {
            // cumulative views never shrink
            v.sort_unstable();
            v
        }),
        1..5,
    )
}

proptest! {
    #[test]
    fn first_record_of_each_game_has_zero_diff(views in views_strategy()) {
        let mut records: Vec<HotnessRecord> = views
            .iter()
            .enumerate()
            .flat_map(|(g, series)| {
                series.iter().enumerate().map(move |(d, v)| HotnessRecord {
                    game_id: g as i64,
                    date: day(d as u32 + 1),
                    name: format!("G{g}"),
                    year: 2020,
                    rank: g as i64 + 1,
                    views: *v,
                    views_diff: -1,
                })
            })
            .collect();
        DataProcessor::diff_views(&mut records);

        let mut seen = std::collections::HashSet::new();
        for record in &records {
            if seen.insert(record.game_id) {
                prop_assert_eq!(record.views_diff, 0);
            }
        }
    }

    #[test]
    fn surviving_rows_diff_against_previous_day(views in views_strategy()) {
        let csv = csv_from(&views, &["A", "B", "C", "D", "E"]);
        let table = DataProcessor::prepare_csv(csv.as_bytes()).unwrap();

        let mut seen = std::collections::HashSet::new();
        for record in table.records() {
            if seen.insert(record.game_id) {
                let series = &views[(record.game_id - 1) as usize];
                // Every game starts on day 1, so its first surviving row is day 2
                prop_assert_eq!(record.views_diff, series[1] - series[0]);
            }
        }
    }

    #[test]
    fn minimum_date_never_survives(views in views_strategy()) {
        let csv = csv_from(&views, &["A", "B", "C", "D", "E"]);
        let table = DataProcessor::prepare_csv(csv.as_bytes()).unwrap();
        prop_assert!(table.records().iter().all(|r| r.date > day(1)));
    }

    #[test]
    fn preparation_is_idempotent(views in views_strategy()) {
        let csv = csv_from(&views, &["A", "B", "C", "D", "E"]);
        let a = DataProcessor::prepare_csv(csv.as_bytes()).unwrap();
        let b = DataProcessor::prepare_csv(csv.as_bytes()).unwrap();
        prop_assert_eq!(a, b);
    }
}
