//! Chart Plotter Module
//! Draws the dashboard charts and the single-day table with egui_plot / egui.

use crate::view::{DayRow, DayTable, GameChart, RankChart, RankPoint, SeriesColor, DAY_TABLE_COLUMNS};
use chrono::{Datelike, NaiveDate};
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints};
use std::collections::HashMap;

/// Emphasis color for highlighted games
pub const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(255, 0, 0);
/// Everything that is not highlighted while a highlight is on
pub const MUTED_COLOR: Color32 = Color32::from_rgb(170, 170, 170);

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const BASE_LINE_WIDTH: f32 = 1.5;
const OVERLAY_LINE_WIDTH: f32 = 3.0;

/// Sort state of the single-day table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableSort {
    /// Index into [`DAY_TABLE_COLUMNS`]
    pub column: usize,
    pub descending: bool,
}

impl TableSort {
    /// Clicking the active column flips direction, another column sorts ascending.
    pub fn toggle(&mut self, column: usize) {
        if self.column == column {
            self.descending = !self.descending;
        } else {
            self.column = column;
            self.descending = false;
        }
    }

    pub fn apply<'a>(&self, rows: &'a [DayRow]) -> Vec<&'a DayRow> {
        let mut sorted: Vec<&DayRow> = rows.iter().collect();
        sorted.sort_by(|a, b| {
            let ord = match self.column {
                1 => a.game_id.cmp(&b.game_id),
                2 => a.name.cmp(&b.name),
                3 => a.year.cmp(&b.year),
                4 => a.views.cmp(&b.views),
                5 => a.views_diff.cmp(&b.views_diff),
                _ => a.rank.cmp(&b.rank),
            };
            if self.descending {
                ord.reverse()
            } else {
                ord
            }
        });
        sorted
    }
}

/// Draws dashboard visualizations.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn series_color(color: SeriesColor) -> Color32 {
        match color {
            SeriesColor::Highlighted => HIGHLIGHT_COLOR,
            SeriesColor::Muted => MUTED_COLOR,
            SeriesColor::Palette(i) => PALETTE[i % PALETTE.len()],
        }
    }

    fn day_x(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    fn day_label(x: f64) -> String {
        NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    fn date_axis(mark: egui_plot::GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
        // Only whole days carry a label
        if (mark.value - mark.value.round()).abs() < 1e-6 {
            Self::day_label(mark.value)
        } else {
            String::new()
        }
    }

    /// Multi-series line chart of the by-game pivot.
    pub fn draw_game_chart(ui: &mut egui::Ui, chart: &GameChart, height: f32) {
        Plot::new("game_chart")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("date")
            .y_axis_label("views_diff")
            .x_axis_formatter(Self::date_axis)
            .label_formatter(|name, value: &PlotPoint| {
                let date = Self::day_label(value.x);
                if name.is_empty() {
                    format!("date: {date}\nviews_diff: {:.0}", value.y)
                } else {
                    format!("{name}\ndate: {date}\nviews_diff: {:.0}", value.y)
                }
            })
            .show(ui, |plot_ui| {
                for series in &chart.series {
                    let points: Vec<[f64; 2]> = chart
                        .dates
                        .iter()
                        .zip(&series.values)
                        .map(|(date, value)| [Self::day_x(*date), *value as f64])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::new(points))
                            .name(&series.name)
                            .color(Self::series_color(series.color))
                            .width(BASE_LINE_WIDTH),
                    );
                }
            });
    }

    /// Rank lines plus the heavier overlay for highlighted games.
    pub fn draw_rank_chart(ui: &mut egui::Ui, chart: &RankChart, height: f32) {
        // Tooltips need rank and name per point, which the plot cannot carry itself
        let mut lookup: HashMap<(String, i32), RankPoint> = HashMap::new();
        for line in &chart.lines {
            let label = Self::rank_line_label(line.rank, &line.tag);
            for point in &line.points {
                lookup.insert((label.clone(), point.date.num_days_from_ce()), point.clone());
            }
        }
        let overlay_names: Vec<String> = chart.overlay.iter().map(|l| l.name.clone()).collect();
        for line in &chart.overlay {
            for point in &line.points {
                lookup.insert((line.name.clone(), point.date.num_days_from_ce()), point.clone());
            }
        }

        ui.label(RichText::new(&chart.legend_title).size(12.0).color(Color32::GRAY));

        Plot::new("rank_chart")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("date")
            .y_axis_label("views_diff")
            .x_axis_formatter(Self::date_axis)
            .label_formatter(move |name, value: &PlotPoint| {
                let key = (name.to_string(), value.x.round() as i32);
                match lookup.get(&key) {
                    Some(p) if overlay_names.iter().any(|n| n == name) => format!(
                        "date: {}\nrank: {}\nviews_diff: {}\nname: {}",
                        p.date, p.rank, p.views_diff, p.name
                    ),
                    Some(p) => format!(
                        "date: {}\nrank: {}\nviews_diff: {}",
                        p.date, p.rank, p.views_diff
                    ),
                    None => format!("{}\nviews_diff: {:.0}", Self::day_label(value.x), value.y),
                }
            })
            .show(ui, |plot_ui| {
                for line in &chart.lines {
                    let points: Vec<[f64; 2]> = line
                        .points
                        .iter()
                        .map(|p| [Self::day_x(p.date), p.views_diff as f64])
                        .collect();
                    plot_ui.line(
                        Line::new(PlotPoints::new(points))
                            .name(Self::rank_line_label(line.rank, &line.tag))
                            .color(Self::series_color(line.color))
                            .width(BASE_LINE_WIDTH),
                    );
                }

                for line in &chart.overlay {
                    let points: Vec<[f64; 2]> = line
                        .points
                        .iter()
                        .map(|p| [Self::day_x(p.date), p.views_diff as f64])
                        .collect();
                    plot_ui.line(
                        Line::new(PlotPoints::new(points))
                            .name(&line.name)
                            .color(HIGHLIGHT_COLOR)
                            .width(OVERLAY_LINE_WIDTH),
                    );
                }
            });
    }

    fn rank_line_label(rank: i64, tag: &str) -> String {
        if tag == rank.to_string() {
            format!("Rank {rank}")
        } else {
            format!("Rank {rank} ({tag})")
        }
    }

    /// Draw the single-day table; header clicks change `sort`.
    pub fn draw_day_table(ui: &mut egui::Ui, table: &DayTable, sort: &mut TableSort) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("day_table_{}", table.date)))
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        // Headers
                        for (i, column) in DAY_TABLE_COLUMNS.iter().enumerate() {
                            let arrow = match (sort.column == i, sort.descending) {
                                (true, false) => " ⏶",
                                (true, true) => " ⏷",
                                _ => "",
                            };
                            let header = RichText::new(format!("{column}{arrow}")).strong().size(12.0);
                            if ui.button(header).clicked() {
                                sort.toggle(i);
                            }
                        }
                        ui.end_row();

                        for row in sort.apply(&table.rows) {
                            ui.label(RichText::new(row.rank.to_string()).size(12.0));
                            ui.label(RichText::new(row.game_id.to_string()).size(12.0));
                            ui.label(RichText::new(&row.name).size(12.0));
                            ui.label(RichText::new(row.year.to_string()).size(12.0));
                            ui.label(RichText::new(row.views.to_string()).size(12.0));
                            ui.label(RichText::new(row.views_diff.to_string()).size(12.0));
                            ui.end_row();
                        }
                    });
            });
    }
}
