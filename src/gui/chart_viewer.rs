//! Chart Viewer Widget
//! Central scrollable panel that paints the controller's main-area commands.

use crate::charts::{ChartPlotter, TableSort};
use crate::view::UiCommand;
use chrono::NaiveDate;
use egui::{Color32, RichText, ScrollArea};
use egui_extras::DatePickerButton;

const WARNING_COLOR: Color32 = Color32::from_rgb(230, 160, 0);

/// Central panel painter. Holds only presentation state (table sort).
#[derive(Default)]
pub struct ChartViewer {
    pub table_sort: TableSort,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint `commands` top to bottom. The single-day picker writes into `single_day`.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        commands: &[&UiCommand],
        mut single_day: Option<&mut NaiveDate>,
        chart_height: f32,
    ) {
        if commands.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for command in commands {
                    match command {
                        UiCommand::Title(text) => {
                            ui.label(RichText::new(text).size(24.0).strong());
                            ui.add_space(8.0);
                        }
                        UiCommand::Header(text) => {
                            ui.add_space(20.0);
                            ui.separator();
                            ui.label(RichText::new(text).size(20.0).strong());
                            ui.add_space(6.0);
                        }
                        UiCommand::Subheader(text) => {
                            ui.label(RichText::new(text).size(16.0).strong());
                            ui.add_space(4.0);
                        }
                        UiCommand::Text(text) => {
                            ui.label(text);
                        }
                        UiCommand::Warning(text) => Self::draw_warning(ui, text),
                        UiCommand::GameChart(chart) => {
                            ChartPlotter::draw_game_chart(ui, chart, chart_height);
                        }
                        UiCommand::RankChart(chart) => {
                            ChartPlotter::draw_rank_chart(ui, chart, chart_height);
                        }
                        UiCommand::DayPicker { min, max, .. } => {
                            if let Some(day) = single_day.as_deref_mut() {
                                ui.horizontal(|ui| {
                                    ui.label("Pick a single day:");
                                    ui.add(DatePickerButton::new(day).id_salt("single_day_detail"));
                                });
                                *day = (*day).clamp(*min, *max);
                            }
                        }
                        UiCommand::DayTable(table) => {
                            ChartPlotter::draw_day_table(ui, table, &mut self.table_sort);
                        }
                        UiCommand::SidebarError(_)
                        | UiCommand::GameSelector { .. }
                        | UiCommand::RankSelector { .. } => {}
                    }
                }
            });
    }

    fn draw_warning(ui: &mut egui::Ui, text: &str) {
        egui::Frame::none()
            .stroke(egui::Stroke::new(1.0, WARNING_COLOR))
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(format!("⚠ {text}")).size(13.0).color(WARNING_COLOR));
            });
    }
}
