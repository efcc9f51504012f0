//! Control Panel Widget
//! Left side panel with the data source, view mode, highlight toggles, date
//! range and the mode-specific selection controls.

use crate::view::{
    GameAction, RankAction, UiCommand, ViewMode, WidgetInputs, HIGHLIGHT_GAMES, TOP_GAMES_LARGE,
    TOP_GAMES_SMALL,
};
use chrono::NaiveDate;
use egui::{Color32, RichText, ScrollArea};
use egui_extras::DatePickerButton;
use std::path::Path;

/// Left side control panel.
pub struct ControlPanel {
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel. Widget changes are written into `inputs`;
    /// `sidebar` holds the controller's sidebar commands from this frame.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        csv_path: Option<&Path>,
        inputs: Option<&mut WidgetInputs>,
        bounds: Option<(NaiveDate, NaiveDate)>,
        sidebar: &[&UiCommand],
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🎲 BGG Hotness")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Daily views history")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = csv_path
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "No file selected".to_string());
                ui.label(RichText::new(&path_text).size(12.0));

                ui.horizontal(|ui| {
                    if ui.button("📂 Browse").clicked() {
                        action = ControlPanelAction::BrowseCsv;
                    }
                    if ui.button("🔄 Reload").clicked() {
                        action = ControlPanelAction::Reload;
                    }
                });
            });

        let (Some(inputs), Some((min, max))) = (inputs, bounds) else {
            ui.add_space(10.0);
            Self::show_status(ui, &self.status);
            return action;
        };

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== View Mode Section =====
        ui.label(RichText::new("⚙️ View Mode").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            for mode in [ViewMode::ByGame, ViewMode::ByRank] {
                ui.radio_value(&mut inputs.mode, mode, mode.label());
            }
        })
        .response
        .on_hover_text("Choose whether to compare daily new views by game or by rank.");

        ui.add_space(10.0);
        ui.label(RichText::new("⭐ Highlight Your Games").size(14.0).strong());
        ui.add_space(5.0);
        for (enabled, name) in inputs.highlights.0.iter_mut().zip(HIGHLIGHT_GAMES) {
            ui.checkbox(enabled, name);
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Date Range Section =====
        ui.label(RichText::new("📅 Date Range").size(14.0).strong());
        ui.add_space(5.0);
        egui::Grid::new("date_range").num_columns(2).show(ui, |ui| {
            ui.label("Start Date:");
            ui.add(DatePickerButton::new(&mut inputs.start_date).id_salt("start_date"));
            ui.end_row();
            ui.label("End Date:");
            ui.add(DatePickerButton::new(&mut inputs.end_date).id_salt("end_date"));
            ui.end_row();
        });
        inputs.start_date = inputs.start_date.clamp(min, max);
        inputs.end_date = inputs.end_date.clamp(min, max);

        for command in sidebar {
            if let UiCommand::SidebarError(message) = command {
                ui.label(
                    RichText::new(format!("❌ {message}"))
                        .size(12.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            }
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Selection Section =====
        for command in sidebar {
            match command {
                UiCommand::GameSelector { options, selected } => {
                    Self::show_game_selector(ui, inputs, options, selected);
                }
                UiCommand::RankSelector { options, selected } => {
                    Self::show_rank_selector(ui, inputs, options, selected);
                }
                _ => {}
            }
        }

        ui.add_space(15.0);
        ui.separator();
        Self::show_status(ui, &self.status);

        action
    }

    fn show_game_selector(
        ui: &mut egui::Ui,
        inputs: &mut WidgetInputs,
        options: &[String],
        selected: &[String],
    ) {
        ui.label(RichText::new("🎯 Select one or more games").size(14.0).strong())
            .on_hover_text("Pick multiple games to compare daily new views.");
        ui.add_space(5.0);

        ui.horizontal_wrapped(|ui| {
            if ui.small_button("Select All").clicked() {
                inputs.game_action = Some(GameAction::SelectAll);
            }
            if ui.small_button("None").clicked() {
                inputs.game_action = Some(GameAction::SelectNone);
            }
            if ui.small_button("TOP 7 (at end date)").clicked() {
                inputs.game_action = Some(GameAction::Top(TOP_GAMES_SMALL));
            }
            if ui.small_button("TOP 15 (at end date)").clicked() {
                inputs.game_action = Some(GameAction::Top(TOP_GAMES_LARGE));
            }
        });
        ui.add_space(5.0);

        Self::show_checklist(ui, "game_list", options, selected, |s| s.clone(), |edit| {
            inputs.game_edit = Some(edit);
        });
    }

    fn show_rank_selector(
        ui: &mut egui::Ui,
        inputs: &mut WidgetInputs,
        options: &[i64],
        selected: &[i64],
    ) {
        ui.label(RichText::new("🏅 Select one or more ranks").size(14.0).strong())
            .on_hover_text("Pick multiple ranks to compare daily new views.");
        ui.add_space(5.0);

        ui.horizontal_wrapped(|ui| {
            if ui.small_button("Select All").clicked() {
                inputs.rank_action = Some(RankAction::SelectAll);
            }
            if ui.small_button("Select None").clicked() {
                inputs.rank_action = Some(RankAction::SelectNone);
            }
            if ui.small_button("Select Default").clicked() {
                inputs.rank_action = Some(RankAction::SelectDefault);
            }
        });
        ui.add_space(5.0);

        Self::show_checklist(ui, "rank_list", options, selected, |r| r.to_string(), |edit| {
            inputs.rank_edit = Some(edit);
        });
    }

    /// Checkbox multiselect; a toggle reports the whole new selection.
    fn show_checklist<T: Clone + PartialEq>(
        ui: &mut egui::Ui,
        id: &str,
        options: &[T],
        selected: &[T],
        label: impl Fn(&T) -> String,
        mut on_edit: impl FnMut(Vec<T>),
    ) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(240.0)
                    .show(ui, |ui| {
                        for option in options {
                            let mut checked = selected.contains(option);
                            if ui.checkbox(&mut checked, label(option)).changed() {
                                let edit: Vec<T> = if checked {
                                    let mut edit = selected.to_vec();
                                    edit.push(option.clone());
                                    edit
                                } else {
                                    selected.iter().filter(|s| *s != option).cloned().collect()
                                };
                                on_edit(edit);
                            }
                        }
                    });
            });
    }

    fn show_status(ui: &mut egui::Ui, status: &str) {
        ui.add_space(5.0);
        let status_color = if status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(status).size(11.0).color(status_color));
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Reload,
}
