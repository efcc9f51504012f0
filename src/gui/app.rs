//! BGG Hotness Main Application
//! Main window with control panel and chart viewer.
//!
//! Every frame runs the view controller against the prepared table and the
//! session store, then paints the resulting commands. Widget changes made
//! while painting feed the next frame.

use crate::config::DashboardConfig;
use crate::data::{DataLoader, PreparedTable};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::view::{self, Placement, SessionState, UiCommand, WidgetInputs};
use egui::{RichText, SidePanel};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Main application window.
pub struct HotnessApp {
    config: DashboardConfig,
    loader: DataLoader,
    table: Option<Arc<PreparedTable>>,
    load_error: Option<String>,

    // Survives across frames of this session
    session: SessionState,
    inputs: Option<WidgetInputs>,

    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl HotnessApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            loader: DataLoader::new(),
            table: None,
            load_error: None,
            session: SessionState::new(),
            inputs: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            config,
        };
        let path = app.config.csv_path.clone();
        app.load(path);
        app
    }

    /// Load (or re-load) a CSV. Unchanged content keeps the current selections.
    fn load(&mut self, path: PathBuf) {
        match self.loader.load_path(&path) {
            Ok(table) => {
                let unchanged = self
                    .table
                    .as_ref()
                    .is_some_and(|current| Arc::ptr_eq(current, &table));
                if !unchanged {
                    self.session.clear();
                    self.inputs = WidgetInputs::for_table(&table);
                    self.chart_viewer = ChartViewer::new();
                }

                self.control_panel
                    .set_status(&format!("Loaded {} rows", table.len()));
                self.table = Some(table);
                self.load_error = None;
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load hotness history");
                self.control_panel.set_status(&format!("Error: {e}"));
                self.load_error = Some(e.to_string());
                self.table = None;
                self.inputs = None;
            }
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            info!(path = %path.display(), "csv selected");
            self.load(path);
        }
    }

    fn handle_reload(&mut self) {
        let path = self
            .loader
            .get_file_path()
            .cloned()
            .unwrap_or_else(|| self.config.csv_path.clone());
        self.load(path);
    }
}

impl eframe::App for HotnessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let commands: Vec<UiCommand> = match (&self.table, self.inputs.as_mut()) {
            (Some(table), Some(inputs)) => {
                let commands = view::render(table, &mut self.session, inputs);
                inputs.clear_pending();
                commands
            }
            _ => Vec::new(),
        };
        let (sidebar, main): (Vec<&UiCommand>, Vec<&UiCommand>) = commands
            .iter()
            .partition(|c| c.placement() == Placement::Sidebar);

        let before = self.inputs.clone();
        let bounds = self
            .table
            .as_ref()
            .and_then(|t| Some((t.min_date()?, t.max_date()?)));
        let csv_path = self.loader.get_file_path().cloned();

        // Left panel - Control Panel
        let mut action = ControlPanelAction::None;
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    action = self.control_panel.show(
                        ui,
                        csv_path.as_deref(),
                        self.inputs.as_mut(),
                        bounds,
                        &sidebar,
                    );
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.load_error {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("Could not load data:\n{error}"))
                            .size(16.0)
                            .color(egui::Color32::from_rgb(220, 53, 69)),
                    );
                });
                return;
            }
            self.chart_viewer.show(
                ui,
                &main,
                self.inputs.as_mut().map(|i| &mut i.single_day),
                self.config.chart_height,
            );
        });

        match action {
            ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
            ControlPanelAction::Reload => self.handle_reload(),
            ControlPanelAction::None => {}
        }

        // Rerun right away so this frame's widget changes are rendered
        if self.inputs != before {
            ctx.request_repaint();
        }
    }
}
