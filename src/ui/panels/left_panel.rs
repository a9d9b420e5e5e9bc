use crate::config::analysis::MAX_TREND_DEGREE;
use crate::data::dates::validate_date_format;
use crate::data::ConsumptionKind;
use crate::engines::analysis::validate_threshold_value;
use crate::ui::services::AnalysisRunner;
use crate::ui::state::{AppState, PlotType};
use crate::ui::widgets::DataSelector;

pub struct LeftPanel;

impl LeftPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.heading("Configuration");
        ui.separator();

        // 1. Data Selection Section
        ui.collapsing("Data Selection", |ui| {
            DataSelector::show(ui, state);
        });

        ui.separator();

        // 2. Query Parameters Section
        ui.collapsing("Query Parameters", |ui| {
            Self::show_query_params(ui, state);
        });

        ui.separator();

        // 3. Plot Options Section
        ui.collapsing("Plot Options", |ui| {
            Self::show_plot_options(ui, state);
        });

        ui.separator();

        // 4. Control Buttons
        Self::show_control_buttons(ui, state);
    }

    fn show_query_params(ui: &mut egui::Ui, state: &mut AppState) {
        ui.horizontal(|ui| {
            ui.label("Start (YYYY-MM-DD):");
            ui.text_edit_singleline(&mut state.start_date);
        });

        ui.horizontal(|ui| {
            ui.label("End (YYYY-MM-DD):");
            ui.text_edit_singleline(&mut state.end_date);
        });

        ui.horizontal(|ui| {
            ui.label("Consumption:");
            egui::ComboBox::from_id_salt("consumption_kind")
                .selected_text(state.kind.to_string())
                .show_ui(ui, |ui| {
                    for kind in ConsumptionKind::all() {
                        ui.selectable_value(&mut state.kind, kind, kind.to_string());
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Threshold:");
            ui.text_edit_singleline(&mut state.threshold);
        });
    }

    fn show_plot_options(ui: &mut egui::Ui, state: &mut AppState) {
        ui.horizontal(|ui| {
            ui.label("Plot Type:");
            egui::ComboBox::from_id_salt("plot_type")
                .selected_text(format!("{:?}", state.plot_type))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut state.plot_type, PlotType::Line, "Line");
                    ui.selectable_value(&mut state.plot_type, PlotType::Bar, "Bar");
                });
        });

        ui.checkbox(&mut state.show_trend, "Show trend");

        if state.show_trend {
            ui.horizontal(|ui| {
                ui.label("  Degree:");
                ui.add(egui::DragValue::new(&mut state.trend_degree).range(1..=MAX_TREND_DEGREE));
            });
        }
    }

    fn show_control_buttons(ui: &mut egui::Ui, state: &mut AppState) {
        ui.vertical_centered(|ui| {
            let validation_error = Self::validate_query(state).err();
            let can_run = validation_error.is_none();

            if ui.add_enabled(can_run, egui::Button::new("Analyze")).clicked() {
                Self::run_analysis(state);
            }

            if ui.add_enabled(can_run, egui::Button::new("Plot")).clicked() {
                Self::run_plot(state);
            }

            if ui
                .add_enabled(state.period.is_some(), egui::Button::new("Export Period CSV..."))
                .clicked()
            {
                Self::export_period(state);
            }

            if let Some(error) = validation_error {
                ui.colored_label(egui::Color32::RED, error);
            }
        });
    }

    fn validate_query(state: &AppState) -> Result<(), String> {
        if !state.session.has_data() {
            return Err("No data loaded".to_string());
        }

        if !validate_date_format(&state.start_date) || !validate_date_format(&state.end_date) {
            return Err("Dates must be YYYY-MM-DD".to_string());
        }

        if !state.threshold.trim().is_empty() && !validate_threshold_value(&state.threshold) {
            return Err("Threshold must be a number".to_string());
        }

        Ok(())
    }

    fn run_analysis(state: &mut AppState) {
        match AnalysisRunner::run(
            &state.session,
            &state.start_date,
            &state.end_date,
            state.kind,
            &state.threshold,
        ) {
            Ok(report) => {
                state.status_message = format!(
                    "Analyzed {} consumption from {} to {}",
                    state.kind, state.start_date, state.end_date
                );
                state.report = Some(report);
            }
            Err(e) => {
                state.report = None;
                state.status_message = format!("Error: {}", e);
            }
        }
    }

    fn run_plot(state: &mut AppState) {
        let degree = state.show_trend.then_some(state.trend_degree);
        match AnalysisRunner::plot_data(
            &state.session,
            &state.start_date,
            &state.end_date,
            state.kind,
            degree,
        ) {
            Ok(Some(plot)) => {
                state.status_message = format!("Plotting {} points of '{}'", plot.period.len(), plot.period.column);
                state.period = Some(plot.period);
                state.trend = plot.trend;
            }
            Ok(None) => {
                state.period = None;
                state.trend = None;
                state.status_message = "No data available for the selected period".to_string();
            }
            Err(e) => {
                state.period = None;
                state.trend = None;
                state.status_message = format!("Error: {}", e);
            }
        }
    }

    fn export_period(state: &mut AppState) {
        let Some(period) = &state.period else {
            return;
        };
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("period.csv")
            .save_file()
        {
            state.status_message = match period.write_csv(&path) {
                Ok(()) => format!("Exported {} rows to {}", period.len(), path.display()),
                Err(e) => format!("Export failed: {}", e),
            };
        }
    }
}
