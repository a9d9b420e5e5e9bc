use crate::ui::services::AnalysisRunner;
use crate::ui::state::AppState;
use crate::ui::widgets::ConsumptionChart;

pub struct MainPanel;

impl MainPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.heading("Results");

        ui.separator();

        ui.label(&state.status_message);

        ui.separator();

        if let Some(report) = &state.report {
            egui::Grid::new("analysis_results")
                .striped(true)
                .show(ui, |ui| {
                    ui.label("Consumption");
                    ui.label(report.kind.to_string());
                    ui.end_row();

                    ui.label("Minimum");
                    ui.label(AnalysisRunner::describe(&report.minimum));
                    ui.end_row();

                    ui.label("Maximum");
                    ui.label(AnalysisRunner::describe(&report.maximum));
                    ui.end_row();

                    ui.label("Average");
                    ui.label(AnalysisRunner::describe(&report.average));
                    ui.end_row();

                    if let (Some(threshold), Some(above), Some(below)) =
                        (report.threshold, &report.above, &report.below)
                    {
                        ui.label(format!("Above {}", threshold));
                        ui.label(AnalysisRunner::describe(above));
                        ui.end_row();

                        ui.label(format!("Below {}", threshold));
                        ui.label(AnalysisRunner::describe(below));
                        ui.end_row();
                    }
                });

            ui.separator();
        }

        match &state.period {
            Some(period) => {
                ConsumptionChart::show(
                    ui,
                    &period.column,
                    &period.points,
                    state.trend.as_deref(),
                    state.plot_type,
                );
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("No plot yet. Load data and click 'Plot'.");
                });
            }
        }
    }
}
