use super::panels::{LeftPanel, MainPanel};
use super::state::AppState;
use crate::config::AppConfig;

pub struct EnergyAnalyzerApp {
    state: AppState,
    left_panel: LeftPanel,
    main_panel: MainPanel,
}

impl Default for EnergyAnalyzerApp {
    fn default() -> Self {
        Self::with_config(AppConfig::default())
    }
}

impl EnergyAnalyzerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
            left_panel: LeftPanel::new(),
            main_panel: MainPanel::new(),
        }
    }
}

impl eframe::App for EnergyAnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Energy Consumption Analyzer");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(source) = self.state.session.source() {
                        ui.label(source.to_string());
                    }
                });
            });
        });

        // Left Panel - Data & Query
        egui::SidePanel::left("left_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.left_panel.show(ui, &mut self.state);
                });
            });

        // Central Panel - Results & Chart
        egui::CentralPanel::default().show(ctx, |ui| {
            self.main_panel.show(ui, &mut self.state);
        });
    }
}
