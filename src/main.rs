use eframe::NativeOptions;
use energy_analyzer::config::manager::DEFAULT_CONFIG_FILE;
use energy_analyzer::config::ConfigManager;
use energy_analyzer::ui::EnergyAnalyzerApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let manager = ConfigManager::new();
    if let Err(e) = manager.load_from_file(DEFAULT_CONFIG_FILE) {
        log::warn!("Using default configuration: {}", e);
    }
    let config = manager.get();

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Energy Consumption Analyzer"),
        ..Default::default()
    };

    eframe::run_native(
        "EnergyAnalyzer",
        native_options,
        Box::new(move |cc| Ok(Box::new(EnergyAnalyzerApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))
}
