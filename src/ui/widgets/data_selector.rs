use crate::ui::services::DataLoader;
use crate::ui::state::AppState;

pub struct DataSelector;

impl DataSelector {
    pub fn show(ui: &mut egui::Ui, state: &mut AppState) {
        ui.horizontal(|ui| {
            if ui.button("Select CSV File...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("CSV Files", &["csv"])
                    .pick_file()
                {
                    let result = DataLoader::load_file(&mut state.session, &path);
                    Self::apply(state, result);
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("URL:");
            ui.text_edit_singleline(&mut state.url_input);
        });
        if ui.button("Download").clicked() {
            let url = state.url_input.clone();
            let result = DataLoader::load_url(&mut state.session, &url);
            Self::apply(state, result);
        }

        ui.separator();

        // Current table info
        match (state.session.source(), state.session.table()) {
            (Some(source), Some(table)) => {
                ui.label(format!("Source: {}", source));
                ui.label(format!("Rows: {}", table.len()));
                if let Some((first, last)) = table.date_span() {
                    ui.label(format!(
                        "Dates: {} to {}",
                        first.format("%Y-%m-%d"),
                        last.format("%Y-%m-%d")
                    ));
                }

                ui.collapsing("Preview", |ui| {
                    egui::ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                        egui::Grid::new("data_preview_grid")
                            .striped(true)
                            .show(ui, |ui| {
                                ui.label("date");
                                for column in table.columns() {
                                    ui.label(column);
                                }
                                ui.end_row();

                                for record in table.records().iter().take(20) {
                                    ui.label(record.date.format("%Y-%m-%d").to_string());
                                    for value in &record.values {
                                        match value {
                                            Some(v) => ui.label(format!("{:.2}", v)),
                                            None => ui.weak("-"),
                                        };
                                    }
                                    ui.end_row();
                                }
                            });
                    });
                });
            }
            _ => {
                ui.label("No data loaded");
            }
        }
    }

    fn apply(state: &mut AppState, result: Result<String, String>) {
        match result {
            Ok(message) => {
                state.status_message = message;
                state.on_data_loaded();
            }
            Err(e) => {
                state.status_message = format!("Error loading data: {}", e);
            }
        }
    }
}
