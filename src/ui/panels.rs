use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series selection
// ---------------------------------------------------------------------------

/// Render the left series panel: one enable checkbox and axis selector per
/// series.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Series");
    ui.separator();

    if !state.pipeline.is_loaded() {
        ui.label("No log loaded.");
        return;
    }

    let headers = state.pipeline.selectable_headers();
    let choices = state.axis_choices();

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.set_all(true);
        }
        if ui.small_button("None").clicked() {
            state.set_all(false);
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.new_axis)
                .hint_text("new axis")
                .desired_width(100.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.small_button("Add").clicked() || submitted {
            state.add_axis();
        }
    });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("series_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for header in &headers {
                        let mut enabled = state.is_enabled(header);
                        let mut axis = state.axis_of(header);
                        let text = RichText::new(header).color(state.colors.color_for(header));

                        let mut changed = ui.checkbox(&mut enabled, text).changed();

                        egui::ComboBox::from_id_salt(("axis", header))
                            .selected_text(axis.clone())
                            .width(70.0)
                            .show_ui(ui, |ui: &mut Ui| {
                                for id in &choices {
                                    if ui.selectable_value(&mut axis, id.clone(), id.as_str()).changed() {
                                        changed = true;
                                    }
                                }
                            });
                        ui.end_row();

                        if changed {
                            state.set_assignment(header, enabled, &axis);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let loaded = state.pipeline.is_loaded();
            if ui
                .add_enabled(loaded, egui::Button::new("Export series (CSV)…"))
                .clicked()
            {
                export_csv_dialog(state);
                ui.close_menu();
            }
            let drawn = state.pipeline.chart().is_some();
            if ui
                .add_enabled(drawn, egui::Button::new("Export chart (JSON)…"))
                .clicked()
            {
                export_chart_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(name) = &state.file_name {
            let rows = rusty_logview::data::model::row_count(state.pipeline.series());
            ui.label(format!(
                "{name}: {} series, {rows} rows, {} plotted",
                state.pipeline.selectable_headers().len(),
                state.pipeline.assignment().enabled_count()
            ));
        }

        ui.separator();

        ui.checkbox(&mut state.config.auto_redraw, "Auto redraw");
        if ui
            .add_enabled(state.pipeline.is_loaded(), egui::Button::new("Draw"))
            .clicked()
        {
            state.redraw();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open log")
        .add_filter("Logs", &["csv", "txt", "log"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

fn export_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export decoded series")
        .add_filter("CSV", &["csv"])
        .set_file_name("series.csv")
        .save_file();

    if let Some(path) = file {
        state.export_csv(&path);
    }
}

fn export_chart_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart")
        .add_filter("JSON", &["json"])
        .set_file_name("chart.json")
        .save_file();

    if let Some(path) = file {
        state.export_chart(&path);
    }
}
