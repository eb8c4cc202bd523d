use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::shape::format_count;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Pengaturan Filter");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("Dataset belum dimuat.");
        return;
    };

    // ---- Year range ----
    ui.strong("Pilih rentang tahun");
    let mut start = state.selection.year_start.clone();
    let mut end = state.selection.year_end.clone();
    ui.horizontal(|ui: &mut Ui| {
        egui::ComboBox::from_id_salt("year_start")
            .selected_text(&start)
            .show_ui(ui, |ui: &mut Ui| {
                for year in &dataset.years {
                    ui.selectable_value(&mut start, year.clone(), year);
                }
            });
        ui.label("–");
        egui::ComboBox::from_id_salt("year_end")
            .selected_text(&end)
            .show_ui(ui, |ui: &mut Ui| {
                for year in dataset.years.iter().filter(|y| **y >= start) {
                    ui.selectable_value(&mut end, year.clone(), year);
                }
            });
    });
    if start != state.selection.year_start || end != state.selection.year_end {
        state.set_year_range(&start, &end);
    }
    ui.label(
        RichText::new(format!(
            "Periode data: {} sampai {}",
            state.selection.year_start, state.selection.year_end
        ))
        .small(),
    );
    ui.separator();

    // ---- Sector multiselect ----
    let n_selected = state.selection.sectors.len();
    let n_total = dataset.sectors.len();
    ui.strong(format!("Pilih sektor industri  ({n_selected}/{n_total})"));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("Semua").clicked() {
            state.select_all();
        }
        if ui.small_button("Kosongkan").clicked() {
            state.select_none();
        }
    });

    let mut toggled: Option<String> = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for sector in &dataset.sectors {
                let mut checked = state.selection.sectors.contains(sector);
                let text = RichText::new(sector).color(state.sector_colors.color_for(sector));
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(sector.clone());
                }
            }
        });

    if let Some(sector) = toggled {
        state.toggle_sector(&sector);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar with the summary metrics.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(RichText::new(state.cache.path().display().to_string()).weak());
        ui.separator();

        if let Some(Ok(view)) = &state.view {
            let s = &view.summary;
            ui.label(format!("Jumlah baris data: {}", format_count(s.row_count)));
            ui.separator();
            ui.label(format!("Jumlah sektor terpilih: {}", s.sector_count));
            ui.separator();
            ui.label(format!("Rentang tahun: {} - {}", s.year_min, s.year_max));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open price index data")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_path(path);
    }
}
