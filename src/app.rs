use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PriceDashboardApp {
    pub state: AppState,
}

impl PriceDashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for PriceDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + metrics ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts + table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &mut self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboard Indeks Harga Industri Domestik");
    ui.label(
        "Indeks harga industri domestik diringkas menjadi rata-rata tahunan \
         per sektor (Base 2021=100).",
    );
    ui.add_space(6.0);

    let view = match &state.view {
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Dataset tidak tersedia  (File → Open…)");
            });
            return;
        }
        Some(Err(DashboardError::EmptySelection)) => {
            ui.label(
                RichText::new(
                    "Tidak ada data untuk kombinasi filter saat ini. \
                     Silakan ubah filter di sidebar.",
                )
                .color(Color32::from_rgb(230, 170, 40)),
            );
            return;
        }
        Some(Err(e)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
            return;
        }
        Some(Ok(view)) => view,
    };
    let sectors = &state.sector_colors;
    let years = &state.year_colors;

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(2, |cols| {
                cols[0].strong("Bar Chart: Rata-rata indeks tahunan per sektor");
                charts::sector_bar_chart(&mut cols[0], view, sectors);
                cols[1].strong("Line Chart: Tren indeks tahunan per sektor");
                charts::trend_line_chart(&mut cols[1], view, sectors);
            });
            ui.separator();

            ui.columns(2, |cols| {
                cols[0].strong("Pie Chart: Proporsi rata-rata indeks tahunan per sektor");
                charts::share_pie_chart(&mut cols[0], &view.shares, sectors);
                cols[1].strong("Scatter Plot: Sebaran indeks tahunan per sektor");
                charts::yearly_scatter_chart(&mut cols[1], view, sectors);
            });
            ui.separator();

            ui.strong("Komposisi indeks tahunan per sektor dan tahun");
            ui.columns(2, |cols| {
                cols[0].label("Stacked Vertical Bar Chart: per tahun dan sektor");
                charts::stacked_by_year_chart(&mut cols[0], view, sectors);
                cols[1].label("Stacked Horizontal Bar Chart: per sektor dan tahun");
                charts::stacked_by_sector_chart(&mut cols[1], view, years);
            });
            ui.separator();

            ui.strong("Tabel data tahunan per sektor");
            clicked = table::detail_table(ui, view, state.detail_sort);
        });

    if let Some(column) = clicked {
        state.sort_detail(column);
    }
}
