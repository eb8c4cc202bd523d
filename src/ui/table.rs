use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::shape::{format_index, DetailColumn, DetailSort};
use crate::data::view::DashboardView;

const ROW_HEIGHT: f32 = 20.0;

/// Detail table of yearly means, already ordered by `sort`.
/// Returns the header the user clicked, if any.
pub fn detail_table(
    ui: &mut Ui,
    view: &DashboardView,
    sort: DetailSort,
) -> Option<DetailColumn> {
    let mut clicked: Option<DetailColumn> = None;

    TableBuilder::new(ui)
        .id_salt("detail_table")
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder().at_least(200.0))
        .column(Column::auto().at_least(110.0))
        .vscroll(false)
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for column in DetailColumn::ALL {
                header.col(|ui| {
                    let arrow = match (sort.column == column, sort.ascending) {
                        (true, true) => " ▲",
                        (true, false) => " ▼",
                        (false, _) => "",
                    };
                    if ui
                        .button(format!("{}{arrow}", column.title()))
                        .clicked()
                    {
                        clicked = Some(column);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, view.detail.len(), |mut row| {
                let rec = &view.detail[row.index()];
                row.col(|ui| {
                    ui.label(&rec.year);
                });
                row.col(|ui| {
                    ui.label(&rec.sector);
                });
                row.col(|ui| {
                    ui.label(format_index(rec.value));
                });
            });
        });

    clicked
}
