use std::f64::consts::TAU;

use eframe::egui::{Color32, Ui};
use egui_plot::{
    Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::color::ColorMap;
use crate::data::shape::{format_index, format_percent, SectorShare, Stack, TrendSeries};
use crate::data::view::DashboardView;

const CHART_HEIGHT: f32 = 320.0;
const PIE_SEGMENTS_PER_TURN: f64 = 180.0;

fn year_value(year: &str) -> Option<f64> {
    year.parse::<f64>().ok()
}

/// Hover label for year/index points.
fn year_index_label(name: &str, value: &PlotPoint) -> String {
    let prefix = if name.is_empty() {
        String::new()
    } else {
        format!("{name}\n")
    };
    format!(
        "{prefix}Tahun: {:.0}\nIndeks tahunan: {}",
        value.x,
        format_index(value.y)
    )
}

// ---------------------------------------------------------------------------
// Row 1: bar of sector averages, yearly trend lines
// ---------------------------------------------------------------------------

/// Bar per sector, already ordered descending by value.
pub fn sector_bar_chart(ui: &mut Ui, view: &DashboardView, colors: &ColorMap) {
    let charts: Vec<BarChart> = view
        .sectors
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let bar = Bar::new(i as f64, row.value)
                .name(&row.sector)
                .fill(colors.color_for(&row.sector))
                .width(0.7);
            BarChart::new(vec![bar])
                .name(&row.sector)
                .color(colors.color_for(&row.sector))
                .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
                    format!("{}\nRata-rata indeks: {}", bar.name, format_index(bar.value))
                }))
        })
        .collect();

    Plot::new("sector_bar")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label("Sektor industri")
        .y_axis_label("Rata-rata indeks tahunan")
        .show_x(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

fn trend_points(series: &TrendSeries) -> Vec<[f64; 2]> {
    series
        .points
        .iter()
        .filter_map(|(year, v)| Some([year_value(year)?, *v]))
        .collect()
}

pub fn trend_line_chart(ui: &mut Ui, view: &DashboardView, colors: &ColorMap) {
    Plot::new("trend_line")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label("Tahun")
        .y_axis_label("Indeks harga rata-rata tahunan (Base 2021=100)")
        .label_formatter(year_index_label)
        .show(ui, |plot_ui| {
            for series in &view.trends {
                let color = colors.color_for(&series.sector);
                let pts = trend_points(series);
                plot_ui.line(
                    Line::new(PlotPoints::from(pts.clone()))
                        .name(&series.sector)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .name(&series.sector)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Row 2: pie of sector shares, scatter of yearly points
// ---------------------------------------------------------------------------

/// Wedge outline from `start` to `end` (radians) on the unit circle.
pub fn wedge_points(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) / TAU) * PIE_SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
    let mut pts = Vec::with_capacity(steps + 2);
    pts.push([0.0, 0.0]);
    for i in 0..=steps {
        let a = start + (end - start) * i as f64 / steps as f64;
        pts.push([a.cos(), a.sin()]);
    }
    pts
}

pub fn share_pie_chart(ui: &mut Ui, shares: &[SectorShare], colors: &ColorMap) {
    Plot::new("share_pie")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            let mut start = TAU / 4.0;
            for share in shares.iter().filter(|s| s.percent.is_finite()) {
                let sweep = share.percent / 100.0 * TAU;
                let end = start + sweep;
                let color = colors.color_for(&share.sector);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(wedge_points(start, end)))
                        .fill_color(color)
                        .name(&share.sector),
                );

                let mid = (start + end) / 2.0;
                let label = format!(
                    "{}%\n{}",
                    format_percent(share.percent),
                    format_index(share.value)
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()), label)
                        .color(Color32::WHITE),
                );
                start = end;
            }
        });
}

pub fn yearly_scatter_chart(ui: &mut Ui, view: &DashboardView, colors: &ColorMap) {
    Plot::new("yearly_scatter")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label("Tahun")
        .y_axis_label("Indeks harga rata-rata tahunan")
        .include_y(0.0)
        .label_formatter(year_index_label)
        .show(ui, |plot_ui| {
            for series in &view.trends {
                let color = colors.color_for(&series.sector).gamma_multiply(0.7);
                plot_ui.points(
                    Points::new(PlotPoints::from(trend_points(series)))
                        .name(&series.sector)
                        .color(color)
                        .radius(5.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Row 3: stacked bars by year (vertical) and by sector (horizontal)
// ---------------------------------------------------------------------------

/// One [`BarChart`] per segment label so the legend lists each label once.
fn stacked_charts(
    stacks: &[Stack],
    argument: impl Fn(usize, &Stack) -> Option<f64>,
    colors: &ColorMap,
    horizontal: bool,
) -> Vec<BarChart> {
    let mut by_label: std::collections::BTreeMap<&str, Vec<Bar>> = Default::default();
    for (i, stack) in stacks.iter().enumerate() {
        let Some(arg) = argument(i, stack) else {
            continue;
        };
        for seg in &stack.segments {
            let bar = Bar::new(arg, seg.value)
                .base_offset(seg.base)
                .name(format!("{}\n{}", stack.category, seg.label))
                .fill(colors.color_for(&seg.label))
                .width(0.6);
            by_label.entry(seg.label.as_str()).or_default().push(bar);
        }
    }
    by_label
        .into_iter()
        .map(|(label, bars)| {
            let chart = BarChart::new(bars)
                .name(label)
                .color(colors.color_for(label))
                .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
                    format!("{}\nRata-rata indeks: {}", bar.name, format_index(bar.value))
                }));
            if horizontal {
                chart.horizontal()
            } else {
                chart
            }
        })
        .collect()
}

pub fn stacked_by_year_chart(ui: &mut Ui, view: &DashboardView, colors: &ColorMap) {
    let charts = stacked_charts(
        &view.stacks_by_year,
        |_, stack| year_value(&stack.category),
        colors,
        false,
    );
    Plot::new("stacked_by_year")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label("Tahun")
        .y_axis_label("Rata-rata indeks")
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

pub fn stacked_by_sector_chart(ui: &mut Ui, view: &DashboardView, year_colors: &ColorMap) {
    let charts = stacked_charts(
        &view.stacks_by_sector,
        |i, _| Some(i as f64),
        year_colors,
        true,
    );
    let sectors: Vec<String> = view
        .stacks_by_sector
        .iter()
        .map(|s| s.category.clone())
        .collect();
    Plot::new("stacked_by_sector")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label("Rata-rata indeks")
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            sectors.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wedge_starts_at_centre_and_follows_arc() {
        let pts = wedge_points(0.0, TAU / 4.0);
        assert_eq!(pts[0], [0.0, 0.0]);
        assert_relative_eq!(pts[1][0], 1.0);
        let last = pts.last().unwrap();
        assert_relative_eq!(last[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(last[1], 1.0, epsilon = 1e-12);
        for p in &pts[1..] {
            assert_relative_eq!(p[0].hypot(p[1]), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_year_value() {
        assert_eq!(year_value("2021"), Some(2021.0));
        assert_eq!(year_value("20x1"), None);
    }
}
