use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::aggregate::{SectorAggregate, YearlyAggregate};
use super::model::PriceRecord;
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Share of total (pie view)
// ---------------------------------------------------------------------------

/// A sector aggregate with its percentage of the total across all sectors.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorShare {
    pub sector: String,
    pub value: f64,
    pub percent: f64,
}

/// `value / sum(values) * 100` for each row, in input order.
///
/// Non-finite values are left out of the total and get a NaN percent.
/// Errors with [`DashboardError::DivisionByZero`] when the finite values sum
/// to zero (including empty input).
pub fn share_of_total(rows: &[SectorAggregate]) -> Result<Vec<SectorShare>> {
    let total: f64 = rows
        .iter()
        .map(|r| r.value)
        .filter(|v| v.is_finite())
        .sum();
    if total == 0.0 || !total.is_finite() {
        return Err(DashboardError::DivisionByZero);
    }
    Ok(rows
        .iter()
        .map(|r| SectorShare {
            sector: r.sector.clone(),
            value: r.value,
            percent: if r.value.is_finite() {
                r.value / total * 100.0
            } else {
                f64::NAN
            },
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Descending by value for the bar and pie views, non-finite values last.
/// Stable: equal values keep their input order.
pub fn sort_by_value_desc(rows: &mut [SectorAggregate]) {
    rows.sort_by(|a, b| {
        a.value
            .is_finite()
            .cmp(&b.value.is_finite())
            .reverse()
            .then_with(|| b.value.total_cmp(&a.value))
    });
}

/// Columns of the detail table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailColumn {
    Year,
    Sector,
    Index,
}

impl DetailColumn {
    pub const ALL: [DetailColumn; 3] = [
        DetailColumn::Year,
        DetailColumn::Sector,
        DetailColumn::Index,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DetailColumn::Year => "Tahun",
            DetailColumn::Sector => "Sektor industri",
            DetailColumn::Index => "Indeks tahunan",
        }
    }
}

/// Sort state of the detail table. Defaults to (year, sector) ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailSort {
    pub column: DetailColumn,
    pub ascending: bool,
}

impl Default for DetailSort {
    fn default() -> Self {
        Self {
            column: DetailColumn::Year,
            ascending: true,
        }
    }
}

impl DetailSort {
    /// Clicking the active column flips direction; another column starts ascending.
    pub fn clicked(&mut self, column: DetailColumn) {
        if self.column == column {
            self.ascending = !self.ascending;
        } else {
            *self = DetailSort {
                column,
                ascending: true,
            };
        }
    }
}

fn year_sector(a: &YearlyAggregate, b: &YearlyAggregate) -> Ordering {
    a.year.cmp(&b.year).then_with(|| a.sector.cmp(&b.sector))
}

/// Order detail rows by `sort`. Ties always fall back to (year, sector) ascending.
pub fn sort_detail_rows(rows: &mut [YearlyAggregate], sort: DetailSort) {
    rows.sort_by(|a, b| {
        let primary = match sort.column {
            DetailColumn::Year => a.year.cmp(&b.year),
            DetailColumn::Sector => a.sector.cmp(&b.sector),
            DetailColumn::Index => a.value.total_cmp(&b.value),
        };
        let primary = if sort.ascending { primary } else { primary.reverse() };
        primary.then_with(|| year_sector(a, b))
    });
}

/// Detail table rows in their default order: ascending by (year, sector).
pub fn detail_rows(yearly: &[YearlyAggregate]) -> Vec<YearlyAggregate> {
    let mut rows = yearly.to_vec();
    sort_detail_rows(&mut rows, DetailSort::default());
    rows
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// One sector's yearly means, ascending by year (line and scatter views).
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub sector: String,
    pub points: Vec<(String, f64)>,
}

/// Per-sector series in ascending sector order.
pub fn trend_series(yearly: &[YearlyAggregate]) -> Vec<TrendSeries> {
    let mut by_sector: BTreeMap<&str, Vec<(String, f64)>> = BTreeMap::new();
    for row in yearly {
        by_sector
            .entry(row.sector.as_str())
            .or_default()
            .push((row.year.clone(), row.value));
    }
    by_sector
        .into_iter()
        .map(|(sector, mut points)| {
            points.sort_by(|a, b| a.0.cmp(&b.0));
            TrendSeries {
                sector: sector.to_string(),
                points,
            }
        })
        .collect()
}

/// One segment of a stacked bar: it spans `base..base + value`.
#[derive(Debug, Clone, PartialEq)]
pub struct StackSegment {
    pub label: String,
    pub base: f64,
    pub value: f64,
}

/// A stacked bar: one category with its segments bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    pub category: String,
    pub segments: Vec<StackSegment>,
}

fn stacks_by<'a>(
    yearly: &'a [YearlyAggregate],
    category: impl Fn(&'a YearlyAggregate) -> &'a str,
    label: impl Fn(&'a YearlyAggregate) -> &'a str,
) -> Vec<Stack> {
    let mut grouped: BTreeMap<&str, BTreeMap<&str, f64>> = BTreeMap::new();
    for row in yearly {
        grouped
            .entry(category(row))
            .or_default()
            .insert(label(row), row.value);
    }
    grouped
        .into_iter()
        .map(|(cat, labels)| {
            let mut base = 0.0;
            let segments = labels
                .into_iter()
                .filter(|(_, v)| v.is_finite())
                .map(|(lbl, value)| {
                    let seg = StackSegment {
                        label: lbl.to_string(),
                        base,
                        value,
                    };
                    base += value;
                    seg
                })
                .collect();
            Stack {
                category: cat.to_string(),
                segments,
            }
        })
        .collect()
}

/// Vertical stacked view: one stack per year, a segment per sector.
pub fn stacks_by_year(yearly: &[YearlyAggregate]) -> Vec<Stack> {
    stacks_by(yearly, |r| r.year.as_str(), |r| r.sector.as_str())
}

/// Horizontal stacked view: one stack per sector, a segment per year.
pub fn stacks_by_sector(yearly: &[YearlyAggregate]) -> Vec<Stack> {
    stacks_by(yearly, |r| r.sector.as_str(), |r| r.year.as_str())
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Header metrics over the filtered rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub row_count: usize,
    pub sector_count: usize,
    pub year_min: String,
    pub year_max: String,
}

impl Summary {
    pub fn from_records(records: &[&PriceRecord]) -> Self {
        let sectors: std::collections::BTreeSet<&str> =
            records.iter().map(|r| r.display_sector.as_str()).collect();
        let year_min = records.iter().map(|r| r.year.as_str()).min().unwrap_or_default();
        let year_max = records.iter().map(|r| r.year.as_str()).max().unwrap_or_default();
        Summary {
            row_count: records.len(),
            sector_count: sectors.len(),
            year_min: year_min.to_string(),
            year_max: year_max.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tooltip formatting
// ---------------------------------------------------------------------------

pub fn format_index(v: f64) -> String {
    format!("{v:.2}")
}

pub fn format_percent(v: f64) -> String {
    format!("{v:.1}")
}

/// Thousands-separated integer, e.g. `12,345`.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sector(name: &str, value: f64) -> SectorAggregate {
        SectorAggregate {
            sector: name.to_string(),
            value,
        }
    }

    fn yearly(year: &str, sector: &str, value: f64) -> YearlyAggregate {
        YearlyAggregate {
            year: year.to_string(),
            sector: sector.to_string(),
            value,
        }
    }

    #[test]
    fn test_share_sums_to_hundred() {
        let rows = vec![sector("A", 112.5), sector("B", 97.25), sector("C", 130.0)];
        let shares = share_of_total(&rows).unwrap();
        let total: f64 = shares.iter().map(|s| s.percent).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-6);
        assert_relative_eq!(shares[0].percent, 112.5 / 339.75 * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_share_guards_zero_total() {
        assert!(matches!(share_of_total(&[]), Err(DashboardError::DivisionByZero)));
        let zeros = vec![sector("A", 0.0), sector("B", 0.0)];
        assert!(matches!(share_of_total(&zeros), Err(DashboardError::DivisionByZero)));
        let missing = vec![sector("A", f64::NAN)];
        assert!(matches!(share_of_total(&missing), Err(DashboardError::DivisionByZero)));
    }

    #[test]
    fn test_share_skips_missing_values() {
        let rows = vec![sector("A", 60.0), sector("B", f64::NAN), sector("C", 40.0)];
        let shares = share_of_total(&rows).unwrap();
        assert_relative_eq!(shares[0].percent, 60.0, epsilon = 1e-9);
        assert!(shares[1].percent.is_nan());
        assert_relative_eq!(shares[2].percent, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sort_desc_puts_missing_last() {
        let mut rows = vec![
            sector("gap", f64::NAN),
            sector("low", 90.0),
            sector("high", 120.0),
        ];
        sort_by_value_desc(&mut rows);
        let names: Vec<_> = rows.iter().map(|r| r.sector.as_str()).collect();
        assert_eq!(names, vec!["high", "low", "gap"]);
    }

    #[test]
    fn test_sort_desc_is_stable() {
        let mut rows = vec![
            sector("first", 100.0),
            sector("big", 150.0),
            sector("second", 100.0),
            sector("small", 10.0),
        ];
        sort_by_value_desc(&mut rows);
        let names: Vec<_> = rows.iter().map(|r| r.sector.as_str()).collect();
        assert_eq!(names, vec!["big", "first", "second", "small"]);
    }

    #[test]
    fn test_detail_rows_ascending_year_then_sector() {
        let rows = vec![
            yearly("2022", "B", 1.0),
            yearly("2021", "B", 2.0),
            yearly("2022", "A", 3.0),
            yearly("2021", "A", 4.0),
        ];
        let sorted = detail_rows(&rows);
        let keys: Vec<_> = sorted
            .iter()
            .map(|r| format!("{}/{}", r.year, r.sector))
            .collect();
        assert_eq!(keys, vec!["2021/A", "2021/B", "2022/A", "2022/B"]);
    }

    #[test]
    fn test_detail_sort_by_index_descending() {
        let mut rows = vec![
            yearly("2021", "A", 5.0),
            yearly("2022", "B", 9.0),
            yearly("2021", "C", 5.0),
        ];
        let mut sort = DetailSort::default();
        sort.clicked(DetailColumn::Index);
        sort.clicked(DetailColumn::Index);
        assert!(!sort.ascending);

        sort_detail_rows(&mut rows, sort);
        let keys: Vec<_> = rows.iter().map(|r| r.sector.as_str()).collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_trend_series_sorted_by_year() {
        let rows = vec![
            yearly("2023", "B", 3.0),
            yearly("2021", "B", 1.0),
            yearly("2022", "A", 2.0),
        ];
        let series = trend_series(&rows);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].sector, "A");
        assert_eq!(
            series[1].points,
            vec![("2021".to_string(), 1.0), ("2023".to_string(), 3.0)]
        );
    }

    #[test]
    fn test_stacks_accumulate_bases() {
        let rows = vec![
            yearly("2021", "B", 20.0),
            yearly("2021", "A", 10.0),
            yearly("2022", "A", 5.0),
        ];
        let by_year = stacks_by_year(&rows);
        assert_eq!(by_year.len(), 2);
        let segs = &by_year[0].segments;
        assert_eq!(by_year[0].category, "2021");
        assert_eq!((segs[0].label.as_str(), segs[0].base), ("A", 0.0));
        assert_eq!((segs[1].label.as_str(), segs[1].base), ("B", 10.0));
        let total: f64 = segs.iter().map(|s| s.value).sum();
        assert_relative_eq!(total, 30.0);

        let by_sector = stacks_by_sector(&rows);
        assert_eq!(by_sector[0].category, "A");
        assert_eq!(by_sector[0].segments[1].base, 10.0);
        assert_eq!(by_sector[0].segments[1].label, "2022");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_index(112.5), "112.50");
        assert_eq!(format_index(99.999), "100.00");
        assert_eq!(format_percent(33.333), "33.3");
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1234), "1,234");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
