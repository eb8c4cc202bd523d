use super::aggregate::{aggregate_sector, aggregate_yearly, SectorAggregate, YearlyAggregate};
use super::filter::{filter_records, Selection};
use super::model::PriceRecord;
use super::shape::{
    detail_rows, share_of_total, sort_by_value_desc, stacks_by_sector, stacks_by_year,
    trend_series, SectorShare, Stack, Summary, TrendSeries,
};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// DashboardView – everything the charts and the table consume
// ---------------------------------------------------------------------------

/// One full recomputation for a selection: filter, aggregate, shape.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub summary: Summary,
    /// Sector means, descending by value (bar view).
    pub sectors: Vec<SectorAggregate>,
    /// Sector shares, descending by value (pie view).
    pub shares: Vec<SectorShare>,
    /// Line and scatter views.
    pub trends: Vec<TrendSeries>,
    /// Vertical stacked view.
    pub stacks_by_year: Vec<Stack>,
    /// Horizontal stacked view.
    pub stacks_by_sector: Vec<Stack>,
    /// Detail table, ascending by (year, sector).
    pub detail: Vec<YearlyAggregate>,
}

impl DashboardView {
    /// Returns [`DashboardError::EmptySelection`] before any aggregation
    /// when no record passes the filters.
    pub fn compute<'a, I>(records: I, selection: &Selection) -> Result<Self>
    where
        I: IntoIterator<Item = &'a PriceRecord>,
    {
        let filtered = filter_records(records, selection);
        if filtered.is_empty() {
            return Err(DashboardError::EmptySelection);
        }

        let yearly = aggregate_yearly(filtered.iter().copied());
        let mut sectors = aggregate_sector(&yearly);
        sort_by_value_desc(&mut sectors);
        let shares = share_of_total(&sectors)?;

        log::debug!(
            "Recomputed view: {} rows, {} yearly groups, {} sectors",
            filtered.len(),
            yearly.len(),
            sectors.len()
        );

        Ok(DashboardView {
            summary: Summary::from_records(&filtered),
            trends: trend_series(&yearly),
            stacks_by_year: stacks_by_year(&yearly),
            stacks_by_sector: stacks_by_sector(&yearly),
            detail: detail_rows(&yearly),
            sectors,
            shares,
        })
    }
}
