use std::collections::BTreeSet;

use super::model::{PriceDataset, PriceRecord};

// ---------------------------------------------------------------------------
// Selection: which sectors and which years are in view
// ---------------------------------------------------------------------------

/// User filter selection. Years are 4-digit strings, so lexical
/// comparison matches numeric order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// Selected display sectors. Empty means nothing passes.
    pub sectors: BTreeSet<String>,
    /// Inclusive lower bound.
    pub year_start: String,
    /// Inclusive upper bound.
    pub year_end: String,
}

impl Selection {
    /// First `default_count` sectors (alphabetical) over the full year range.
    pub fn initial(dataset: &PriceDataset, default_count: usize) -> Self {
        Selection {
            sectors: dataset.sectors.iter().take(default_count).cloned().collect(),
            year_start: dataset.years.first().cloned().unwrap_or_default(),
            year_end: dataset.years.last().cloned().unwrap_or_default(),
        }
    }

    /// Whether a single record passes both the sector and the year filter.
    pub fn matches(&self, record: &PriceRecord) -> bool {
        self.sectors.contains(&record.display_sector)
            && self.year_start.as_str() <= record.year.as_str()
            && record.year.as_str() <= self.year_end.as_str()
    }

    pub fn toggle_sector(&mut self, sector: &str) {
        if !self.sectors.remove(sector) {
            self.sectors.insert(sector.to_string());
        }
    }

    pub fn select_all(&mut self, dataset: &PriceDataset) {
        self.sectors = dataset.sectors.iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.sectors.clear();
    }

    /// Set the year interval. The end is raised to the start if it would
    /// otherwise fall before it.
    pub fn set_year_range(&mut self, start: &str, end: &str) {
        self.year_start = start.to_string();
        self.year_end = if end < start { start } else { end }.to_string();
    }
}

/// Keep records whose sector is selected and whose year lies within the
/// selected interval. Accepts any iterator of references, so a filtered
/// result can be filtered again.
pub fn filter_records<'a, I>(records: I, selection: &Selection) -> Vec<&'a PriceRecord>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    records
        .into_iter()
        .filter(|rec| selection.matches(rec))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::raw;

    fn dataset() -> PriceDataset {
        PriceDataset::from_raw(vec![
            raw("201912", "Food products (10)", 95.0),
            raw("202101", "Food products (10)", 100.0),
            raw("202101", "Textiles (13)", 80.0),
            raw("202206", "Basic metals (24)", 140.0),
            raw("202301", "Food products (10)", 115.0),
            raw("202301", "Tobacco (12)", 70.0),
        ])
        .unwrap()
    }

    fn selection(sectors: &[&str], start: &str, end: &str) -> Selection {
        Selection {
            sectors: sectors.iter().map(|s| s.to_string()).collect(),
            year_start: start.to_string(),
            year_end: end.to_string(),
        }
    }

    #[test]
    fn test_sector_and_inclusive_year_bounds() {
        let ds = dataset();
        let sel = selection(&["Produk makanan (10)", "Tobacco (12)"], "2021", "2023");
        let out = filter_records(&ds.records, &sel);
        let periods: Vec<_> = out.iter().map(|r| r.period_code.as_str()).collect();
        assert_eq!(periods, vec!["202101", "202301", "202301"]);
    }

    #[test]
    fn test_idempotent() {
        let ds = dataset();
        let sel = selection(&["Produk makanan (10)", "Logam dasar (24)"], "2020", "2022");
        let once = filter_records(&ds.records, &sel);
        let twice = filter_records(once.iter().copied(), &sel);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_sector_selection_yields_nothing() {
        let ds = dataset();
        let sel = selection(&[], "2019", "2023");
        assert!(filter_records(&ds.records, &sel).is_empty());
    }

    #[test]
    fn test_initial_selection() {
        let ds = dataset();
        let sel = Selection::initial(&ds, 2);
        // Alphabetical over display labels.
        assert_eq!(
            sel.sectors.iter().collect::<Vec<_>>(),
            vec!["Logam dasar (24)", "Produk makanan (10)"]
        );
        assert_eq!(sel.year_start, "2019");
        assert_eq!(sel.year_end, "2023");

        let all = Selection::initial(&ds, 5);
        assert_eq!(all.sectors.len(), 4);
    }

    #[test]
    fn test_selection_helpers() {
        let ds = dataset();
        let mut sel = Selection::initial(&ds, 0);
        sel.toggle_sector("Tekstil (13)");
        assert!(sel.sectors.contains("Tekstil (13)"));
        sel.toggle_sector("Tekstil (13)");
        assert!(sel.sectors.is_empty());

        sel.select_all(&ds);
        assert_eq!(sel.sectors.len(), ds.sectors.len());
        sel.select_none();
        assert!(sel.sectors.is_empty());

        sel.set_year_range("2022", "2020");
        assert_eq!((sel.year_start.as_str(), sel.year_end.as_str()), ("2022", "2022"));
    }
}
