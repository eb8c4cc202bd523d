use std::path::PathBuf;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::filter::Selection;
use crate::data::model::PriceDataset;
use crate::data::shape::{sort_detail_rows, DetailColumn, DetailSort};
use crate::data::view::DashboardView;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Memoized source for the current dataset path.
    pub cache: DatasetCache,

    /// Loaded dataset (None while the source is unavailable).
    pub dataset: Option<Arc<PriceDataset>>,

    /// Current sector / year selection.
    pub selection: Selection,

    /// Result of the last recomputation.
    pub view: Option<Result<DashboardView>>,

    /// Sort state of the detail table.
    pub detail_sort: DetailSort,

    /// One colour per sector across the whole dataset.
    pub sector_colors: ColorMap,

    /// One colour per year across the whole dataset.
    pub year_colors: ColorMap,

    /// Load error shown instead of the dashboard.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build state for `config` and try the first load.
    pub fn new(config: DashboardConfig) -> Self {
        let cache = DatasetCache::new(config.data_path.clone());
        let mut state = Self {
            config,
            cache,
            dataset: None,
            selection: Selection::default(),
            view: None,
            detail_sort: DetailSort::default(),
            sector_colors: ColorMap::default(),
            year_colors: ColorMap::default(),
            status_message: None,
        };
        state.reload();
        state
    }

    /// Fetch the dataset from the cache; on failure halt the dashboard.
    pub fn reload(&mut self) {
        match self.cache.get() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.dataset = None;
                self.view = None;
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Switch to a different source file. The previous cache is left as is.
    pub fn open_path(&mut self, path: PathBuf) {
        self.config.data_path = path.clone();
        self.cache = DatasetCache::new(path);
        self.reload();
    }

    /// Ingest a loaded dataset, initialise selection and colours.
    pub fn set_dataset(&mut self, dataset: Arc<PriceDataset>) {
        self.selection = Selection::initial(&dataset, self.config.default_sector_count);
        self.sector_colors = ColorMap::new(&dataset.sectors);
        self.year_colors = ColorMap::new(&dataset.years);
        self.detail_sort = DetailSort::default();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Re-run filter → aggregate → shape for the current selection.
    pub fn recompute(&mut self) {
        let Some(ds) = &self.dataset else {
            self.view = None;
            return;
        };
        let mut result = DashboardView::compute(&ds.records, &self.selection);
        match &mut result {
            Ok(view) => sort_detail_rows(&mut view.detail, self.detail_sort),
            Err(e) if e.is_empty_selection() => {
                log::warn!("Filter selection matches no rows");
            }
            Err(e) => log::error!("Recomputation failed: {e}"),
        }
        self.view = Some(result);
    }

    /// Toggle a single sector in the selection.
    pub fn toggle_sector(&mut self, sector: &str) {
        self.selection.toggle_sector(sector);
        self.recompute();
    }

    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.select_all(ds);
            self.recompute();
        }
    }

    pub fn select_none(&mut self) {
        self.selection.select_none();
        self.recompute();
    }

    pub fn set_year_range(&mut self, start: &str, end: &str) {
        self.selection.set_year_range(start, end);
        self.recompute();
    }

    /// Header click in the detail table. Only re-sorts; no recomputation.
    pub fn sort_detail(&mut self, column: DetailColumn) {
        self.detail_sort.clicked(column);
        if let Some(Ok(view)) = &mut self.view {
            sort_detail_rows(&mut view.detail, self.detail_sort);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    const CSV: &str = "TLIST(M1),Industry Sector NACE Rev 2,VALUE\n\
                       202101,Food products (10),100\n\
                       202101,Food products (10),110\n\
                       202201,Food products (10),120\n\
                       202201,Textiles (13),80\n";

    fn state_for(contents: &str) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.csv");
        std::fs::write(&path, contents).unwrap();
        let config = DashboardConfig {
            data_path: path,
            ..Default::default()
        };
        (dir, AppState::new(config))
    }

    #[test]
    fn test_initial_load_selects_and_computes() {
        let (_dir, state) = state_for(CSV);
        assert!(state.status_message.is_none());
        assert_eq!(state.selection.sectors.len(), 2);
        assert_eq!(state.selection.year_start, "2021");
        assert_eq!(state.selection.year_end, "2022");
        assert!(matches!(state.view, Some(Ok(_))));
    }

    #[test]
    fn test_missing_source_halts() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            data_path: dir.path().join("missing.csv"),
            ..Default::default()
        };
        let state = AppState::new(config);
        assert!(state.dataset.is_none());
        assert!(state.view.is_none());
        assert!(state.status_message.unwrap().contains("missing.csv"));
    }

    #[test]
    fn test_empty_selection_is_recoverable() {
        let (_dir, mut state) = state_for(CSV);
        state.select_none();
        assert!(matches!(state.view, Some(Err(DashboardError::EmptySelection))));

        state.toggle_sector("Tekstil (13)");
        let Some(Ok(view)) = &state.view else {
            panic!("expected a view");
        };
        assert_eq!(view.summary.row_count, 1);
    }

    #[test]
    fn test_detail_sort_applies_to_current_view() {
        let (_dir, mut state) = state_for(CSV);
        state.sort_detail(DetailColumn::Index);
        let Some(Ok(view)) = &state.view else {
            panic!("expected a view");
        };
        let values: Vec<f64> = view.detail.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![80.0, 105.0, 120.0]);

        // Sort order survives a filter change.
        state.set_year_range("2022", "2022");
        let Some(Ok(view)) = &state.view else {
            panic!("expected a view");
        };
        assert_eq!(view.detail[0].value, 80.0);
    }
}
