use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::loader::load_dataset;
use super::model::PriceDataset;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Memoized dataset accessor
// ---------------------------------------------------------------------------

/// Loads the dataset at `path` on first access and hands out the same
/// [`Arc`] afterwards. The cached value is never invalidated; a failed
/// load is not cached, so the next access tries again.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceCell<Arc<PriceDataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached dataset, loading it if this is the first access.
    pub fn get(&self) -> Result<Arc<PriceDataset>> {
        self.cell
            .get_or_try_init(|| -> Result<Arc<PriceDataset>> {
                let dataset = load_dataset(&self.path)?;
                log::info!(
                    "Loaded {} rows ({} sectors, years {:?}) from {}",
                    dataset.len(),
                    dataset.sectors.len(),
                    dataset.years,
                    self.path.display()
                );
                Ok(Arc::new(dataset))
            })
            .map(Arc::clone)
    }
}
