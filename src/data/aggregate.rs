use std::collections::HashMap;

use super::model::PriceRecord;

/// Mean index for one (year, sector) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyAggregate {
    pub year: String,
    pub sector: String,
    pub value: f64,
}

/// Mean of a sector's yearly means across the filtered years.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorAggregate {
    pub sector: String,
    pub value: f64,
}

/// Running sum/count that skips NaN, like a dataframe `mean()`.
#[derive(Debug, Default, Clone, Copy)]
struct MeanAcc {
    sum: f64,
    count: usize,
}

impl MeanAcc {
    fn push(&mut self, v: f64) {
        if !v.is_nan() {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Group `items` by key, keeping keys in first-seen order.
fn grouped_means<K, T>(
    items: impl IntoIterator<Item = T>,
    key: impl Fn(T) -> K,
    value: impl Fn(T) -> f64,
) -> Vec<(K, f64)>
where
    T: Copy,
    K: std::hash::Hash + Eq + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, MeanAcc)> = Vec::new();
    for item in items {
        let k = key(item);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, MeanAcc::default()));
            groups.len() - 1
        });
        groups[slot].1.push(value(item));
    }
    groups.into_iter().map(|(k, acc)| (k, acc.mean())).collect()
}

/// Mean index per (year, display sector). Groups appear in first-seen order.
pub fn aggregate_yearly<'a, I>(records: I) -> Vec<YearlyAggregate>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    grouped_means(
        records,
        |r| (r.year.as_str(), r.display_sector.as_str()),
        |r| r.value,
    )
    .into_iter()
    .map(|((year, sector), value)| YearlyAggregate {
        year: year.to_string(),
        sector: sector.to_string(),
        value,
    })
    .collect()
}

/// Mean of the yearly means per sector. Each year counts once regardless
/// of how many raw rows it had.
pub fn aggregate_sector(yearly: &[YearlyAggregate]) -> Vec<SectorAggregate> {
    grouped_means(yearly, |y| y.sector.as_str(), |y| y.value)
        .into_iter()
        .map(|(sector, value)| SectorAggregate {
            sector: sector.to_string(),
            value,
        })
        .collect()
}
