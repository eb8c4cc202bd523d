use std::collections::BTreeSet;

use anyhow::{bail, Result};

use super::sector::display_sector;

// ---------------------------------------------------------------------------
// RawRecord – one row as read from the source file
// ---------------------------------------------------------------------------

/// A single source row before any derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// `TLIST(M1)`: six digits, `YYYYMM`.
    pub period_code: String,
    /// `Industry Sector NACE Rev 2`.
    pub sector: String,
    /// `VALUE`. NaN when the cell was empty.
    pub value: f64,
}

// ---------------------------------------------------------------------------
// PriceRecord – a row with its calendar and display fields derived
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub period_code: String,
    pub year: String,
    pub month: String,
    /// `"{year}-{month}"`.
    pub period: String,
    pub raw_sector: String,
    pub display_sector: String,
    pub value: f64,
}

impl PriceRecord {
    /// Derive calendar fields and the display label. `row` is only used in errors.
    pub fn derive(raw: RawRecord, row: usize) -> Result<Self> {
        let code = raw.period_code.trim();
        if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
            bail!("Row {row}: period code '{code}' is not a 6-digit YYYYMM value");
        }
        let year = code[..4].to_string();
        let month = code[4..6].to_string();
        let period = format!("{year}-{month}");

        Ok(PriceRecord {
            period_code: code.to_string(),
            display_sector: display_sector(&raw.sector),
            raw_sector: raw.sector,
            year,
            month,
            period,
            value: raw.value,
        })
    }
}

// ---------------------------------------------------------------------------
// PriceDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All derived records plus the option domains the filter widgets need.
#[derive(Debug, Clone)]
pub struct PriceDataset {
    /// Records in source order.
    pub records: Vec<PriceRecord>,
    /// Distinct display sectors, ascending.
    pub sectors: Vec<String>,
    /// Distinct years, ascending.
    pub years: Vec<String>,
}

impl PriceDataset {
    /// Build option domains from the derived records.
    pub fn from_records(records: Vec<PriceRecord>) -> Self {
        let sectors: BTreeSet<&str> =
            records.iter().map(|r| r.display_sector.as_str()).collect();
        let years: BTreeSet<&str> = records.iter().map(|r| r.year.as_str()).collect();
        let sectors = sectors.into_iter().map(str::to_string).collect();
        let years = years.into_iter().map(str::to_string).collect();
        PriceDataset {
            records,
            sectors,
            years,
        }
    }

    /// Derive every raw row, failing on the first malformed period code.
    pub fn from_raw(rows: Vec<RawRecord>) -> Result<Self> {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, raw)| PriceRecord::derive(raw, i))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn raw(code: &str, sector: &str, value: f64) -> RawRecord {
        RawRecord {
            period_code: code.to_string(),
            sector: sector.to_string(),
            value,
        }
    }

    #[test]
    fn test_calendar_fields() {
        let rec = PriceRecord::derive(raw("202307", "Textiles (13)", 101.5), 0).unwrap();
        assert_eq!(rec.year, "2023");
        assert_eq!(rec.month, "07");
        assert_eq!(rec.period, "2023-07");
        assert_eq!(rec.display_sector, "Tekstil (13)");
        assert_eq!(rec.raw_sector, "Textiles (13)");
    }

    #[test]
    fn test_period_invariant_holds_for_all_rows() {
        let rows = vec![
            raw("201501", "Furniture (31)", 90.0),
            raw(" 202112 ", "Tobacco (12)", 100.0),
            raw("202406", "Basic metals (24)", 120.0),
        ];
        let ds = PriceDataset::from_raw(rows).unwrap();
        for rec in &ds.records {
            assert_eq!(rec.year.len(), 4);
            assert_eq!(rec.month.len(), 2);
            assert_eq!(rec.period, format!("{}-{}", rec.year, rec.month));
        }
        // Unmapped label survives unchanged.
        assert_eq!(ds.records[1].display_sector, "Tobacco (12)");
    }

    #[test]
    fn test_malformed_period_code() {
        for code in ["2021", "2021011", "2021a1", ""] {
            assert!(PriceRecord::derive(raw(code, "Furniture (31)", 1.0), 3).is_err());
        }
    }

    #[test]
    fn test_option_domains_sorted_and_distinct() {
        let rows = vec![
            raw("202201", "Textiles (13)", 1.0),
            raw("202101", "Food products (10)", 1.0),
            raw("202201", "Food products (10)", 1.0),
        ];
        let ds = PriceDataset::from_raw(rows).unwrap();
        assert_eq!(ds.sectors, vec!["Produk makanan (10)", "Tekstil (13)"]);
        assert_eq!(ds.years, vec!["2021", "2022"]);
        assert_eq!(ds.len(), 3);
    }
}
