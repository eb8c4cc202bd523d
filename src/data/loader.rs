use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{PriceDataset, RawRecord};
use crate::error::DashboardError;

pub const PERIOD_COLUMN: &str = "TLIST(M1)";
pub const SECTOR_COLUMN: &str = "Industry Sector NACE Rev 2";
pub const VALUE_COLUMN: &str = "VALUE";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the price index dataset, reporting any failure as
/// [`DashboardError::DataUnavailable`].
pub fn load_dataset(path: &Path) -> Result<PriceDataset, DashboardError> {
    load_file(path).map_err(|e| DashboardError::DataUnavailable {
        path: path.to_path_buf(),
        reason: format!("{e:#}"),
    })
}

/// Load a price index dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row containing `TLIST(M1)`, `Industry Sector NACE Rev 2`, `VALUE`
/// * `.parquet` – same three columns
/// * `.json`    – `[{ "TLIST(M1)": "202101", "Industry Sector NACE Rev 2": "...", "VALUE": 100.0 }, ...]`
pub fn load_file(path: &Path) -> Result<PriceDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    if rows.is_empty() {
        bail!("{} contains no data rows", path.display());
    }
    PriceDataset::from_raw(rows)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "TLIST(M1)")]
    period_code: String,
    #[serde(rename = "Industry Sector NACE Rev 2")]
    sector: String,
    #[serde(rename = "VALUE")]
    value: Option<f64>,
}

/// Columns other than the three above are ignored.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [PERIOD_COLUMN, SECTOR_COLUMN, VALUE_COLUMN] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(RawRecord {
            period_code: row.period_code,
            sector: row.sector,
            value: row.value.unwrap_or(f64::NAN),
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). The period code
/// may be a string or a number.
fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;

            let period_code = match obj.get(PERIOD_COLUMN) {
                Some(JsonValue::String(s)) => s.clone(),
                Some(JsonValue::Number(n)) => n.to_string(),
                _ => bail!("Row {i}: missing or invalid '{PERIOD_COLUMN}'"),
            };
            let sector = obj
                .get(SECTOR_COLUMN)
                .and_then(|v| v.as_str())
                .with_context(|| format!("Row {i}: missing or invalid '{SECTOR_COLUMN}'"))?
                .to_string();
            let value = match obj.get(VALUE_COLUMN) {
                Some(JsonValue::Null) => f64::NAN,
                Some(v) => v
                    .as_f64()
                    .with_context(|| format!("Row {i}: '{VALUE_COLUMN}' is not a number"))?,
                None => bail!("Row {i}: missing '{VALUE_COLUMN}'"),
            };

            Ok(RawRecord {
                period_code,
                sector,
                value,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): the period column may be text or an
/// integer, the value column float or integer.
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| {
            schema
                .index_of(name)
                .map(|i| batch.column(i).clone())
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let period_col = column(PERIOD_COLUMN)?;
        let sector_col = column(SECTOR_COLUMN)?;
        let value_col = column(VALUE_COLUMN)?;

        for row in 0..batch.num_rows() {
            let offset = rows.len();
            let period_code = extract_text(&period_col, row)
                .with_context(|| format!("Row {offset}: failed to read '{PERIOD_COLUMN}'"))?;
            let sector = extract_text(&sector_col, row)
                .with_context(|| format!("Row {offset}: failed to read '{SECTOR_COLUMN}'"))?;
            let value = extract_f64(&value_col, row)
                .with_context(|| format!("Row {offset}: failed to read '{VALUE_COLUMN}'"))?;

            rows.push(RawRecord {
                period_code,
                sector,
                value,
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Read a text cell; integer cells are rendered as their decimal digits.
fn extract_text(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row).to_string())
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row).to_string())
        }
        other => bail!("Expected text or integer column, got {other:?}"),
    }
}

/// Read a numeric cell; nulls become NaN.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        return Ok(f64::NAN);
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        bail!("Expected numeric column, got {:?}", col.data_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_csv_with_extra_columns() {
        let file = write_temp(
            ".csv",
            "STATISTIC,TLIST(M1),Month,Industry Sector NACE Rev 2,UNIT,VALUE\n\
             WPM28,202101,2021 January,Food products (10),Base 2021=100,100.5\n\
             WPM28,202102,2021 February,Tobacco (12),Base 2021=100,\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].display_sector, "Produk makanan (10)");
        assert_eq!(ds.records[0].period, "2021-01");
        assert_eq!(ds.records[0].value, 100.5);
        assert_eq!(ds.records[1].display_sector, "Tobacco (12)");
        assert!(ds.records[1].value.is_nan());
    }

    #[test]
    fn test_csv_missing_column() {
        let file = write_temp(".csv", "TLIST(M1),VALUE\n202101,100\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains(SECTOR_COLUMN));
    }

    #[test]
    fn test_csv_bad_period_code() {
        let file = write_temp(
            ".csv",
            "TLIST(M1),Industry Sector NACE Rev 2,VALUE\n2021,Furniture (31),1\n",
        );
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn test_header_only_is_unavailable() {
        let file = write_temp(".csv", "TLIST(M1),Industry Sector NACE Rev 2,VALUE\n");
        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, DashboardError::DataUnavailable { .. }));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(&dir.path().join("absent.csv")).unwrap_err();
        match err {
            DashboardError::DataUnavailable { path, reason } => {
                assert!(path.ends_with("absent.csv"));
                assert!(reason.contains("opening CSV"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".xlsx", "");
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn test_json_numeric_period() {
        let file = write_temp(
            ".json",
            r#"[
                {"TLIST(M1)": 202203, "Industry Sector NACE Rev 2": "Basic metals (24)", "VALUE": 130},
                {"TLIST(M1)": "202204", "Industry Sector NACE Rev 2": "Basic metals (24)", "VALUE": null}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].period, "2022-03");
        assert_eq!(ds.records[0].display_sector, "Logam dasar (24)");
        assert_eq!(ds.records[0].value, 130.0);
        assert!(ds.records[1].value.is_nan());
    }

    #[test]
    fn test_parquet_integer_period() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(PERIOD_COLUMN, DataType::Int64, false),
            Field::new(SECTOR_COLUMN, DataType::Utf8, false),
            Field::new(VALUE_COLUMN, DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![202101, 202201])),
                Arc::new(StringArray::from(vec!["Furniture (31)", "Furniture (31)"])),
                Arc::new(Float64Array::from(vec![Some(99.0), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.years, vec!["2021", "2022"]);
        assert_eq!(ds.records[0].display_sector, "Furnitur (31)");
        assert_eq!(ds.records[0].value, 99.0);
        assert!(ds.records[1].value.is_nan());
    }
}
