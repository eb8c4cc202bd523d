//! Writes a synthetic `domestic_industrial_price_index_clean.csv` (or `.parquet`
//! when the output path ends in `.parquet`) with monthly index values for
//! every known sector plus one unmapped sector.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const SECTORS: [&str; 15] = [
    "Food products (10)",
    "Textiles (13)",
    "Wearing apparel (14)",
    "Wood and wood products, except furniture (16)",
    "Paper and paper products (17)",
    "Chemicals and chemical products (20)",
    "Rubber and plastic products (22)",
    "Other non-metallic mineral products (23)",
    "Basic metals (24)",
    "Fabricated metal products, except machinery and equipment (25)",
    "Electrical equipment (27)",
    "Motor vehicles, trailers and semi-trailers (29)",
    "Furniture (31)",
    "Mining and quarrying (05 to 09)",
    "Manufacturing industries (10 to 33)",
];

const FIRST_YEAR: u32 = 2015;
const LAST_YEAR: u32 = 2024;
/// Index base year: values average ~100 there.
const BASE_YEAR: u32 = 2021;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Row {
    period_code: String,
    sector: &'static str,
    value: f64,
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for sector in SECTORS {
        // Annual drift between 1% and 6%, some sectors more volatile.
        let drift = 0.01 + 0.05 * rng.next_f64();
        let noise = 0.5 + 2.0 * rng.next_f64();
        for year in FIRST_YEAR..=LAST_YEAR {
            for month in 1..=12u32 {
                let t = (year as f64 - BASE_YEAR as f64) + (month as f64 - 6.5) / 12.0;
                let value = 100.0 * (1.0 + drift).powf(t) + rng.gauss(0.0, noise);
                rows.push(Row {
                    period_code: format!("{year}{month:02}"),
                    sector,
                    value: (value * 10.0).round() / 10.0,
                });
            }
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["TLIST(M1)", "Industry Sector NACE Rev 2", "VALUE"])?;
    for row in rows {
        writer.write_record([
            row.period_code.as_str(),
            row.sector,
            row.value.to_string().as_str(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("TLIST(M1)", DataType::Utf8, false),
        Field::new("Industry Sector NACE Rev 2", DataType::Utf8, false),
        Field::new("VALUE", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.period_code.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.sector).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.value).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "domestic_industrial_price_index_clean.csv".to_string());
    let output = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    match output.extension().and_then(|e| e.to_str()) {
        Some("parquet") | Some("pq") => write_parquet(output, &rows)?,
        _ => write_csv(output, &rows)?,
    }

    println!(
        "Wrote {} rows ({} sectors, {FIRST_YEAR}-{LAST_YEAR}) to {}",
        rows.len(),
        SECTORS.len(),
        output.display()
    );
    Ok(())
}
