//! Writes a synthetic film genre statistics table for trying the dashboard.
//!
//! Usage: `generate_sample [OUT]`, OUT defaults to `sample_genre_stats.csv`.
//! An OUT ending in `.parquet` produces a Parquet file instead.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// (genre, base releases per year, base gross per film, sample titles)
const GENRES: [(&str, f64, f64, [&str; 3]); 8] = [
    ("Adventure", 40.0, 9.0e7, ["Star Wars Ep. VII", "Jurassic World", "Avatar"]),
    ("Action", 45.0, 6.0e7, ["Furious 7", "The Dark Knight", "Skyfall"]),
    ("Comedy", 70.0, 2.5e7, ["Trainwreck", "The Hangover", "Ted"]),
    ("Drama", 120.0, 1.2e7, ["Spotlight", "American Sniper", "Titanic"]),
    ("Sci-Fi", 15.0, 7.0e7, ["The Martian", "Inception", "Interstellar"]),
    ("Horror", 30.0, 1.8e7, ["Insidious 3", "The Conjuring", "It"]),
    ("Thriller/Suspense", 35.0, 2.0e7, ["Gone Girl", "Split", "Taken"]),
    ("Musical", 3.0, 3.0e7, ["Into the Woods", "Les Miserables", "Chicago"]),
];

const YEARS: std::ops::RangeInclusive<i64> = 1995..=2018;
const TICKET_PRICE: f64 = 8.0;
const REFERENCE_YEAR: i64 = 2018;

/// SplitMix64: deterministic, good enough for sample data.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + unit * (hi - lo)
    }
}

struct SampleRow {
    genre: &'static str,
    year: i64,
    movies_released: i64,
    gross: f64,
    tickets_sold: f64,
    inflation_adjusted_gross: f64,
    top_movie: &'static str,
    top_movie_gross: f64,
}

fn generate(rng: &mut SampleRng) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    for (genre, base_releases, base_gross, titles) in GENRES {
        for year in YEARS {
            let movies_released = (base_releases * rng.range(0.7, 1.3)).round().max(1.0) as i64;
            let gross = (movies_released as f64 * base_gross * rng.range(0.5, 1.5)).round();
            // Roughly 3 % yearly inflation up to the reference year.
            let inflation = 1.03_f64.powi((REFERENCE_YEAR - year) as i32);
            let title = titles[(rng.next_u64() % titles.len() as u64) as usize];
            rows.push(SampleRow {
                genre,
                year,
                movies_released,
                gross,
                tickets_sold: (gross / TICKET_PRICE).round(),
                inflation_adjusted_gross: (gross * inflation).round(),
                top_movie: title,
                top_movie_gross: (gross * rng.range(0.1, 0.35)).round(),
            });
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "Genre",
        "Year",
        "Movies Released",
        "Gross",
        "Tickets Sold",
        "Inflation-Adjusted Gross",
        "Top Movie",
        "Top Movie Gross (That Year)",
    ])?;
    for r in rows {
        writer.write_record([
            r.genre.to_string(),
            r.year.to_string(),
            r.movies_released.to_string(),
            format!("${:.0}", r.gross),
            format!("{:.0}", r.tickets_sold),
            format!("${:.0}", r.inflation_adjusted_gross),
            r.top_movie.to_string(),
            format!("${:.0}", r.top_movie_gross),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Genre", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("Movies Released", DataType::Int64, false),
        Field::new("Gross", DataType::Float64, false),
        Field::new("Tickets Sold", DataType::Float64, false),
        Field::new("Inflation-Adjusted Gross", DataType::Float64, false),
        Field::new("Top Movie", DataType::Utf8, false),
        Field::new("Top Movie Gross (That Year)", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.genre))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.movies_released))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.gross))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.tickets_sold))),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.inflation_adjusted_gross),
            )),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.top_movie))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.top_movie_gross))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_genre_stats.csv"));

    let rows = generate(&mut SampleRng(42));

    let is_parquet = output_path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&output_path, &rows)?;
    } else {
        write_csv(&output_path, &rows)?;
    }

    log::info!("wrote {} rows to {}", rows.len(), output_path.display());
    println!("Wrote {} genre/year rows to {}", rows.len(), output_path.display());
    Ok(())
}
