use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{cast, cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{self, GenreDataset, GenreRecord};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a genre statistics table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the column names listed in [`model::REQUIRED_COLUMNS`]
/// * `.json`    – `[{ "Genre": "Action", "Year": 2015, ... }, ...]`
/// * `.parquet` – one column per field, numeric columns of any int/float type
///
/// The whole file is read at once. A missing required column fails here,
/// before anything is drawn.
pub fn load_file(path: &Path) -> Result<GenreDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DashboardError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading dataset from {}", path.display()))?;

    info!("loaded {} rows from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<GenreDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    debug!("CSV columns: {headers:?}");
    model::check_required_columns(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<GenreRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(GenreDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the layout of `df.to_json(orient='records')`.
/// Every object must carry the required keys.
fn load_json(path: &Path) -> Result<GenreDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        model::check_required_columns(&keys)?;

        let record: GenreRecord =
            serde_json::from_value(row.clone()).with_context(|| format!("JSON row {i}"))?;
        records.push(record);
    }

    Ok(GenreDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); numeric columns are cast to the
/// types the dashboard needs.
fn load_parquet(path: &Path) -> Result<GenreDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let field_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    debug!("parquet columns: {field_names:?}");
    model::check_required_columns(&field_names)?;

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        records.extend(batch_to_records(&batch)?);
    }

    Ok(GenreDataset::from_records(records))
}

fn batch_to_records(batch: &RecordBatch) -> Result<Vec<GenreRecord>> {
    let genre = string_column(batch, model::GENRE)?;
    let year = float_column(batch, model::YEAR)?;
    let movies = float_column(batch, model::MOVIES_RELEASED)?;
    let adjusted = float_column(batch, model::INFLATION_ADJUSTED_GROSS)?;
    let top_movie = string_column(batch, model::TOP_MOVIE)?;
    let top_gross = float_column(batch, model::TOP_MOVIE_GROSS)?;

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        records.push(GenreRecord {
            genre: genre[row].clone().unwrap_or_default(),
            year: required_count(&year, row, model::YEAR)?,
            movies_released: required_count(&movies, row, model::MOVIES_RELEASED)?,
            inflation_adjusted_gross: required(&adjusted, row, model::INFLATION_ADJUSTED_GROSS)?,
            top_movie: top_movie[row].clone().unwrap_or_default(),
            top_movie_gross: top_gross[row],
        });
    }
    Ok(records)
}

// -- Arrow helpers --

fn required(col: &[Option<f64>], row: usize, name: &str) -> Result<f64> {
    col[row].with_context(|| format!("Row {row}: null value in '{name}'"))
}

fn required_count(col: &[Option<f64>], row: usize, name: &str) -> Result<i64> {
    let v = required(col, row, name)?;
    anyhow::ensure!(
        v.fract() == 0.0,
        "Row {row}: expected an integer in '{name}', got {v}"
    );
    Ok(v as i64)
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| {
            DashboardError::MissingColumn {
                column: name.to_string(),
            }
            .into()
        })
}

/// Read a text column, casting whatever string flavour the writer chose to Utf8.
fn string_column(batch: &RecordBatch, name: &str) -> Result<Vec<Option<String>>> {
    let casted = cast(column(batch, name)?, &DataType::Utf8)
        .with_context(|| format!("column '{name}' is not text"))?;
    Ok(casted
        .as_string::<i32>()
        .iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Read any integer or float column as `f64`.
///
/// Text columns go through [`model::parse_amount`] like CSV cells do, so
/// `"$353,007,020"` is a number here too. Other types are cast strictly:
/// a value that does not convert is an error, never a silent null.
fn float_column(batch: &RecordBatch, name: &str) -> Result<Vec<Option<f64>>> {
    let source = column(batch, name)?;
    if matches!(source.data_type(), DataType::Utf8 | DataType::LargeUtf8) {
        let text = cast(source, &DataType::Utf8)
            .with_context(|| format!("column '{name}' is not text"))?;
        return text
            .as_string::<i32>()
            .iter()
            .enumerate()
            .map(|(row, v)| match v {
                Some(s) => model::parse_amount(s)
                    .with_context(|| format!("Row {row}: bad value in '{name}'")),
                None => Ok(None),
            })
            .collect();
    }

    let strict = CastOptions {
        safe: false,
        ..Default::default()
    };
    let casted = cast_with_options(source, &DataType::Float64, &strict)
        .with_context(|| format!("column '{name}' is not numeric"))?;
    let values = casted.as_primitive::<Float64Type>();
    Ok((0..values.len())
        .map(|i| (!values.is_null(i)).then(|| values.value(i)))
        .collect())
}
