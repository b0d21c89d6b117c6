use serde::{Deserialize, Deserializer};

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const GENRE: &str = "Genre";
pub const YEAR: &str = "Year";
pub const MOVIES_RELEASED: &str = "Movies Released";
pub const INFLATION_ADJUSTED_GROSS: &str = "Inflation-Adjusted Gross";
pub const TOP_MOVIE: &str = "Top Movie";
pub const TOP_MOVIE_GROSS: &str = "Top Movie Gross (That Year)";

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    GENRE,
    YEAR,
    MOVIES_RELEASED,
    INFLATION_ADJUSTED_GROSS,
    TOP_MOVIE,
    TOP_MOVIE_GROSS,
];

/// Check a header list against [`REQUIRED_COLUMNS`], reporting the first gap.
pub fn check_required_columns<S: AsRef<str>>(headers: &[S]) -> Result<(), DashboardError> {
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.as_ref().trim() == required) {
            return Err(DashboardError::MissingColumn {
                column: required.to_string(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GenreRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One (genre, year) row of the statistics table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenreRecord {
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Year", deserialize_with = "de_count")]
    pub year: i64,
    #[serde(rename = "Movies Released", deserialize_with = "de_count")]
    pub movies_released: i64,
    #[serde(rename = "Inflation-Adjusted Gross", deserialize_with = "de_amount")]
    pub inflation_adjusted_gross: f64,
    #[serde(rename = "Top Movie", default)]
    pub top_movie: String,
    #[serde(
        rename = "Top Movie Gross (That Year)",
        default,
        deserialize_with = "de_opt_amount"
    )]
    pub top_movie_gross: Option<f64>,
}

// ---------------------------------------------------------------------------
// GenreDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All rows of the input file, in file order.
#[derive(Debug, Clone, Default)]
pub struct GenreDataset {
    pub records: Vec<GenreRecord>,
}

impl GenreDataset {
    pub fn from_records(records: Vec<GenreRecord>) -> Self {
        GenreDataset { records }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Numeric cell parsing
// ---------------------------------------------------------------------------

/// A numeric cell as it appears on disk: either a real number or text such
/// as `"$1,234,567"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Parse a currency-formatted number. `None` for an empty cell.
pub fn parse_amount(s: &str) -> Result<Option<f64>, DashboardError> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    cleaned
        .parse::<f64>()
        .map(Some)
        .map_err(|_| DashboardError::InvalidAmount(s.to_string()))
}

fn de_opt_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    match Option::<RawAmount>::deserialize(d)? {
        None => Ok(None),
        Some(RawAmount::Number(v)) => Ok(Some(v)),
        Some(RawAmount::Text(s)) => parse_amount(&s).map_err(serde::de::Error::custom),
    }
}

fn de_amount<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    de_opt_amount(d)?.ok_or_else(|| serde::de::Error::custom("empty numeric value"))
}

fn de_count<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let v = de_amount(d)?;
    if v.fract() != 0.0 {
        return Err(serde::de::Error::custom(format!("expected an integer, got {v}")));
    }
    Ok(v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_strips_currency_formatting() {
        assert_eq!(parse_amount("$1,234,567").unwrap(), Some(1_234_567.0));
        assert_eq!(parse_amount(" 42.5 ").unwrap(), Some(42.5));
        assert_eq!(parse_amount("").unwrap(), None);
        assert!(matches!(
            parse_amount("n/a"),
            Err(DashboardError::InvalidAmount(_))
        ));
    }

    #[test]
    fn missing_required_column_is_reported_by_name() {
        let headers = ["Genre", "Year", "Movies Released", "Top Movie"];
        match check_required_columns(&headers) {
            Err(DashboardError::MissingColumn { column }) => {
                assert_eq!(column, INFLATION_ADJUSTED_GROSS)
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(check_required_columns(&REQUIRED_COLUMNS).is_ok());
    }
}
