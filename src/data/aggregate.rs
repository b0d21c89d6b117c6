use std::collections::BTreeMap;

use log::{debug, warn};

use super::model::{GenreDataset, GenreRecord};

// ---------------------------------------------------------------------------
// Derived datasets
// ---------------------------------------------------------------------------

/// One bar of a per-genre total chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreTotal {
    pub genre: String,
    pub value: f64,
}

/// Movies released per `(genre, year)` group; iteration order is ascending
/// by genre, then year.
pub type GenreYearTotals = BTreeMap<(String, i64), i64>;

/// Movies released per year for one genre, ascending by year.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreSeries {
    pub genre: String,
    /// Position of the genre in the genres-of-interest list; picks its colour.
    pub slot: usize,
    pub points: Vec<(i64, i64)>,
}

/// The best-grossing movie of one genre in the selected year.
#[derive(Debug, Clone, PartialEq)]
pub struct TopMovie {
    pub genre: String,
    pub title: String,
    pub gross: f64,
}

impl TopMovie {
    /// Two-line legend label: genre, then movie title.
    pub fn label_lines(&self) -> [&str; 2] {
        [self.genre.as_str(), self.title.as_str()]
    }
}

// ---------------------------------------------------------------------------
// Per-genre totals
// ---------------------------------------------------------------------------

/// Sum `value` per genre and order the result descending by total.
/// Equal totals keep ascending genre order.
fn sum_by_genre<F>(dataset: &GenreDataset, value: F) -> Vec<GenreTotal>
where
    F: Fn(&GenreRecord) -> f64,
{
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for rec in &dataset.records {
        *sums.entry(rec.genre.as_str()).or_default() += value(rec);
    }

    let mut totals: Vec<GenreTotal> = sums
        .into_iter()
        .map(|(genre, value)| GenreTotal {
            genre: genre.to_string(),
            value,
        })
        .collect();
    totals.sort_by(|a, b| b.value.total_cmp(&a.value));
    totals
}

/// Total `Movies Released` per genre, descending.
pub fn movies_released_by_genre(dataset: &GenreDataset) -> Vec<GenreTotal> {
    sum_by_genre(dataset, |r| r.movies_released as f64)
}

/// Total `Inflation-Adjusted Gross` per genre, descending.
pub fn inflation_adjusted_gross_by_genre(dataset: &GenreDataset) -> Vec<GenreTotal> {
    sum_by_genre(dataset, |r| r.inflation_adjusted_gross)
}

// ---------------------------------------------------------------------------
// Genre × Year
// ---------------------------------------------------------------------------

/// Sum `Movies Released` grouped by `(genre, year)`. Duplicate rows for the
/// same pair add up.
pub fn totals_by_genre_year(dataset: &GenreDataset) -> GenreYearTotals {
    let mut groups = GenreYearTotals::new();
    for rec in &dataset.records {
        *groups.entry((rec.genre.clone(), rec.year)).or_default() += rec.movies_released;
    }
    groups
}

/// Extract one movies-released series per genre of interest, in the order
/// the genres are listed. Genres with no rows are skipped.
pub fn trend_series<S: AsRef<str>>(totals: &GenreYearTotals, genres: &[S]) -> Vec<GenreSeries> {
    let mut series = Vec::with_capacity(genres.len());
    for (slot, genre) in genres.iter().enumerate() {
        let genre = genre.as_ref();
        // Keys are sorted, so one genre's years form a contiguous ascending run.
        let points: Vec<(i64, i64)> = totals
            .range((genre.to_string(), i64::MIN)..=(genre.to_string(), i64::MAX))
            .map(|((_, year), movies)| (*year, *movies))
            .collect();

        if points.is_empty() {
            warn!("genre of interest '{genre}' has no rows, skipping its trend line");
            continue;
        }
        series.push(GenreSeries {
            genre: genre.to_string(),
            slot,
            points,
        });
    }
    series
}

// ---------------------------------------------------------------------------
// Top movie per genre in one year
// ---------------------------------------------------------------------------

/// For `year`, pick per genre the row with the highest
/// `Top Movie Gross (That Year)` and return the first `limit` genres in
/// ascending genre order.
///
/// When several rows share the maximum, the first one in file order wins.
/// Rows without a gross value are ignored; a genre whose rows all lack one
/// is left out.
pub fn top_movies_for_year(dataset: &GenreDataset, year: i64, limit: usize) -> Vec<TopMovie> {
    let mut best: BTreeMap<&str, (&GenreRecord, f64)> = BTreeMap::new();
    let mut rows_in_year = 0usize;

    for rec in dataset.records.iter().filter(|r| r.year == year) {
        rows_in_year += 1;
        let Some(gross) = rec.top_movie_gross else {
            continue;
        };
        let replaces = best
            .get(rec.genre.as_str())
            .map_or(true, |(_, current)| gross > *current);
        if replaces {
            best.insert(rec.genre.as_str(), (rec, gross));
        }
    }

    if rows_in_year == 0 {
        warn!("no rows for year {year}, top movie panel will be empty");
    }

    best.into_values()
        .take(limit)
        .map(|(rec, gross)| TopMovie {
            genre: rec.genre.clone(),
            title: rec.top_movie.clone(),
            gross,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// DashboardData – everything the renderer needs
// ---------------------------------------------------------------------------

/// The derived datasets behind the four chart panels.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub movies_by_genre: Vec<GenreTotal>,
    pub gross_by_genre: Vec<GenreTotal>,
    pub trends: Vec<GenreSeries>,
    pub top_movies: Vec<TopMovie>,
}

impl DashboardData {
    /// Run every aggregation over the loaded dataset.
    pub fn from_dataset<S: AsRef<str>>(
        dataset: &GenreDataset,
        genres_of_interest: &[S],
        top_movies_year: i64,
        top_movies_limit: usize,
    ) -> Self {
        let movies_by_genre = movies_released_by_genre(dataset);
        let gross_by_genre = inflation_adjusted_gross_by_genre(dataset);
        let by_genre_year = totals_by_genre_year(dataset);
        let trends = trend_series(&by_genre_year, genres_of_interest);
        let top_movies = top_movies_for_year(dataset, top_movies_year, top_movies_limit);

        debug!(
            "derived {} genres, {} genre/year groups, {} trend lines, {} top movies",
            movies_by_genre.len(),
            by_genre_year.len(),
            trends.len(),
            top_movies.len()
        );

        DashboardData {
            movies_by_genre,
            gross_by_genre,
            trends,
            top_movies,
        }
    }
}
