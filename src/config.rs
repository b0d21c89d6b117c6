//! Dashboard configuration.
//!
//! Every field has a built-in default, so running without a config file
//! reproduces the stock dashboard. A JSON file may override any subset.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::color::ChartPalette;

/// Font sizes in pixels, for a figure around 1800 px wide.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: u32,
    pub panel_title: u32,
    pub axis: u32,
    pub findings: u32,
    pub attribution: u32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 50,
            panel_title: 32,
            axis: 18,
            findings: 36,
            attribution: 40,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Input table (`.csv`, `.json` or `.parquet`).
    pub input_path: PathBuf,
    /// Output image; the extension picks the format.
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Figure background, `#rrggbb`.
    pub background: String,
    pub title: String,
    /// Series/bar colours, `#rrggbb`, used in order.
    pub palette: Vec<String>,
    pub genres_of_interest: Vec<String>,
    pub top_movies_year: i64,
    pub top_movies_limit: usize,
    /// Lines of the findings panel.
    pub findings: Vec<String>,
    /// Lines of the attribution panel.
    pub attribution: Vec<String>,
    pub fonts: FontSizes,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("ThrowbackDataThursday Week 11 - Film Genre Stats.csv"),
            output_path: PathBuf::from("genre_dashboard.png"),
            width: 1800,
            height: 1800,
            background: "#f0f0f0".to_string(),
            title: "Film Genre Dashboard".to_string(),
            palette: ["#FFD700", "#FF6347", "#00FF00", "#4169E1", "#8B008B"]
                .map(String::from)
                .to_vec(),
            genres_of_interest: ["Adventure", "Action", "Comedy", "Drama", "Sci-Fi"]
                .map(String::from)
                .to_vec(),
            top_movies_year: 2015,
            top_movies_limit: 5,
            findings: [
                "1. More drama-genre films are released",
                "than other genres.",
                "2. The Adventure genre has the highest",
                "overall inflation-adjusted revenue.",
                "3. From 1995 to 2016, the adventure genre",
                "has the most number of films released.",
                "4. The movie 'Star Wars Ep VII: The Force Awakens'",
                "has made the most money.",
            ]
            .map(String::from)
            .to_vec(),
            attribution: [
                "Data : Kaggle, Film Genre Statistics",
                "Rendered by genre-dashboard",
            ]
            .map(String::from)
            .to_vec(),
            fonts: FontSizes::default(),
        }
    }
}

impl DashboardConfig {
    /// Load overrides from a JSON file; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later, mid-render.
    pub fn validate(&self) -> Result<()> {
        self.chart_palette()?;
        crate::color::parse_hex(&self.background).context("invalid background colour")?;
        anyhow::ensure!(
            self.width > 0 && self.height > 0,
            "figure size must be positive, got {}x{}",
            self.width,
            self.height
        );
        Ok(())
    }

    /// Palette with enough colours for one per genre of interest.
    pub fn chart_palette(&self) -> Result<ChartPalette> {
        let palette = ChartPalette::from_hex(&self.palette).context("invalid palette")?;
        Ok(palette.extended_to(self.genres_of_interest.len()))
    }
}
