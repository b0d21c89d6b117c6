use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::color::parse_hex;
use crate::config::DashboardConfig;
use crate::data::aggregate::DashboardData;
use crate::data::loader;
use crate::error::DashboardError;
use crate::render::panels::draw_text_panel;
use crate::render::plot::{draw_genre_totals, draw_top_movies, draw_trend_lines};
use crate::render::{bold_font, ChartLabels, PanelStyle};

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Load → aggregate → render → save. Returns the path that was written.
pub fn run(config: &DashboardConfig) -> Result<PathBuf> {
    config.validate()?;

    let dataset = loader::load_file(&config.input_path)?;
    if dataset.is_empty() {
        warn!("{} has no rows, panels will be empty", config.input_path.display());
    }

    let data = DashboardData::from_dataset(
        &dataset,
        &config.genres_of_interest,
        config.top_movies_year,
        config.top_movies_limit,
    );

    render_dashboard(&data, config, &config.output_path)?;
    info!("wrote dashboard to {}", config.output_path.display());
    Ok(config.output_path.clone())
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Render the figure in memory and write it to `path` in one step.
/// `.svg` gives vector output; other extensions go through the `image` encoder.
pub fn render_dashboard(data: &DashboardData, config: &DashboardConfig, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let size = (config.width, config.height);

    if ext == "svg" {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            draw_figure(&root, data, config)?;
            root.present()?;
        }
        std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
        return Ok(());
    }

    let format = raster_format(&ext)?;

    let mut buffer = vec![0u8; config.width as usize * config.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        draw_figure(&root, data, config)?;
        root.present()?;
    }

    let img = image::RgbImage::from_raw(config.width, config.height, buffer)
        .ok_or_else(|| DashboardError::ImageEncode("pixel buffer has the wrong size".into()))?;
    let mut encoded = std::io::Cursor::new(Vec::new());
    img.write_to(&mut encoded, format)
        .map_err(|e| DashboardError::ImageEncode(e.to_string()))?;
    std::fs::write(path, encoded.into_inner()).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Raster formats this build can encode. Must follow the `image` features in Cargo.toml.
fn raster_format(ext: &str) -> Result<image::ImageFormat, DashboardError> {
    use image::ImageFormat;
    match ImageFormat::from_extension(ext) {
        Some(format @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp)) => Ok(format),
        _ => Err(DashboardError::UnsupportedFormat(ext.to_string())),
    }
}

/// Background, main title and the 3×2 panel grid.
fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, data: &DashboardData, config: &DashboardConfig) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let background = parse_hex(&config.background)?;
    let palette = config.chart_palette()?;
    let style = PanelStyle::from(&config.fonts);

    root.fill(&background)?;
    let body = root.titled(&config.title, bold_font(config.fonts.title))?;
    let panels = body.margin(0, 10, 10, 10).split_evenly((3, 2));

    draw_genre_totals(
        &panels[0],
        &data.movies_by_genre,
        palette.color_at(0),
        ChartLabels {
            title: "Total Movies Released by Genre",
            x_desc: "Genre",
            y_desc: "Total Movies Released",
        },
        style,
    )?;

    draw_genre_totals(
        &panels[1],
        &data.gross_by_genre,
        palette.color_at(1),
        ChartLabels {
            title: "Total Inflation-Adjusted Gross by Genre",
            x_desc: "Genre",
            y_desc: "Total Inflation-Adjusted Gross",
        },
        style,
    )?;

    draw_trend_lines(
        &panels[2],
        &data.trends,
        &palette,
        ChartLabels {
            title: "Movies Released Trends by Genre over Years",
            x_desc: "Year",
            y_desc: "Movies Released",
        },
        style,
    )?;

    draw_text_panel(&panels[3], &config.findings, config.fonts.findings)?;

    let year = config.top_movies_year;
    let top_title = format!("Top Movies Gross Revenue by Genre in {year}");
    let top_y_desc = format!("Top Movie Gross ({year})");
    draw_top_movies(
        &panels[4],
        &data.top_movies,
        &palette,
        ChartLabels {
            title: &top_title,
            x_desc: "Genre",
            y_desc: &top_y_desc,
        },
        style,
    )?;

    draw_text_panel(&panels[5], &config.attribution, config.fonts.attribution)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    const FIXTURE: &str = "\
Genre,Year,Movies Released,Gross,Tickets Sold,Inflation-Adjusted Gross,Top Movie,Top Movie Gross (That Year)
Action,2014,30,\"$1,000,000\",120000,\"$1,200,000\",Guardians of the Galaxy,\"$333,176,600\"
Action,2015,28,\"$1,100,000\",125000,\"$1,150,000\",Furious 7,\"$353,007,020\"
Drama,2014,90,\"$800,000\",95000,\"$900,000\",American Sniper,\"$350,126,372\"
Drama,2015,85,\"$700,000\",90000,\"$720,000\",Spotlight,\"$45,055,776\"
Comedy,2014,40,\"$600,000\",70000,\"$650,000\",22 Jump Street,\"$191,719,337\"
Comedy,2015,38,\"$650,000\",72000,\"$660,000\",Trainwreck,\"$110,212,700\"
";

    fn small_config(dir: &TempDir, output: &str) -> DashboardConfig {
        let input = dir.path().join("stats.csv");
        std::fs::File::create(&input)
            .unwrap()
            .write_all(FIXTURE.as_bytes())
            .unwrap();

        DashboardConfig {
            input_path: input,
            output_path: dir.path().join(output),
            width: 900,
            height: 900,
            fonts: crate::config::FontSizes {
                title: 24,
                panel_title: 16,
                axis: 10,
                findings: 14,
                attribution: 14,
            },
            ..Default::default()
        }
    }

    #[test]
    fn pipeline_writes_a_png() {
        let dir = TempDir::new().unwrap();
        let config = small_config(&dir, "dashboard.png");

        let written = run(&config).unwrap();
        assert_eq!(written, config.output_path);

        let meta = std::fs::metadata(&written).unwrap();
        assert!(meta.len() > 0);
        let img = image::open(&written).unwrap();
        assert_eq!((img.width(), img.height()), (900, 900));
    }

    #[test]
    fn each_run_overwrites_the_output() {
        let dir = TempDir::new().unwrap();
        let config = small_config(&dir, "dashboard.png");
        std::fs::write(&config.output_path, b"stale").unwrap();

        run(&config).unwrap();
        let first = std::fs::read(&config.output_path).unwrap();
        assert_ne!(first, b"stale");
        assert!(image::load_from_memory(&first).is_ok());

        std::fs::write(&config.output_path, b"stale").unwrap();
        run(&config).unwrap();
        assert!(image::open(&config.output_path).is_ok());
    }

    #[test]
    fn year_without_rows_still_renders() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig {
            top_movies_year: 1990,
            ..small_config(&dir, "dashboard.png")
        };
        run(&config).unwrap();
        assert!(config.output_path.exists());
    }

    #[test]
    fn svg_output_follows_the_extension() {
        let dir = TempDir::new().unwrap();
        let config = small_config(&dir, "dashboard.svg");
        run(&config).unwrap();

        let svg = std::fs::read_to_string(&config.output_path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Film Genre Dashboard"));
        assert!(svg.contains("Furious 7"));
    }

    #[test]
    fn missing_column_fails_before_any_output() {
        let dir = TempDir::new().unwrap();
        let config = small_config(&dir, "dashboard.png");
        let broken: String = FIXTURE
            .lines()
            .map(|l| l.replacen("Movies Released,", "Released,", 1))
            .collect::<Vec<_>>()
            .join("\n");
        std::fs::write(&config.input_path, broken).unwrap();

        let err = run(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::MissingColumn { column }) if column == "Movies Released"
        ));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn unknown_output_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = small_config(&dir, "dashboard.txt");
        let err = run(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::UnsupportedFormat(_))
        ));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn unwritable_output_path_fails() {
        let dir = TempDir::new().unwrap();
        let config = small_config(&dir, "missing-dir/dashboard.png");
        assert!(run(&config).is_err());
    }

    #[test]
    fn disabled_image_format_is_rejected_without_a_file() {
        let dir = TempDir::new().unwrap();
        let config = small_config(&dir, "dashboard.gif");
        let err = run(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::UnsupportedFormat(ext)) if ext == "gif"
        ));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn raster_formats_follow_enabled_encoders() {
        assert_eq!(raster_format("png").unwrap(), image::ImageFormat::Png);
        assert_eq!(raster_format("jpg").unwrap(), image::ImageFormat::Jpeg);
        assert_eq!(raster_format("bmp").unwrap(), image::ImageFormat::Bmp);
        for ext in ["gif", "tiff", "webp", "ico", ""] {
            assert!(raster_format(ext).is_err(), "{ext} should be rejected");
        }
    }
}
