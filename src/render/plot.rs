use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{axis_max, bold_font, font, format_amount, ChartLabels, PanelStyle};
use crate::color::ChartPalette;
use crate::data::aggregate::{GenreSeries, GenreTotal, TopMovie};

// ---------------------------------------------------------------------------
// Genre totals (bar chart)
// ---------------------------------------------------------------------------

/// Bar chart of one per-genre aggregate, genre names rotated under the bars.
pub fn draw_genre_totals<DB>(
    area: &DrawingArea<DB, Shift>,
    totals: &[GenreTotal],
    color: RGBColor,
    labels: ChartLabels<'_>,
    style: PanelStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let names: Vec<&str> = totals.iter().map(|t| t.genre.as_str()).collect();
    let slots = names.len().max(1);
    let y_max = axis_max(totals.iter().map(|t| t.value));

    let mut chart = ChartBuilder::on(area)
        .caption(labels.title, bold_font(style.title_size))
        .margin(20)
        .x_label_area_size(style.axis_size * 7)
        .y_label_area_size(style.axis_size * 5)
        .build_cartesian_2d((0..slots).into_segmented(), 0f64..y_max)?;

    chart.plotting_area().fill(&WHITE)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_label_formatter(&|v| category_label(v, &names))
        .x_label_style(font(style.axis_size).transform(FontTransform::Rotate90))
        .y_label_formatter(&|v| format_amount(*v))
        .label_style(font(style.axis_size))
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .axis_desc_style(font(style.axis_size))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(color.filled())
            .margin(8)
            .data(totals.iter().enumerate().map(|(i, t)| (i, t.value))),
    )?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Trend lines
// ---------------------------------------------------------------------------

/// One line per genre series with a legend. A series takes the palette
/// colour of its slot in the genres-of-interest list.
pub fn draw_trend_lines<DB>(
    area: &DrawingArea<DB, Shift>,
    series: &[GenreSeries],
    palette: &ChartPalette,
    labels: ChartLabels<'_>,
    style: PanelStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let years = series.iter().flat_map(|s| s.points.iter().map(|&(year, _)| year));
    let (first, last) = years.fold((i64::MAX, i64::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
    let (first, last) = match (first, last) {
        (i64::MAX, _) => (0, 1),
        (lo, hi) if lo == hi => (lo - 1, hi + 1),
        range => range,
    };
    let y_max = axis_max(
        series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, movies)| movies as f64)),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(labels.title, bold_font(style.title_size))
        .margin(20)
        .x_label_area_size(style.axis_size * 4)
        .y_label_area_size(style.axis_size * 5)
        .build_cartesian_2d(first..last, 0f64..y_max)?;

    chart.plotting_area().fill(&WHITE)?;
    chart
        .configure_mesh()
        .x_label_formatter(&|y| y.to_string())
        .x_label_style(font(style.axis_size).transform(FontTransform::Rotate90))
        .y_label_formatter(&|v| format_amount(*v))
        .label_style(font(style.axis_size))
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .axis_desc_style(font(style.axis_size))
        .draw()?;

    for s in series {
        let color = palette.color_at(s.slot);
        chart
            .draw_series(LineSeries::new(
                s.points.iter().map(|&(year, movies)| (year, movies as f64)),
                color.stroke_width(3),
            ))?
            .label(s.genre.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(font(style.axis_size))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Top movie per genre (indexed bar chart)
// ---------------------------------------------------------------------------

/// One bar per row, coloured `palette[i % len]`, genre names as tick labels
/// and a legend whose entries read "genre" over "movie title".
pub fn draw_top_movies<DB>(
    area: &DrawingArea<DB, Shift>,
    movies: &[TopMovie],
    palette: &ChartPalette,
    labels: ChartLabels<'_>,
    style: PanelStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let names: Vec<&str> = movies.iter().map(|m| m.genre.as_str()).collect();
    let slots = names.len().max(1);
    let y_max = axis_max(movies.iter().map(|m| m.gross));

    let mut chart = ChartBuilder::on(area)
        .caption(labels.title, bold_font(style.title_size))
        .margin(20)
        .x_label_area_size(style.axis_size * 7)
        .y_label_area_size(style.axis_size * 5)
        .build_cartesian_2d((0..slots).into_segmented(), 0f64..y_max)?;

    chart.plotting_area().fill(&WHITE)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_label_formatter(&|v| category_label(v, &names))
        .x_label_style(font(style.axis_size).transform(FontTransform::Rotate90))
        .y_label_formatter(&|v| format_amount(*v))
        .label_style(font(style.axis_size))
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .axis_desc_style(font(style.axis_size))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style_func(|v, _| palette.color_at(segment_index(v)).filled())
            .margin(8)
            .data(movies.iter().enumerate().map(|(i, m)| (i, m.gross))),
    )?;

    if !movies.is_empty() {
        draw_two_line_legend(&chart.plotting_area().strip_coord_spec(), movies, palette, style)?;
    }

    Ok(())
}

/// Legend box in the upper-right corner of the plotting area. Plotters'
/// built-in legend lays out single-line labels only.
fn draw_two_line_legend<DB>(
    area: &DrawingArea<DB, Shift>,
    movies: &[TopMovie],
    palette: &ChartPalette,
    style: PanelStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let text_style = TextStyle::from(font(style.axis_size)).color(&BLACK);
    let line_height = (style.axis_size as f64 * 1.25).round() as i32;
    let swatch = style.axis_size as i32;
    let pad = 8;

    let mut text_width = 0;
    for movie in movies {
        for line in movie.label_lines() {
            let (w, _) = area.estimate_text_size(line, &text_style)?;
            text_width = text_width.max(w as i32);
        }
    }

    let (area_w, _) = area.dim_in_pixel();
    let box_w = pad * 3 + swatch + text_width;
    let box_h = pad * 2 + movies.len() as i32 * (line_height * 2 + pad) - pad;
    let left = area_w as i32 - box_w - pad;
    let top = pad;

    area.draw(&Rectangle::new(
        [(left, top), (left + box_w, top + box_h)],
        WHITE.mix(0.8).filled(),
    ))?;
    area.draw(&Rectangle::new(
        [(left, top), (left + box_w, top + box_h)],
        BLACK.stroke_width(1),
    ))?;

    for (i, movie) in movies.iter().enumerate() {
        let y = top + pad + i as i32 * (line_height * 2 + pad);
        area.draw(&Rectangle::new(
            [(left + pad, y), (left + pad + swatch, y + swatch)],
            palette.color_at(i).filled(),
        ))?;
        for (j, line) in movie.label_lines().into_iter().enumerate() {
            area.draw_text(
                line,
                &text_style,
                (left + pad * 2 + swatch, y + j as i32 * line_height),
            )?;
        }
    }

    Ok(())
}

// -- helpers --

fn category_label(v: &SegmentValue<usize>, names: &[&str]) -> String {
    match v {
        SegmentValue::CenterOf(i) => names.get(*i).map(|s| s.to_string()).unwrap_or_default(),
        _ => String::new(),
    }
}

fn segment_index(v: &SegmentValue<usize>) -> usize {
    match v {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i,
        SegmentValue::Last => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_segment_centres_are_labelled() {
        let names = ["Drama", "Action"];
        assert_eq!(category_label(&SegmentValue::CenterOf(1), &names), "Action");
        assert_eq!(category_label(&SegmentValue::Exact(1), &names), "");
        assert_eq!(category_label(&SegmentValue::CenterOf(5), &names), "");
        assert_eq!(category_label(&SegmentValue::Last, &names), "");
    }

    #[test]
    fn segment_index_follows_bar_position() {
        assert_eq!(segment_index(&SegmentValue::Exact(3)), 3);
        assert_eq!(segment_index(&SegmentValue::CenterOf(2)), 2);
    }
}
