/// Drawing routines for the dashboard panels.
///
/// Every routine draws onto a caller-supplied `DrawingArea`, so the same code
/// renders into the bitmap and the SVG backend.

pub mod panels;
pub mod plot;

use plotters::style::{FontDesc, FontFamily, FontStyle, IntoFont, TextStyle};

use crate::config::FontSizes;

/// Sizes shared by the chart panels.
#[derive(Debug, Clone, Copy)]
pub struct PanelStyle {
    pub title_size: u32,
    pub axis_size: u32,
}

impl From<&FontSizes> for PanelStyle {
    fn from(fonts: &FontSizes) -> Self {
        PanelStyle {
            title_size: fonts.panel_title,
            axis_size: fonts.axis,
        }
    }
}

/// Title and axis descriptions of one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartLabels<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
}

pub(crate) fn font(size: u32) -> FontDesc<'static> {
    (FontFamily::SansSerif, size).into_font()
}

pub(crate) fn bold_font(size: u32) -> TextStyle<'static> {
    TextStyle::from(font(size).style(FontStyle::Bold))
}

/// Compact value-axis label: `1.5B`, `320M`, `12K`, `250`.
pub fn format_amount(v: f64) -> String {
    let (scaled, suffix) = match v.abs() {
        a if a >= 1e9 => (v / 1e9, "B"),
        a if a >= 1e6 => (v / 1e6, "M"),
        a if a >= 1e3 => (v / 1e3, "K"),
        _ => (v, ""),
    };
    let mut text = format!("{scaled:.1}");
    if text.ends_with(".0") {
        text.truncate(text.len() - 2);
    }
    text + suffix
}

/// Upper bound of a value axis: 10 % above the largest value, never empty.
pub(crate) fn axis_max<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let max = values.into_iter().fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_abbreviated() {
        assert_eq!(format_amount(1_500_000_000.0), "1.5B");
        assert_eq!(format_amount(320_000_000.0), "320M");
        assert_eq!(format_amount(12_000.0), "12K");
        assert_eq!(format_amount(250.0), "250");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn axis_max_leaves_headroom() {
        assert!((axis_max([10.0, 50.0]) - 55.0).abs() < 1e-9);
        assert_eq!(axis_max(std::iter::empty()), 1.0);
        assert_eq!(axis_max([0.0]), 1.0);
    }
}
