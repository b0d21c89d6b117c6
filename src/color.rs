use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            RGBColor(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// Parse a `#rrggbb` (or `#rgb`) hex string.
pub fn parse_hex(value: &str) -> Result<RGBColor, DashboardError> {
    let rgb = Srgb::<u8>::from_str(value.trim())
        .map_err(|_| DashboardError::InvalidColor(value.to_string()))?;
    Ok(RGBColor(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// ChartPalette: series index → RGBColor
// ---------------------------------------------------------------------------

/// The dashboard's fixed colour list. Indexing past the end wraps around.
#[derive(Debug, Clone)]
pub struct ChartPalette {
    colors: Vec<RGBColor>,
}

impl ChartPalette {
    /// Parse every hex entry; an empty list falls back to five generated hues.
    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Result<Self, DashboardError> {
        let colors = entries
            .iter()
            .map(|e| parse_hex(e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if colors.is_empty() {
            return Ok(ChartPalette {
                colors: generate_palette(5),
            });
        }
        Ok(ChartPalette { colors })
    }

    /// Make sure at least `n` distinct colours exist, appending generated hues.
    pub fn extended_to(mut self, n: usize) -> Self {
        if n > self.colors.len() {
            let extra = generate_palette(n - self.colors.len());
            self.colors.extend(extra);
        }
        self
    }

    /// Colour for the `i`-th bar or series.
    pub fn color_at(&self, i: usize) -> RGBColor {
        self.colors[i % self.colors.len()]
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.colors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex("#FFD700").unwrap(), RGBColor(255, 215, 0));
        assert_eq!(parse_hex("8B008B").unwrap(), RGBColor(139, 0, 139));
        assert!(matches!(
            parse_hex("#GGGGGG"),
            Err(DashboardError::InvalidColor(v)) if v == "#GGGGGG"
        ));
    }

    #[test]
    fn generated_palette_has_distinct_colors() {
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn palette_wraps_and_extends() {
        let palette = ChartPalette::from_hex(&["#ff0000", "#00ff00"]).unwrap();
        assert_eq!(palette.color_at(0), RGBColor(255, 0, 0));
        assert_eq!(palette.color_at(3), RGBColor(0, 255, 0));

        let palette = palette.extended_to(4);
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.color_at(0), RGBColor(255, 0, 0));

        let empty: [&str; 0] = [];
        assert_eq!(ChartPalette::from_hex(&empty).unwrap().len(), 5);
    }
}
