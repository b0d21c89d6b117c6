use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::font;

// ---------------------------------------------------------------------------
// Text-only panel
// ---------------------------------------------------------------------------

/// Draw a block of left-aligned lines centred in `area`, with no axes.
/// Blank lines keep their vertical space.
pub fn draw_text_panel<DB, S>(area: &DrawingArea<DB, Shift>, lines: &[S], font_size: u32) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    S: AsRef<str>,
{
    if lines.is_empty() {
        return Ok(());
    }

    let style = TextStyle::from(font(font_size)).color(&BLACK);
    let line_height = (font_size as f64 * 1.4).round() as i32;

    let mut block_width = 0;
    for line in lines {
        let line: &str = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        let (w, _) = area.estimate_text_size(line, &style)?;
        block_width = block_width.max(w as i32);
    }

    let (width, height) = area.dim_in_pixel();
    let block_height = line_height * lines.len() as i32;
    let left = ((width as i32 - block_width) / 2).max(0);
    let top = ((height as i32 - block_height) / 2).max(0);

    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        area.draw_text(line, &style, (left, top + i as i32 * line_height))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use plotters::prelude::*;

    use super::*;

    #[test]
    fn text_panel_renders_into_svg() {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (400, 300)).into_drawing_area();
            draw_text_panel(&root, &["1. First finding", "", "2. Second finding"], 18).unwrap();
            root.present().unwrap();
        }
        assert!(svg.contains("First finding"));
        assert!(svg.contains("Second finding"));
    }

    #[test]
    fn empty_text_panel_draws_nothing() {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (400, 300)).into_drawing_area();
            let lines: [&str; 0] = [];
            draw_text_panel(&root, &lines, 18).unwrap();
            root.present().unwrap();
        }
        assert!(!svg.contains("<text"));
    }
}
