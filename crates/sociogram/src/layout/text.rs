//! Text measurement for table-box sizing.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use sociogram_core::geometry::Size;

/// Measures rendered text sizes using real font metrics.
///
/// Holds a reusable [`FontSystem`] instance to avoid expensive recreation;
/// one measurer is constructed per layout engine and dropped with it.
pub struct TextMeasurer {
    font_system: FontSystem,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer {
    /// Create a new measurer with a default [`FontSystem`].
    pub fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: FontSystem::new(),
        }
    }

    /// Calculate the rendered size of a single line of text in pixels.
    ///
    /// Uses cosmic-text shaping for accurate metrics; when no font is
    /// available (bare environments), falls back to a width estimate from
    /// the character count.
    pub fn measure(&mut self, text: &str, font_size: usize) -> Size {
        // Convert font size from points to pixels (roughly 1.33x multiplier for standard DPI)
        let font_size_px = font_size as f32 * 1.33;
        let line_height = font_size_px * 1.2;
        let metrics = Metrics::new(font_size_px, line_height);

        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut self.font_system);

        let attrs = Attrs::new().family(Family::Name("Arial"));

        // Unlimited buffer size so the text flows naturally
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if layout_runs.is_empty() {
            // Estimate when shaping produced nothing
            max_width = text.len() as f32 * (font_size_px * 0.6);
            total_height = metrics.line_height;
        } else {
            for run in &layout_runs {
                if let Some(last) = run.glyphs.last() {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        }

        Size::new(max_width, total_height)
    }
}
