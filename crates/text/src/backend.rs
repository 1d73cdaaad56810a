use crate::{FontDescriptor, FontMetrics, FontWeight};

/// Source of font metrics and advances.
pub trait FontBackend: Send + Sync {
    fn metrics(&self, font: &FontDescriptor) -> FontMetrics;

    /// Horizontal advance of `text` in pixels.
    fn measure(&self, font: &FontDescriptor, text: &str) -> f32;
}

/// Every character advances by the same fraction of the font size.
///
/// Deterministic and font-free, so layouts are reproducible in headless runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceBackend {
    /// Advance of one character at 1px, regular weight.
    pub advance: f32,
    /// Multiplier applied to the advance for bold text.
    pub bold_factor: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl Default for FixedAdvanceBackend {
    fn default() -> Self {
        Self {
            advance: 0.5,
            bold_factor: 1.1,
            ascent: 0.75,
            descent: 0.25,
        }
    }
}

impl FontBackend for FixedAdvanceBackend {
    fn metrics(&self, font: &FontDescriptor) -> FontMetrics {
        let ascent = self.ascent * font.size_px;
        let descent = self.descent * font.size_px;
        FontMetrics {
            ascent,
            descent,
            linespace: ascent + descent,
        }
    }

    fn measure(&self, font: &FontDescriptor, text: &str) -> f32 {
        let per_char = match font.weight {
            FontWeight::Normal => self.advance,
            FontWeight::Bold => self.advance * self.bold_factor,
        } * font.size_px;
        text.chars().count() as f32 * per_char
    }
}
