use std::collections::HashMap;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};

/// Average glyph advance as a fraction of the font size, used when no shaping is done.
pub const AVERAGE_CHAR_WIDTH: f32 = 0.6;

pub trait TextMeasure {
    /// Rendered width of a single line of `text` at `font_size`.
    fn text_width(&mut self, text: &str, font_size: f32) -> f32;
}

/// Width estimate from the character count alone. Deterministic and font independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharWidthEstimate;

impl TextMeasure for CharWidthEstimate {
    fn text_width(&mut self, text: &str, font_size: f32) -> f32 {
        AVERAGE_CHAR_WIDTH * font_size * text.chars().count() as f32
    }
}

#[derive(Hash, PartialEq, Eq, Clone)]
struct MeasureKey {
    text: String,
    font_size_bits: u32,
}

/// Measures labels by shaping them with the system sans-serif font.
pub struct CosmicTextMeasure {
    font_system: FontSystem,
    cache: HashMap<MeasureKey, f32>,
}

impl CosmicTextMeasure {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            cache: HashMap::new(),
        }
    }
}

impl Default for CosmicTextMeasure {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for CosmicTextMeasure {
    fn text_width(&mut self, text: &str, font_size: f32) -> f32 {
        if text.is_empty() || font_size <= 0.0 {
            return 0.0;
        }

        let key = MeasureKey {
            text: text.to_string(),
            font_size_bits: font_size.to_bits(),
        };
        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }

        let mut buffer = Buffer::new(
            &mut self.font_system,
            Metrics {
                font_size,
                line_height: font_size * 1.2,
            },
        );
        buffer.set_size(&mut self.font_system, None, None);

        let attrs = Attrs::new().family(Family::SansSerif);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);

        let width = buffer
            .layout_runs()
            .fold(0.0_f32, |width, run| width.max(run.line_w));

        self.cache.insert(key, width);
        width
    }
}

#[cfg(test)]
mod tests {
    use super::{CharWidthEstimate, TextMeasure};

    #[test]
    fn estimate_counts_chars_not_bytes() {
        let mut measure = CharWidthEstimate;
        assert!((measure.text_width("lacZ", 10.0) - 24.0).abs() < 1e-5);
        assert!((measure.text_width("λ-cI", 10.0) - 24.0).abs() < 1e-5);
        assert_eq!(measure.text_width("", 10.0), 0.0);
    }
}
