use crate::catalog::EmojiSource;
use crate::encode::Encoder;
use crate::prelude::*;

use super::Font;

/// The character that stands in for an attachment in the plain text of a [`StyledText`](super::StyledText).
pub const PLACEHOLDER: char = '\u{FFFC}';

/// Layout box of an attachment, relative to the baseline of its line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Computes a square box as tall as `font`'s point size, centered on its cap height.
    ///
    /// A missing font counts as 22pt with a 22pt cap height, which places the box on the baseline.
    pub fn for_font(font: Option<&Font>, scale: f64) -> Self {
        let size = font.map_or(DEFAULT_POINT_SIZE, |font| font.size) * scale;
        let cap_height = font.map_or(DEFAULT_CAP_HEIGHT, |font| font.cap_height) * scale;

        Bounds {
            x: 0.0,
            y: (cap_height - size) / 2.0,
            width: size,
            height: size,
        }
    }
}

/// An inline object occupying exactly one unit of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    payload: Vec<u8>,
    bounds: Bounds,
}

impl Attachment {
    pub fn new(payload: Vec<u8>, bounds: Bounds) -> Self {
        Attachment { payload, bounds }
    }

    /// The encoded [`EmojiSource`] this attachment displays.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn decode(&self, encoder: &dyn Encoder) -> Result<EmojiSource> {
        encoder.decode(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics() {
        let bounds = Bounds::for_font(None, 1.0);
        assert_eq!(bounds, Bounds { x: 0.0, y: 0.0, width: 22.0, height: 22.0 });

        let bounds = Bounds::for_font(None, 2.0);
        assert_eq!(bounds, Bounds { x: 0.0, y: 0.0, width: 44.0, height: 44.0 });
    }

    #[test]
    fn font_metrics() {
        let font = Font::new("Helvetica", 17.0, 12.0);

        let bounds = Bounds::for_font(Some(&font), 1.0);
        assert_eq!(bounds, Bounds { x: 0.0, y: -2.5, width: 17.0, height: 17.0 });

        let bounds = Bounds::for_font(Some(&font), 2.0);
        assert_eq!(bounds, Bounds { x: 0.0, y: -5.0, width: 34.0, height: 34.0 });
    }
}
