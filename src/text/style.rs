use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A font, reduced to the metrics attachment sizing depends on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    /// Point size.
    pub size: f64,
    /// Height of a flat capital letter above the baseline, in points.
    pub cap_height: f64,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64, cap_height: f64) -> Self {
        Font {
            family: family.into(),
            size,
            cap_height,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Natural,
    Left,
    Right,
    Center,
    Justified,
}

/// Paragraph-level attributes. These are carried through substitution untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ParagraphStyle {
    pub alignment: Alignment,
    pub line_spacing: f64,
    /// Host-specific attributes with no meaning to this crate.
    pub extra: BTreeMap<String, String>,
}

/// The style record of a run of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub font: Option<Font>,
    pub paragraph: Option<ParagraphStyle>,
}

impl Style {
    pub fn new(font: Font, paragraph: ParagraphStyle) -> Self {
        Style {
            font: Some(font),
            paragraph: Some(paragraph),
        }
    }

    /// The style an attachment replacing text of this style should carry.
    ///
    /// Font and paragraph style are only passed on together; if either is missing the
    /// attachment gets no style at all.
    pub fn inherited(&self) -> Option<Style> {
        match (&self.font, &self.paragraph) {
            (Some(font), Some(paragraph)) => Some(Style::new(font.clone(), paragraph.clone())),
            _ => None,
        }
    }
}
