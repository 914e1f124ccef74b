use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, EmojiSource, Payload};
use crate::parse::{Backticks, CodeSpans, CommonMark};
use crate::prelude::*;
use crate::text::{Font, ParagraphStyle, Style};

/// Represents the contents of a `moji.toml` file.
#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    /// Whether to fall back on GitHub's shortcode set for names not in `emoji`.
    pub github: bool,
    pub code: CodeSyntax,
    pub rendering: Rendering,
    /// Style applied to plain input files.
    pub font: Option<Font>,
    pub emoji: AHashMap<String, Entry>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            github: true,
            code: CodeSyntax::default(),
            rendering: Rendering::default(),
            font: None,
            emoji: AHashMap::new(),
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self> {
        let toml_raw = match path.exists() {
            true => {
                std::fs::read_to_string(path)
                    .wrap_err("Could not read in configuration file.")
                    .suggestion("The configuration file was found, but couldn't be read - try checking your file permissions.")?
            },
            false => bail!("Configuration file not found at {}.", path.display())
        };

        Self::parse(&toml_raw)
    }

    pub fn parse(toml_raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_raw)
            .wrap_err("A TOML parsing error occurred while reading the configuration file.")?;

        config.rendering.validate()?;
        Ok(config)
    }

    /// Builds the emoji catalog described by this configuration.
    pub fn catalog(&self) -> Catalog {
        let mut catalog = match self.github {
            true => Catalog::github(),
            false => Catalog::new()
        };

        catalog.extend(
            self.emoji
                .iter()
                .map(|(name, entry)| (name.clone(), EmojiSource::from(entry.clone())))
        );

        catalog
    }

    /// The style given to plain input text, if a font is configured.
    pub fn style(&self) -> Option<Style> {
        self.font
            .clone()
            .map(|font| Style::new(font, ParagraphStyle::default()))
    }
}

/// Settings that shape the attachments produced during substitution.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Rendering {
    /// Uniform scale applied to every attachment box. Must be positive.
    pub scale: f64,
    /// Treat an emoji whose payload cannot be encoded as a miss instead of failing the pass.
    pub skip_unencodable: bool,
}

impl Default for Rendering {
    fn default() -> Self {
        Rendering {
            scale: 1.0,
            skip_unencodable: false,
        }
    }
}

impl Rendering {
    pub fn with_scale(scale: f64) -> Result<Self> {
        let rendering = Rendering {
            scale,
            ..Default::default()
        };

        rendering.validate()?;
        Ok(rendering)
    }

    pub fn validate(&self) -> Result<()> {
        match self.scale.is_finite() && self.scale > 0.0 {
            true => Ok(()),
            false => Err(
                eyre!("Invalid rendering scale ({}).", self.scale)
                    .suggestion("The scale must be a positive, finite number such as 1.0 or 2.0.")
            )
        }
    }
}

/// Which convention marks code in the input text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CodeSyntax {
    /// Backtick spans and fences, recognized anywhere.
    #[default]
    Backticks,
    /// Code as understood by a CommonMark parser.
    CommonMark,
}

impl CodeSyntax {
    pub fn detector(self) -> Box<dyn CodeSpans + Send + Sync> {
        match self {
            CodeSyntax::Backticks => Box::new(Backticks),
            CodeSyntax::CommonMark => Box::new(CommonMark),
        }
    }
}

/// A catalog entry as written in the configuration file.
///
/// Example: `crab = { character = "🦀" }` or `ship = { alias = "shipit" }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    Character(String),
    ImageUrl(String),
    ImageAsset(String),
    Alias(String),
}

impl From<Entry> for EmojiSource {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Character(c) => EmojiSource::Direct(Payload::Character(c)),
            Entry::ImageUrl(url) => EmojiSource::Direct(Payload::ImageUrl(url)),
            Entry::ImageAsset(name) => EmojiSource::Direct(Payload::ImageAsset(name)),
            Entry::Alias(target) => EmojiSource::Alias(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::parse("").unwrap();

        assert!(config.github);
        assert_eq!(config.code, CodeSyntax::Backticks);
        assert_eq!(config.rendering, Rendering::default());
        assert!(config.font.is_none());
        assert!(config.emoji.is_empty());
        assert!(config.style().is_none());
    }

    #[test]
    fn full() {
        let raw = indoc::indoc! {r#"
            github = false
            code = "commonmark"

            [rendering]
            scale = 2.0
            skip_unencodable = true

            [font]
            family = "Helvetica"
            size = 17.0
            cap_height = 12.0

            [emoji]
            crab = { character = "🦀" }
            parrot = { image_url = "https://example.com/parrot.gif" }
            ferris = { alias = "crab" }
        "#};

        let config = Config::parse(raw).unwrap();

        assert!(!config.github);
        assert_eq!(config.code, CodeSyntax::CommonMark);
        assert_eq!(config.rendering.scale, 2.0);
        assert!(config.rendering.skip_unencodable);
        assert_eq!(config.font.as_ref().unwrap().cap_height, 12.0);
        assert_eq!(config.emoji["ferris"], Entry::Alias("crab".into()));

        let catalog = config.catalog();
        let ferris = catalog.resolve("ferris").unwrap();

        assert_eq!(
            ferris.as_ref(),
            &EmojiSource::Direct(Payload::Character("🦀".into()))
        );
        assert_eq!(
            catalog.resolve("parrot").unwrap().as_ref(),
            &EmojiSource::Direct(Payload::ImageUrl("https://example.com/parrot.gif".into()))
        );
        assert!(catalog.resolve("smile").is_none());
    }

    #[test]
    fn bad_scale() {
        assert!(Config::parse("[rendering]\nscale = 0.0").is_err());
        assert!(Config::parse("[rendering]\nscale = -1.5").is_err());
        assert!(Rendering::with_scale(f64::NAN).is_err());
        assert!(Rendering::with_scale(1.5).is_ok());
    }

    #[test]
    fn unknown_entry_kind() {
        let raw = "[emoji]\ncrab = { sticker = \"crab.png\" }";
        assert!(Config::parse(raw).is_err());
    }
}
