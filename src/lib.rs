//! Shortcode emoji substitution for styled text.
//!
//! Tokens of the form `:name:` are located in a [`StyledText`](text::StyledText) buffer, filtered
//! against code spans, looked up in a [`Catalog`](catalog::Catalog) and replaced in place with
//! a single inline [`Attachment`](text::Attachment) sized to the surrounding font.
//!
//! The entry point is [`Engine`](expand::Engine):
//!
//! ```
//! use moji::prelude::*;
//! use moji::catalog::{Catalog, EmojiSource, Payload};
//! use moji::expand::Engine;
//! use moji::text::{AttributedString, StyledText};
//!
//! let mut catalog = Catalog::new();
//! catalog.insert("crab", EmojiSource::Direct(Payload::Character("🦀".into())));
//!
//! let engine = Engine::new(&catalog, Rendering::default());
//! let text = engine.expand(AttributedString::plain("Hello :crab:!")).unwrap();
//!
//! assert_eq!(text.len(), "Hello ?!".chars().count());
//! ```

pub mod catalog;
pub mod common;
pub mod encode;
pub mod error;
pub mod expand;
pub mod parse;
pub mod text;

pub mod prelude {
    pub use color_eyre::eyre::{bail, ensure, eyre, ContextCompat, Report, Result, WrapErr};
    pub use color_eyre::Section;
    pub use tracing::{debug, error, info, trace, warn};

    pub use crate::common::*;
}
