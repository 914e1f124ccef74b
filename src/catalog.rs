//! The read-only mapping from shortcode names to emoji.

use std::borrow::Cow;

use ahash::AHashMap;
use gh_emoji as emoji;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// The data embedded into an attachment for a resolved emoji.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// A Unicode emoji, such as `🦀`.
    Character(String),
    /// An image fetched from a remote location.
    ImageUrl(String),
    /// An image bundled with the host, referenced by name.
    ImageAsset(String),
}

/// A catalog entry: either an emoji definition, or another name to look up instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmojiSource {
    Direct(Payload),
    Alias(String),
}

impl EmojiSource {
    /// The name this entry points at, if it is an alias.
    pub fn alias(&self) -> Option<&str> {
        match self {
            EmojiSource::Alias(target) => Some(target),
            EmojiSource::Direct(_) => None,
        }
    }
}

/// Shortcode names (without colons) mapped to [`EmojiSource`]s.
///
/// A catalog may additionally be backed by GitHub's shortcode set, which is consulted
/// for any name that has no local entry.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: AHashMap<String, EmojiSource>,
    github: bool,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog that falls back on GitHub's shortcode set.
    pub fn github() -> Self {
        Catalog {
            entries: AHashMap::new(),
            github: true,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, source: EmojiSource) -> Option<EmojiSource> {
        self.entries.insert(name.into(), source)
    }

    /// The number of local entries (the GitHub fallback is not counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the literal entry for `name`, without following aliases.
    pub fn get(&self, name: &str) -> Option<Cow<'_, EmojiSource>> {
        if let Some(entry) = self.entries.get(name) {
            return Some(Cow::Borrowed(entry));
        }

        if !self.github {
            return None;
        }

        emoji::get(name)
            .map(|c| EmojiSource::Direct(Payload::Character(c.to_owned())))
            .map(Cow::Owned)
    }

    /// Looks up `name`, following at most one alias.
    ///
    /// An alias whose target is another alias resolves to that second alias as-is; an alias
    /// whose target does not exist resolves to itself.
    pub fn resolve(&self, name: &str) -> Option<Cow<'_, EmojiSource>> {
        let entry = self.get(name)?;

        let target = entry.alias().map(str::to_owned);
        let Some(target) = target else {
            return Some(entry);
        };

        match self.get(&target) {
            Some(resolved) => {
                if let Some(next) = resolved.alias() {
                    debug!("Alias :{name}: points at alias :{target}: (-> :{next}:), which is not followed.");
                }
                Some(resolved)
            }
            None => {
                debug!("Alias :{name}: points at missing entry :{target}:.");
                Some(entry)
            }
        }
    }
}

impl Extend<(String, EmojiSource)> for Catalog {
    fn extend<I: IntoIterator<Item = (String, EmojiSource)>>(&mut self, iter: I) {
        self.entries.extend(iter)
    }
}

impl FromIterator<(String, EmojiSource)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, EmojiSource)>>(iter: I) -> Self {
        Catalog {
            entries: iter.into_iter().collect(),
            github: false,
        }
    }
}
