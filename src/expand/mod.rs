//! Two-pass shortcode expansion.

mod regions;
mod substitute;

use std::ops::Range;

use itertools::Itertools;

pub use regions::gaps;
pub use substitute::{substitute, Pass};

use crate::catalog::Catalog;
use crate::encode::{Cbor, Encoder};
use crate::parse::{exclude_code_spans, scan, Backticks, CodeSpans};
use crate::prelude::*;
use crate::text::StyledText;

/// The result of a full expansion run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// How many shortcodes were replaced, over both passes.
    pub substituted: usize,
    /// Every shortcode left as text, as ranges into the expanded text, in order.
    ///
    /// Tokens sharing a colon (`:a:b:`) are each reported, so neighbouring ranges may overlap by one.
    pub unresolved: Vec<Range<usize>>,
}

/// Expands shortcodes in [`StyledText`] against a [`Catalog`].
///
/// An engine holds no state between runs and can be shared between threads, each expanding a
/// different text.
pub struct Engine<'c> {
    catalog: &'c Catalog,
    rendering: Rendering,
    code_spans: Box<dyn CodeSpans + Send + Sync>,
    encoder: Box<dyn Encoder>,
}

impl<'c> Engine<'c> {
    /// Creates an engine that recognizes [`Backticks`] code and encodes payloads as [`Cbor`].
    pub fn new(catalog: &'c Catalog, rendering: Rendering) -> Self {
        Engine {
            catalog,
            rendering,
            code_spans: Box::new(Backticks),
            encoder: Box::new(Cbor),
        }
    }

    pub fn with_code_spans(mut self, code_spans: Box<dyn CodeSpans + Send + Sync>) -> Self {
        self.code_spans = code_spans;
        self
    }

    pub fn with_encoder(mut self, encoder: Box<dyn Encoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn rendering(&self) -> &Rendering {
        &self.rendering
    }

    /// The encoder attachment payloads are written with; use it to decode them.
    pub fn encoder(&self) -> &dyn Encoder {
        self.encoder.as_ref()
    }

    /// Expands `text`, returning it once done.
    pub fn expand<T: StyledText>(&self, mut text: T) -> Result<T> {
        self.run(&mut text)?;
        Ok(text)
    }

    /// Expands `text` in place.
    ///
    /// The first pass scans everything outside of code. The second pass scans only the gaps
    /// between the first pass's misses (see [`gaps`]), which picks up tokens that share a colon
    /// with an unknown neighbour, as in `:unknown:smile:`. Whatever is still unmatched after that
    /// stays as text.
    pub fn run<T: StyledText>(&self, text: &mut T) -> Result<Outcome> {
        let regions = self.outside_code(text, &[0..text.len()]);
        let first = self.pass(text, &regions)?;
        debug!("First pass: {} hit(s), {} miss(es).", first.hits.len(), first.misses.len());

        let regions = self.outside_code(text, &gaps(text.len(), &first.misses));
        let second = self.pass(text, &regions)?;
        debug!("Second pass: {} hit(s), {} miss(es).", second.hits.len(), second.misses.len());

        let unresolved = settle(&first.misses, &second.hits)
            .into_iter()
            .merge_by(second.misses, |a, b| a.start <= b.start)
            .collect();

        Ok(Outcome {
            substituted: first.hits.len() + second.hits.len(),
            unresolved,
        })
    }

    fn outside_code<T: StyledText>(&self, text: &T, ranges: &[Range<usize>]) -> Vec<Range<usize>> {
        exclude_code_spans(text.as_str(), ranges, self.code_spans.as_ref())
    }

    fn pass<T: StyledText>(&self, text: &mut T, regions: &[Range<usize>]) -> Result<Pass> {
        let matches = scan(text.as_str(), regions);
        substitute(text, &matches, self.catalog, &self.rendering, self.encoder.as_ref())
    }
}

/// Maps the first pass's misses past the second pass's hits.
///
/// Misses that a hit consumed part of (by sharing a colon) are dropped. Both lists are ordered and
/// in the coordinates of the text between the passes.
fn settle(misses: &[Range<usize>], hits: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut settled = Vec::with_capacity(misses.len());
    let mut hits = hits.iter().peekable();
    let mut shift = 0;

    for miss in misses {
        while let Some(hit) = hits.next_if(|hit| hit.end <= miss.start) {
            shift += hit.len() - 1;
        }

        if hits.peek().is_some_and(|hit| hit.start < miss.end) {
            continue;
        }

        settled.push((miss.start - shift)..(miss.end - shift));
    }

    settled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EmojiSource, Payload};
    use crate::parse::CommonMark;
    use crate::text::{AttributedString, Bounds, PLACEHOLDER};

    fn character(c: &str) -> EmojiSource {
        EmojiSource::Direct(Payload::Character(c.to_owned()))
    }

    fn catalog() -> Catalog {
        Catalog::from_iter([
            ("crab".to_owned(), character("🦀")),
            ("frown".to_owned(), character("🙁")),
            ("smile".to_owned(), character("😄")),
        ])
    }

    fn decoded(engine: &Engine<'_>, text: &AttributedString) -> Vec<EmojiSource> {
        text.attachments()
            .map(|(_, attachment)| attachment.decode(engine.encoder()).unwrap())
            .collect()
    }

    #[test]
    fn substitutes() {
        let catalog = catalog();
        let engine = Engine::new(&catalog, Rendering::default());

        let mut text = AttributedString::plain("Hi :smile:, I'm a :crab:!");
        let outcome = engine.run(&mut text).unwrap();

        assert_eq!(text.as_str(), "Hi \u{FFFC}, I'm a \u{FFFC}!");
        assert_eq!(outcome, Outcome { substituted: 2, unresolved: vec![] });
        assert_eq!(decoded(&engine, &text), vec![character("😄"), character("🦀")]);
    }

    #[test]
    fn code_is_untouched() {
        let catalog = catalog();
        let engine = Engine::new(&catalog, Rendering::default());

        let text = engine
            .expand(AttributedString::plain("`:crab:` :crab: ```\n:crab:\n``` ``:crab:``"))
            .unwrap();

        assert_eq!(text.as_str(), "`:crab:` \u{FFFC} ```\n:crab:\n``` ``:crab:``");
    }

    #[test]
    fn commonmark_code() {
        let catalog = catalog();
        let engine = Engine::new(&catalog, Rendering::default())
            .with_code_spans(Box::new(CommonMark));

        let source = indoc::indoc! {"
            # Title :crab:

                :crab: (indented code)

            Inline `:crab:` code.
        "};
        let text = engine.expand(AttributedString::plain(source)).unwrap();

        assert_eq!(text.attachments().count(), 1);
        assert!(text.as_str().starts_with("# Title \u{FFFC}\n"));
    }

    #[test]
    fn fixed_code_spans() {
        // The span covers " :smile: " exactly.
        let catalog = Catalog::from_iter([("frown".to_owned(), character("🙁"))]);
        let engine = Engine::new(&catalog, Rendering::default())
            .with_code_spans(Box::new(vec![1..10]));

        let mut text = AttributedString::plain("x :smile: :frown:");
        let outcome = engine.run(&mut text).unwrap();

        assert_eq!(text.as_str(), "x :smile: \u{FFFC}");
        assert_eq!(outcome.substituted, 1);
        assert!(outcome.unresolved.is_empty());
    }

    #[test]
    fn shared_colon() {
        let catalog = catalog();
        let engine = Engine::new(&catalog, Rendering::default());

        let mut text = AttributedString::plain(":nope:crab: and :crab:nope:");
        let outcome = engine.run(&mut text).unwrap();

        // Both :crab: tokens share a colon with a :nope: that the first pass claimed.
        assert_eq!(text.as_str(), ":nope\u{FFFC} and \u{FFFC}nope:");
        assert_eq!(outcome.substituted, 2);
        assert!(outcome.unresolved.is_empty());
    }

    #[test]
    fn unresolved() {
        let catalog = catalog();
        let engine = Engine::new(&catalog, Rendering::default());

        let mut text = AttributedString::plain(":crab: :nope: :crab: :what:");
        let outcome = engine.run(&mut text).unwrap();

        assert_eq!(text.as_str(), "\u{FFFC} :nope: \u{FFFC} :what:");
        assert_eq!(outcome.unresolved, vec![2..8, 11..17]);

        let names: Vec<_> = outcome
            .unresolved
            .iter()
            .map(|range| text.substring(range.clone()).as_str().to_owned())
            .collect();
        assert_eq!(names, vec![":nope:", ":what:"]);
    }

    #[test]
    fn unresolved_shared_colons() {
        let catalog = catalog();
        let engine = Engine::new(&catalog, Rendering::default());

        let mut text = AttributedString::plain(":a:b:c:");
        let outcome = engine.run(&mut text).unwrap();

        assert_eq!(text.as_str(), ":a:b:c:");
        assert_eq!(outcome.unresolved, vec![0..3, 2..5, 4..7]);

        // Misses whose colons a later hit took are no longer tokens, so they are not reported.
        let mut text = AttributedString::plain(":x:crab:y:");
        let outcome = engine.run(&mut text).unwrap();

        assert_eq!(text.as_str(), ":x\u{FFFC}y:");
        assert!(outcome.unresolved.is_empty());
    }

    #[test]
    fn large_input() {
        let catalog = catalog();
        let engine = Engine::new(&catalog, Rendering::default());

        let started = std::time::Instant::now();

        let mut ascii = AttributedString::plain(&":crab: ".repeat(20_000));
        let outcome = engine.run(&mut ascii).unwrap();
        assert_eq!(outcome.substituted, 20_000);
        assert_eq!(ascii.len(), 40_000);

        let mut mixed = AttributedString::plain(&"é :nope: :crab: ".repeat(5_000));
        let outcome = engine.run(&mut mixed).unwrap();
        assert_eq!(outcome.substituted, 5_000);
        assert_eq!(outcome.unresolved.len(), 5_000);
        assert_eq!(outcome.unresolved[1], 13..19);

        let elapsed = started.elapsed();
        assert!(elapsed.as_secs() < 5, "expansion took {elapsed:?}");
    }

    #[test]
    fn idempotent() {
        let catalog = catalog();
        let engine = Engine::new(&catalog, Rendering::default());

        let once = engine
            .expand(AttributedString::plain(":crab::crab: `:smile:` :nope:smile: :x:"))
            .unwrap();

        let mut twice = once.clone();
        let outcome = engine.run(&mut twice).unwrap();

        assert_eq!(outcome.substituted, 0);
        assert_eq!(twice, once);
        assert!(!twice.as_str().contains(":crab:"));
    }

    #[test]
    fn aliases() {
        let catalog = Catalog::from_iter([
            ("a".to_owned(), EmojiSource::Alias("b".into())),
            ("b".to_owned(), character("🅱️")),
            ("c".to_owned(), EmojiSource::Alias("a".into())),
        ]);
        let engine = Engine::new(&catalog, Rendering::default());

        let text = engine.expand(AttributedString::plain(":a: :c:")).unwrap();

        // :c: stops after one hop, at the alias stored under "a".
        assert_eq!(
            decoded(&engine, &text),
            vec![character("🅱️"), EmojiSource::Alias("b".into())]
        );
    }

    #[test]
    fn boundaries() {
        let catalog = catalog();
        let engine = Engine::new(&catalog, Rendering::default());

        let text = engine.expand(AttributedString::plain(":crab:")).unwrap();
        assert_eq!(text.as_str(), PLACEHOLDER.to_string());

        let text = engine.expand(AttributedString::plain(":crab: x :crab:")).unwrap();
        assert_eq!(text.as_str(), "\u{FFFC} x \u{FFFC}");

        let text = engine.expand(AttributedString::plain("`a`:crab:`b`")).unwrap();
        assert_eq!(text.as_str(), "`a`\u{FFFC}`b`");

        let text = engine.expand(AttributedString::plain("")).unwrap();
        assert!(text.is_empty());

        let text = engine.expand(AttributedString::plain(":nope:")).unwrap();
        assert_eq!(text.as_str(), ":nope:");
    }

    #[test]
    fn default_bounds() {
        let catalog = catalog();
        let engine = Engine::new(&catalog, Rendering::with_scale(1.5).unwrap());

        let text = engine.expand(AttributedString::plain("a :crab: b")).unwrap();
        let (at, attachment) = text.attachments().next().unwrap();

        assert_eq!(at, 2);
        assert_eq!(attachment.bounds(), Bounds { x: 0.0, y: 0.0, width: 33.0, height: 33.0 });
        assert_eq!(text.style_at(at), None);
    }

    #[test]
    fn settles_misses() {
        assert_eq!(settle(&[0..6, 10..16], &[]), vec![0..6, 10..16]);
        // A hit before a miss shifts it; a hit overlapping a miss consumes it.
        assert!(settle(&[0..6, 10..16], &[5..11]).is_empty());
        assert_eq!(settle(&[10..16], &[2..8]), vec![5..11]);
        assert_eq!(settle(&[20..26], &[2..8, 10..16]), vec![10..16]);
        // One hit can take colons from the misses on both sides of it.
        assert!(settle(&[0..3, 4..7], &[2..5]).is_empty());
    }
}
