use std::ops::Range;

use nom::bytes::complete::{take_till, take_while1};
use nom::sequence::pair;
use pulldown_cmark::{Event, Options, Parser, Tag};

use crate::prelude::*;
use crate::text::Offsets;

use super::{Input, Result};

/// Runs of this many backticks or more open a fenced block rather than an inline span.
const FENCE_WIDTH: usize = 3;

/// Something that knows which parts of a text are code.
pub trait CodeSpans {
    /// Returns the char ranges of `text` that are code, delimiters included. Order is not significant.
    fn code_spans(&self, text: &str) -> Vec<Range<usize>>;
}

/// Fixed spans supplied by a host that tracks code itself.
impl CodeSpans for Vec<Range<usize>> {
    fn code_spans(&self, _text: &str) -> Vec<Range<usize>> {
        self.clone()
    }
}

/// Backtick-delimited code, recognized anywhere in the text.
///
/// - One or two backticks open an inline span, closed by the next run of exactly as many backticks.
///   An opener that is never closed is literal text.
/// - Three or more open a fenced block, closed by the next run at least as long. An unclosed
///   fence runs to the end of the text.
#[derive(Debug, Default, Clone, Copy)]
pub struct Backticks;

impl CodeSpans for Backticks {
    fn code_spans(&self, text: &str) -> Vec<Range<usize>> {
        let offsets = Offsets::new(text);
        backtick_spans(text)
            .into_iter()
            .map(|bytes| offsets.chars(bytes))
            .collect()
    }
}

/// Inline code and code blocks, as a CommonMark parser sees them.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonMark;

impl CodeSpans for CommonMark {
    fn code_spans(&self, text: &str) -> Vec<Range<usize>> {
        let offsets = Offsets::new(text);
        Parser::new_ext(text, Options::all())
            .into_offset_iter()
            .filter_map(|(event, bytes)| match event {
                Event::Code(_) | Event::Start(Tag::CodeBlock(_)) => Some(offsets.chars(bytes)),
                _ => None,
            })
            .collect()
    }
}

/// Removes every code span from `ranges`.
///
/// Ranges that partially overlap code are cut down (or split) to the parts outside of it; ranges
/// left empty are dropped.
pub fn exclude_code_spans<D>(text: &str, ranges: &[Range<usize>], detector: &D) -> Vec<Range<usize>>
where
    D: CodeSpans + ?Sized,
{
    let mut spans = detector.code_spans(text);
    spans.sort_by_key(|span| span.start);

    let kept: Vec<_> = ranges
        .iter()
        .flat_map(|range| subtract(range.clone(), &spans))
        .collect();

    trace!("Excluded {} code span(s); {} range(s) remain.", spans.len(), kept.len());
    kept
}

fn subtract(range: Range<usize>, spans: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut pieces = Vec::new();
    let mut start = range.start;

    for span in spans.iter().filter(|span| span.start < range.end && span.end > range.start) {
        if span.start > start {
            pieces.push(start..span.start);
        }
        start = start.max(span.end);
    }

    if start < range.end {
        pieces.push(start..range.end);
    }

    pieces
}

/// Byte ranges of backtick code in `source`.
fn backtick_spans(source: &str) -> Vec<Range<usize>> {
    let offset_of = |rest: &str| source.len() - rest.len();

    let mut spans = Vec::new();
    let mut rest = source;

    while let Ok((after, (skipped, opener))) = backtick_run(rest) {
        let start = offset_of(rest) + skipped.len();
        let width = opener.len();

        match closing_run(after, width) {
            Some(close) => {
                let end = offset_of(after) + close;
                spans.push(start..end);
                rest = &source[end..];
            }
            None if width >= FENCE_WIDTH => {
                spans.push(start..source.len());
                break;
            }
            None => rest = after,
        }
    }

    spans
}

/// Consumes everything up to and including the next run of backticks,
/// yielding the skipped text and the run.
fn backtick_run(input: Input<'_>) -> Result<'_, (Input<'_>, Input<'_>)> {
    pair(
        take_till(|c: char| c == '`'),
        take_while1(|c: char| c == '`')
    )(input)
}

/// Finds the run of backticks closing an opener of `width`, returning the byte offset just past it.
fn closing_run(input: Input<'_>, width: usize) -> Option<usize> {
    let mut rest = input;

    while let Ok((after, (_, run))) = backtick_run(rest) {
        let closes = match width >= FENCE_WIDTH {
            true => run.len() >= width,
            false => run.len() == width
        };

        if closes {
            return Some(input.len() - after.len());
        }
        rest = after;
    }

    None
}


#[cfg(test)]
mod test_commonmark {
    use super::*;

    #[test]
    fn inline() {
        assert_eq!(CommonMark.code_spans("a `b :x:` c"), vec![2..9]);
        assert!(CommonMark.code_spans("no code :x: here").is_empty());
    }

    #[test]
    fn block() {
        let text = indoc::indoc! {"
            Some text.

            ```rs
            :x:
            ```
        "};
        let token = text.find(":x:").unwrap();

        let spans = CommonMark.code_spans(text);

        assert_eq!(spans.len(), 1);
        assert!(spans[0].contains(&token));
        assert!(!spans[0].contains(&0));
    }
}
