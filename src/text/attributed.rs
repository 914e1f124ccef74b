use std::ops::Range;

use super::{Attachment, Style, StyledText, PLACEHOLDER};

/// Longest run [`AttributedString::push_str`] creates, in chars.
///
/// Locating a char inside a run walks the run, so this bounds the cost of every lookup.
const MAX_RUN: usize = 256;

/// A contiguous stretch of text sharing one style, or a single attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    // Char and byte offsets of the run in its string.
    start: usize,
    byte: usize,
    len: usize,
    bytes: usize,
    style: Option<Style>,
    attachment: Option<Attachment>,
}

impl Run {
    /// Length in chars.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    fn end(&self) -> usize {
        self.start + self.len
    }

    /// Byte offset in `text` of the char at `index`, which must lie within (or at the end of) this run.
    fn byte_of(&self, text: &str, index: usize) -> usize {
        let offset = index - self.start;

        if self.len == self.bytes {
            return self.byte + offset;
        }

        text[self.byte..self.byte + self.bytes]
            .char_indices()
            .nth(offset)
            .map_or(self.byte + self.bytes, |(i, _)| self.byte + i)
    }
}

/// The crate's own [`StyledText`]: a string plus the styled runs that tile it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributedString {
    text: String,
    runs: Vec<Run>,
}

impl AttributedString {
    pub fn new(text: &str, style: Option<Style>) -> Self {
        let mut string = Self::default();
        string.push_str(text, style);
        string
    }

    /// Unstyled text.
    pub fn plain(text: &str) -> Self {
        Self::new(text, None)
    }

    pub fn styled(text: &str, style: Style) -> Self {
        Self::new(text, Some(style))
    }

    /// Appends `text` with the given style. Long text is stored as several runs.
    pub fn push_str(&mut self, text: &str, style: Option<Style>) -> &mut Self {
        let mut rest = text;

        while !rest.is_empty() {
            let split = rest
                .char_indices()
                .nth(MAX_RUN)
                .map_or(rest.len(), |(i, _)| i);
            let (chunk, tail) = rest.split_at(split);

            self.runs.push(Run {
                start: StyledText::len(self),
                byte: self.text.len(),
                len: chunk.chars().count(),
                bytes: chunk.len(),
                style: style.clone(),
                attachment: None,
            });
            self.text.push_str(chunk);
            rest = tail;
        }

        self
    }

    /// Iterates over every run alongside the text it covers.
    pub fn runs(&self) -> impl Iterator<Item = (&str, &Run)> + '_ {
        self.runs
            .iter()
            .map(|run| (&self.text[run.byte..run.byte + run.bytes], run))
    }

    /// Iterates over every attachment and its position.
    pub fn attachments(&self) -> impl Iterator<Item = (usize, &Attachment)> + '_ {
        self.runs
            .iter()
            .filter_map(|run| run.attachment.as_ref().map(|a| (run.start, a)))
    }

    /// Index of the run holding the char at `index`, or the number of runs if it is past the end.
    fn run_at(&self, index: usize) -> usize {
        self.runs.partition_point(|run| run.end() <= index)
    }

    fn byte_at(&self, index: usize) -> usize {
        match self.runs.get(self.run_at(index)) {
            Some(run) => run.byte_of(&self.text, index),
            None => self.text.len(),
        }
    }

    fn byte_range(&self, range: Range<usize>) -> Range<usize> {
        self.byte_at(range.start)..self.byte_at(range.end)
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(StyledText::len(self));
        range.start.min(end)..end
    }

    /// Splits the run straddling `index` in two, returning the index of the run that starts there.
    fn split_at(&mut self, index: usize) -> usize {
        let i = self.run_at(index);
        let Some(run) = self.runs.get(i) else {
            return i;
        };

        if run.start == index {
            return i;
        }

        let byte = run.byte_of(&self.text, index);
        let tail = Run {
            start: index,
            byte,
            len: run.end() - index,
            bytes: run.byte + run.bytes - byte,
            ..run.clone()
        };

        let head = &mut self.runs[i];
        head.len = index - head.start;
        head.bytes = byte - head.byte;

        self.runs.insert(i + 1, tail);
        i + 1
    }
}

impl StyledText for AttributedString {
    fn as_str(&self) -> &str {
        &self.text
    }

    fn len(&self) -> usize {
        self.runs.last().map_or(0, Run::end)
    }

    fn substring(&self, range: Range<usize>) -> Self {
        let range = self.clamp(range);
        let bytes = self.byte_range(range.clone());

        let runs = self.runs[self.run_at(range.start)..]
            .iter()
            .take_while(|run| run.start < range.end)
            .map(|run| {
                let (lo, hi) = (run.start.max(range.start), run.end().min(range.end));
                let (from, to) = (run.byte_of(&self.text, lo), run.byte_of(&self.text, hi));

                Run {
                    start: lo - range.start,
                    byte: from - bytes.start,
                    len: hi - lo,
                    bytes: to - from,
                    ..run.clone()
                }
            })
            .filter(|run| !run.is_empty())
            .collect();

        AttributedString {
            text: self.text[bytes].to_owned(),
            runs,
        }
    }

    fn style_at(&self, index: usize) -> Option<&Style> {
        self.runs.get(self.run_at(index)).and_then(Run::style)
    }

    fn replace(&mut self, range: Range<usize>, content: Self) {
        let range = self.clamp(range);
        let bytes = self.byte_range(range.clone());

        let first = self.split_at(range.start);
        let last = self.split_at(range.end);

        let added = StyledText::len(&content);
        let added_bytes = content.text.len();
        let inserted = content.runs.len();

        let runs = content.runs.into_iter().map(|mut run| {
            run.start += range.start;
            run.byte += bytes.start;
            run
        });
        self.runs.splice(first..last, runs);

        for run in &mut self.runs[first + inserted..] {
            run.start = run.start - range.len() + added;
            run.byte = run.byte - bytes.len() + added_bytes;
        }

        self.text.replace_range(bytes, &content.text);
    }

    fn attachment(attachment: Attachment, style: Option<Style>) -> Self {
        AttributedString {
            text: PLACEHOLDER.to_string(),
            runs: vec![Run {
                start: 0,
                byte: 0,
                len: 1,
                bytes: PLACEHOLDER.len_utf8(),
                style,
                attachment: Some(attachment),
            }],
        }
    }
}

impl From<&str> for AttributedString {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}
