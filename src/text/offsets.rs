use std::ops::Range;

/// Translates between char offsets and byte offsets into a `str`.
#[derive(Debug)]
pub(crate) struct Offsets {
    // Byte offset of every char, plus the length of the string.
    bytes: Vec<usize>,
}

impl Offsets {
    pub fn new(text: &str) -> Self {
        let mut bytes: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bytes.push(text.len());
        Offsets { bytes }
    }

    /// Number of chars in the text.
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    /// Byte offset of the char at `index`. Indexes past the end clamp to the end.
    pub fn byte(&self, index: usize) -> usize {
        self.bytes[index.min(self.len())]
    }

    pub fn bytes(&self, range: Range<usize>) -> Range<usize> {
        self.byte(range.start)..self.byte(range.end)
    }

    /// Char index of the char starting at (or, mid-char, following) byte offset `byte`.
    pub fn char(&self, byte: usize) -> usize {
        match self.bytes.binary_search(&byte) {
            Ok(index) | Err(index) => index.min(self.len()),
        }
    }

    pub fn chars(&self, range: Range<usize>) -> Range<usize> {
        self.char(range.start)..self.char(range.end)
    }
}
