//! Styled text, and the attachments that substitution inserts into it.
//!
//! Every position and range here counts `char`s, not bytes.

mod attachment;
mod attributed;
mod offsets;
mod style;

use std::ops::Range;

pub use attachment::*;
pub use attributed::*;
pub use style::*;

pub(crate) use offsets::Offsets;

/// A mutable, range-addressable buffer of styled text.
///
/// Any rich text representation that can provide these operations can be substituted in place.
/// Ranges handed out before a call to [`StyledText::replace`] are not adjusted by it.
pub trait StyledText: Sized {
    /// The plain text of the buffer, with [`PLACEHOLDER`] standing in for attachments.
    fn as_str(&self) -> &str;

    /// Length of the buffer in chars.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies out `range`, styles included.
    fn substring(&self, range: Range<usize>) -> Self;

    /// The style of the char at `index`, if it has one.
    fn style_at(&self, index: usize) -> Option<&Style>;

    /// Replaces `range` with `content`.
    fn replace(&mut self, range: Range<usize>, content: Self);

    /// Creates a one-char buffer holding `attachment`.
    fn attachment(attachment: Attachment, style: Option<Style>) -> Self;
}
