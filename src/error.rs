use std::fmt::Display;
use std::ops::Range;

/// Attached to the error returned when a resolved emoji's payload could not be encoded.
///
/// The failing pass is abandoned; retrieve this with [`Report::downcast_ref`](color_eyre::Report::downcast_ref).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingFailure {
    /// The shortcode name, without colons.
    pub name: String,
    /// Where the shortcode sat in the buffer when encoding failed.
    pub range: Range<usize>,
}

impl Display for EncodingFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not encode the payload for :{}: at {}..{}.",
            self.name,
            self.range.start,
            self.range.end
        )
    }
}

impl std::error::Error for EncodingFailure {}
