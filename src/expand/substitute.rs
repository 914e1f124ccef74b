use std::ops::Range;

use crate::catalog::Catalog;
use crate::encode::Encoder;
use crate::error::EncodingFailure;
use crate::parse::name_of;
use crate::prelude::*;
use crate::text::{Attachment, Bounds, Style, StyledText};

/// What happened to each match during a call to [`substitute`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pass {
    /// Replaced matches, as they were given (in the coordinates of the text before the pass).
    pub hits: Vec<Range<usize>>,
    /// Matches with no catalog entry, in the coordinates of the text after the pass.
    pub misses: Vec<Range<usize>>,
}

/// Replaces every match that names a catalog entry with an attachment carrying the entry's payload.
///
/// `matches` must be ordered and disjoint, in the coordinates of `text` as it is on entry. Each
/// replacement shortens the text by the length of the token minus one, and later matches are
/// shifted back by the total of those differences before they are used.
///
/// Fails if a payload cannot be encoded (unless [`Rendering::skip_unencodable`] is set), or if
/// `matches` does not fit `text`.
pub fn substitute<T: StyledText>(
    text: &mut T,
    matches: &[Range<usize>],
    catalog: &Catalog,
    rendering: &Rendering,
    encoder: &dyn Encoder,
) -> Result<Pass> {
    let mut offset = 0;
    let mut pass = Pass::default();

    for original in matches {
        let range = original
            .start
            .checked_sub(offset)
            .map(|start| start..original.end.saturating_sub(offset))
            .context("Shortcode matches must be ordered and must not overlap.")?;

        let len = text.len();
        ensure!(
            range.start < range.end && range.end <= len,
            "Shortcode match {range:?} does not fit in a text of length {len}."
        );

        let token = text.substring(range.clone());
        let name = name_of(token.as_str());

        let Some(source) = catalog.resolve(name) else {
            trace!("No emoji named :{name}:, leaving {range:?} as text.");
            pass.misses.push(range);
            continue;
        };

        let payload = match encoder.encode(&source) {
            Ok(payload) => payload,
            Err(err) if rendering.skip_unencodable => {
                warn!("Skipping :{name}: at {range:?}; its payload could not be encoded: {err}");
                pass.misses.push(range);
                continue;
            }
            Err(err) => {
                let failure = EncodingFailure {
                    name: name.to_owned(),
                    range,
                };
                let err = err
                    .wrap_err(failure)
                    .note("This error occurred because an emoji's payload could not be serialized into its attachment.")
                    .suggestion("Set `skip_unencodable = true` under [rendering] to leave such shortcodes as text instead.");
                return Err(err);
            }
        };

        let style = token.style_at(0);
        let font = style.and_then(|style| style.font.as_ref());
        let attachment = Attachment::new(payload, Bounds::for_font(font, rendering.scale));
        let inherited = style.and_then(Style::inherited);

        trace!("Replacing :{name}: at {range:?}.");
        text.replace(range.clone(), T::attachment(attachment, inherited));

        offset += range.len() - 1;
        pass.hits.push(original.clone());
    }

    Ok(pass)
}
