use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::prelude::*;
use crate::text::Offsets;

static SHORTCODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#":[\w+-]+:"#).unwrap() );

/// Finds every shortcode token (`:name:`, where the name is made of word characters, `-` and `+`)
/// inside the given regions of `text`.
///
/// Regions are char ranges and are searched independently, in order; a token never spans two
/// regions. Within a region, matching is leftmost-first and non-overlapping, so `:a:b:` yields
/// only `:a:`. The returned ranges are char ranges into `text`.
pub fn scan(text: &str, regions: &[Range<usize>]) -> Vec<Range<usize>> {
    let offsets = Offsets::new(text);
    let mut matches = Vec::new();

    for region in regions {
        if region.start >= region.end {
            continue;
        }

        let bytes = offsets.bytes(region.clone());
        for m in SHORTCODE_REGEX.find_iter(&text[bytes.clone()]) {
            let start = bytes.start + m.start();
            let end = bytes.start + m.end();
            matches.push(offsets.chars(start..end));
        }
    }

    trace!("Scanned {} region(s), found {} shortcode(s).", regions.len(), matches.len());
    matches
}

/// Strips the delimiting colons from a token.
pub fn name_of(token: &str) -> &str {
    token
        .trim_start_matches(':')
        .trim_end_matches(':')
}
