use std::ops::Range;

/// Builds the scan regions lying between consecutive `excluded` ranges of a text `len` chars long.
///
/// Each region extends one char into the excluded ranges on either side of it: the region before
/// an excluded range ends just after its first char, and the region after it starts at its last
/// char. For unmatched shortcodes those chars are the colons, so a token sharing a colon with an
/// unmatched neighbour (the `:b:` in `:a:b:`) falls inside a region.
///
/// `excluded` must be ordered and disjoint.
pub fn gaps(len: usize, excluded: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut regions = Vec::with_capacity(excluded.len() + 1);
    let mut last = 0;

    for range in excluded {
        let end = (range.start + 1).min(len).max(last);
        regions.push(last..end);
        last = range.end.saturating_sub(1).min(len).max(end);
    }
    regions.push(last..len.max(last));

    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_excluded() {
        assert_eq!(gaps(10, &[]), vec![0..10]);
        assert_eq!(gaps(0, &[]), vec![0..0]);
    }

    #[test]
    fn shares_boundary_chars() {
        assert_eq!(gaps(9, &[0..4]), vec![0..1, 3..9]);
        assert_eq!(gaps(12, &[2..5, 8..12]), vec![0..3, 4..9, 11..12]);
    }

    #[test]
    fn excluded_at_end() {
        assert_eq!(gaps(7, &[4..7]), vec![0..5, 6..7]);
    }

    #[test]
    fn clamps() {
        assert_eq!(gaps(3, &[0..3]), vec![0..1, 2..3]);
        assert_eq!(gaps(2, &[1..1]), vec![0..2, 2..2]);
    }
}
