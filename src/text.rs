use crate::NumEdits;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Canonical form used for every comparison: NFC-composed and lower-cased.
///
/// Composition matters for `ё`, which may arrive as `е` + U+0308.
pub fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

#[inline]
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Levenshtein distance over extended grapheme clusters.
///
/// Insertions, deletions and substitutions cost one each. Comparison is exact;
/// call [`fold`] first for case-insensitive distance.
///
/// ```rust
/// use fuzzy_catalog::levenshtein;
///
/// assert_eq!(levenshtein("мишка", "мышка"), 1);
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// ```
pub fn levenshtein(a: &str, b: &str) -> NumEdits {
    let a: Vec<&str> = a.graphemes(true).collect();
    let b: Vec<&str> = b.graphemes(true).collect();
    distance(&a, &b)
}

fn distance(a: &[&str], b: &[&str]) -> NumEdits {
    // Keep the row along the shorter side.
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<NumEdits> = (0..=short.len()).collect();
    let mut cur = vec![0; short.len() + 1];

    for (i, lg) in long.iter().enumerate() {
        cur[0] = i + 1;
        for (j, sg) in short.iter().enumerate() {
            let cost = usize::from(lg != sg);
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[short.len()]
}

/// `levenshtein(a, b) <= max`, skipping the table when the length gap alone
/// already exceeds `max`.
pub fn within_edits(a: &str, b: &str, max: NumEdits) -> bool {
    let a: Vec<&str> = a.graphemes(true).collect();
    let b: Vec<&str> = b.graphemes(true).collect();
    if a.len().abs_diff(b.len()) > max {
        return false;
    }
    distance(&a, &b) <= max
}
