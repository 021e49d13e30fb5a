use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Sets of letters treated as interchangeable by the loose matching pass.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceClasses {
    classes: Vec<Vec<char>>,
}

impl EquivalenceClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one class. Letters are stored lower-cased; classes with fewer than
    /// two distinct letters are ignored.
    #[must_use]
    pub fn class(mut self, letters: impl IntoIterator<Item = char>) -> Self {
        let mut class: Vec<char> = Vec::new();
        for c in letters.into_iter().flat_map(char::to_lowercase) {
            if !class.contains(&c) {
                class.push(c);
            }
        }
        if class.len() > 1 {
            self.classes.push(class);
        }
        self
    }

    fn class_of(&self, c: char) -> Option<&[char]> {
        self.classes
            .iter()
            .find(|class| class.contains(&c))
            .map(Vec::as_slice)
    }

    /// Regex source for an already folded query: class members become a
    /// character class, everything else is escaped.
    pub fn pattern_source(&self, folded_query: &str) -> String {
        let mut source = String::with_capacity(folded_query.len() * 2);
        let mut buf = [0u8; 4];
        for c in folded_query.chars() {
            match self.class_of(c) {
                Some(class) => {
                    source.push('[');
                    for &member in class {
                        source.push_str(&regex::escape(member.encode_utf8(&mut buf)));
                    }
                    source.push(']');
                }
                None => source.push_str(&regex::escape(c.encode_utf8(&mut buf))),
            }
        }
        source
    }

    /// Compiles [`pattern_source`](Self::pattern_source). `None` for an empty
    /// query or when the regex cannot be built; callers then rely on the
    /// literal test alone.
    pub fn pattern(&self, folded_query: &str) -> Option<Regex> {
        if folded_query.is_empty() {
            return None;
        }
        let source = self.pattern_source(folded_query);
        match Regex::new(&source) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!(%err, "equivalence pattern rejected, falling back to literal match");
                None
            }
        }
    }
}

/// {е, ё} and {и, ы}.
pub(crate) static DEFAULT_EQUIVALENCES: LazyLock<EquivalenceClasses> = LazyLock::new(|| {
    EquivalenceClasses::new()
        .class(['е', 'ё'])
        .class(['и', 'ы'])
});

/// Both operands must already be folded.
pub(crate) fn matches_loose(
    folded_candidate: &str,
    folded_query: &str,
    pattern: Option<&Regex>,
) -> bool {
    folded_candidate.contains(folded_query)
        || pattern.is_some_and(|re| re.is_match(folded_candidate))
}
