mod builder;
mod catalog;
mod equivalence;
mod error;
pub mod store;
mod structs;
#[cfg(test)]
mod tests;
mod text;

pub use builder::CatalogSearchBuilder;
pub use catalog::{
    AGE_GROUPS, DEFAULT_HINTS, catalog_from_json, categories, sample_catalog, vocabulary,
};
pub use equivalence::EquivalenceClasses;
pub use error::{CheckoutError, ReviewError, StoreError};
pub use structs::*;
pub use text::{fold, levenshtein, within_edits};

use equivalence::DEFAULT_EQUIVALENCES;
use regex::Regex;
use tracing::trace;

/// Vocabulary entries that contain the query or lie within
/// `limits.max_edits` of it, in vocabulary order.
///
/// ```rust
/// use fuzzy_catalog::suggest;
///
/// let vocab = ["кукла барби", "куклы", "спорт"];
/// assert_eq!(suggest("кукл", &vocab, 5), ["кукла барби", "куклы"]);
/// assert!(suggest("к", &vocab, 5).is_empty());
/// ```
pub fn suggest<'v, S: AsRef<str>>(
    query: &str,
    vocabulary: &'v [S],
    max_results: usize,
) -> Vec<&'v str> {
    let limits = SearchLimits::default().max_suggestions(max_results);
    suggest_with(query, vocabulary.iter().map(|s| s.as_ref()), &limits)
}

/// Whether `candidate` contains the query literally or through the default
/// equivalence classes. No edit-distance fallback.
///
/// ```rust
/// use fuzzy_catalog::matches_loose;
///
/// assert!(matches_loose("Плюшевый мишка", "мышка"));
/// ```
pub fn matches_loose(candidate: &str, query: &str) -> bool {
    loose_with(candidate, query, &DEFAULT_EQUIVALENCES)
}

fn loose_with(candidate: &str, query: &str, classes: &EquivalenceClasses) -> bool {
    if query.trim().is_empty() {
        return false;
    }
    let query = fold(query);
    let pattern = classes.pattern(&query);
    equivalence::matches_loose(&fold(candidate), &query, pattern.as_ref())
}

/// Catalog items passing the text match and every predicate of `filter`,
/// in catalog order. `suggestions` is normally the output of [`suggest`] for
/// the same query.
pub fn filter_catalog<'c, S: AsRef<str>>(
    catalog: &'c [CatalogItem],
    query: &str,
    suggestions: &[S],
    filter: &CatalogFilter,
) -> Vec<&'c CatalogItem> {
    filter_with(catalog, query, suggestions, filter, &DEFAULT_EQUIVALENCES)
}

fn suggest_with<'v>(
    query: &str,
    vocabulary: impl Iterator<Item = &'v str>,
    limits: &SearchLimits,
) -> Vec<&'v str> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let query = fold(query);
    if limits.max_suggestions == 0 || text::grapheme_len(&query) < limits.min_query_len.max(1) {
        return Vec::new();
    }

    let found: Vec<&str> = vocabulary
        .filter(|word| {
            let word = fold(word);
            word.contains(&query) || within_edits(&query, &word, limits.max_edits)
        })
        .take(limits.max_suggestions)
        .collect();
    trace!(query = %query, found = found.len(), "suggestions");
    found
}

fn filter_with<'c, S: AsRef<str>>(
    catalog: &'c [CatalogItem],
    query: &str,
    suggestions: &[S],
    filter: &CatalogFilter,
    classes: &EquivalenceClasses,
) -> Vec<&'c CatalogItem> {
    // Only a truly empty query lifts the text restriction; whitespace is
    // matched literally.
    let query = fold(query);
    let text_match = TextMatch::new(&query, suggestions, classes);
    let result: Vec<&CatalogItem> = catalog
        .iter()
        .filter(|item| filter.accepts(item) && text_match.accepts(item))
        .collect();
    trace!(query = %query, matched = result.len(), "catalog filtered");
    result
}

/// Text half of the filter, compiled once per query.
struct TextMatch<'q> {
    query: &'q str,
    pattern: Option<Regex>,
    suggestions: Vec<String>,
}

impl<'q> TextMatch<'q> {
    fn new<S: AsRef<str>>(
        query: &'q str,
        suggestions: &[S],
        classes: &EquivalenceClasses,
    ) -> Self {
        Self {
            query,
            pattern: classes.pattern(query),
            suggestions: suggestions
                .iter()
                .map(|s| fold(s.as_ref()))
                .filter(|s| !s.trim().is_empty())
                .collect(),
        }
    }

    fn accepts(&self, item: &CatalogItem) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let name = fold(&item.name);
        let category = fold(&item.category);
        let direct =
            |field: &str| equivalence::matches_loose(field, self.query, self.pattern.as_ref());
        direct(&name)
            || direct(&category)
            || self
                .suggestions
                .iter()
                .any(|s| name.contains(s.as_str()) || category.contains(s.as_str()))
    }
}

/// Catalog search engine
impl CatalogSearch {
    /// Dropdown suggestions drawn from the catalog vocabulary.
    pub fn suggest(&self, query: &str) -> Vec<&str> {
        suggest_with(query, self.vocabulary.iter().map(String::as_str), &self.limits)
    }

    /// Curated hints matching the query through the loose pass. Any non-blank
    /// query is considered; results keep hint order.
    pub fn hints(&self, query: &str) -> Vec<&str> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let query = fold(query);
        let pattern = self.equivalences.pattern(&query);
        self.hints
            .iter()
            .filter(|hint| equivalence::matches_loose(&fold(hint), &query, pattern.as_ref()))
            .map(String::as_str)
            .take(self.limits.max_suggestions)
            .collect()
    }

    /// Live result list: text match (literal, equivalence classes, or via
    /// this query's suggestions) combined with `filter`.
    pub fn filter(&self, query: &str, filter: &CatalogFilter) -> Vec<&CatalogItem> {
        let suggestions = self.suggest(query);
        filter_with(&self.items, query, &suggestions, filter, self.equivalences)
    }

    /// Loose match of one candidate against the query using this engine's
    /// equivalence classes.
    pub fn matches_loose(&self, candidate: &str, query: &str) -> bool {
        loose_with(candidate, query, self.equivalences)
    }

    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[inline]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[inline]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    #[inline]
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }
}
