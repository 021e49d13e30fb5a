use crate::catalog::{self, DEFAULT_HINTS};
use crate::equivalence::DEFAULT_EQUIVALENCES;
use crate::{CatalogItem, CatalogSearch, EquivalenceClasses, SearchLimits};
use tracing::debug;

/// Builder for [`CatalogSearch`].
///
/// ```rust
/// use fuzzy_catalog::{CatalogSearchBuilder, SearchLimits, sample_catalog};
///
/// let engine = CatalogSearchBuilder::new()
///     .limits(SearchLimits::new().max_suggestions(3))
///     .build(sample_catalog().to_vec());
///
/// assert_eq!(engine.suggest("мишк"), ["плюшевый мишка"]);
/// ```
#[derive(Debug, Default)]
pub struct CatalogSearchBuilder {
    limits: SearchLimits,
    equivalences: Option<&'static EquivalenceClasses>,
    hints: Option<Vec<String>>,
}

impl CatalogSearchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Query length, edit distance and result count thresholds.
    #[must_use]
    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replace the default {е, ё} / {и, ы} classes.
    #[must_use]
    pub fn equivalences(mut self, classes: &'static EquivalenceClasses) -> Self {
        self.equivalences = Some(classes);
        self
    }

    /// Curated list searched by [`CatalogSearch::hints`].
    #[must_use]
    pub fn hints<T: Into<String>>(mut self, hints: impl IntoIterator<Item = T>) -> Self {
        self.hints = Some(hints.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self, items: impl IntoIterator<Item = CatalogItem>) -> CatalogSearch {
        let items: Vec<CatalogItem> = items.into_iter().collect();
        let vocabulary = catalog::vocabulary(&items);
        let hints = self
            .hints
            .unwrap_or_else(|| DEFAULT_HINTS.iter().map(|h| (*h).to_owned()).collect());

        debug!(
            items = items.len(),
            vocabulary = vocabulary.len(),
            hints = hints.len(),
            "catalog search built"
        );

        CatalogSearch {
            items,
            vocabulary,
            hints,
            equivalences: self.equivalences.unwrap_or(&DEFAULT_EQUIVALENCES),
            limits: self.limits,
        }
    }
}
