use crate::EquivalenceClasses;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type NumEdits = usize;
pub type ItemId = u32;

/// A single immutable catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    /// Price in whole roubles.
    pub price: u32,
    pub age_group: String,
    pub in_stock: bool,
    #[serde(default)]
    pub emoji: String,
}

/// Thresholds used by the suggestion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Queries with fewer graphemes than this produce no suggestions.
    pub min_query_len: usize,
    /// Maximum Levenshtein distance for a vocabulary word to be suggested.
    pub max_edits: NumEdits,
    /// Upper bound on the number of suggestions (and hints) returned.
    pub max_suggestions: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            max_edits: 2,
            max_suggestions: 5,
        }
    }
}

impl SearchLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_query_len(mut self, len: usize) -> Self {
        self.min_query_len = len;
        self
    }

    pub fn max_edits(mut self, num: NumEdits) -> Self {
        self.max_edits = num;
        self
    }

    pub fn max_suggestions(mut self, num: usize) -> Self {
        self.max_suggestions = num;
        self
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    /// A range that lets every price through.
    pub const ANY: PriceRange = PriceRange {
        min: 0,
        max: u32::MAX,
    };

    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, price: u32) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::ANY
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    #[inline]
    pub fn accepts(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

/// Non-text predicates combined with the text match by
/// [`filter_catalog`](crate::filter_catalog).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: CategoryFilter,
    /// Empty means "any age group".
    pub ages: Vec<String>,
    pub price: PriceRange,
    pub in_stock_only: bool,
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = CategoryFilter::Only(category.into());
        self
    }

    pub fn ages<T: Into<String>>(mut self, ages: impl IntoIterator<Item = T>) -> Self {
        self.ages = ages.into_iter().map(Into::into).collect();
        self
    }

    pub fn price(mut self, min: u32, max: u32) -> Self {
        self.price = PriceRange::new(min, max);
        self
    }

    pub fn in_stock_only(mut self, value: bool) -> Self {
        self.in_stock_only = value;
        self
    }

    /// Every predicate except the text match.
    pub fn accepts(&self, item: &CatalogItem) -> bool {
        self.category.accepts(&item.category)
            && (self.ages.is_empty() || self.ages.iter().any(|a| *a == item.age_group))
            && self.price.contains(item.price)
            && (!self.in_stock_only || item.in_stock)
    }
}

/// Search engine over one fixed catalog. Built with
/// [`CatalogSearchBuilder`](crate::CatalogSearchBuilder).
pub struct CatalogSearch {
    pub(crate) items: Vec<CatalogItem>,
    /// Folded names and categories, first occurrence order.
    pub(crate) vocabulary: Vec<String>,
    pub(crate) hints: Vec<String>,
    pub(crate) equivalences: &'static EquivalenceClasses,
    pub(crate) limits: SearchLimits,
}

impl fmt::Debug for CatalogSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogSearch")
            .field("items", &self.items.len())
            .field("vocabulary", &self.vocabulary.len())
            .field("hints", &self.hints.len())
            .field("limits", &self.limits)
            .finish()
    }
}
