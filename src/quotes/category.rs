//! Category index
//!
//! Distinct categories of the quote store plus the persisted filter selection.

use std::collections::HashSet;

use crate::quotes::QuoteStore;
use crate::storage::{KeyValueStore, StorageError, FILTER_KEY};

/// Filter value meaning "no restriction"
pub const ALL_CATEGORIES: &str = "all";

/// Active category filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse a selector value; the sentinel maps to [`CategoryFilter::All`]
    pub fn from_value(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    /// Selector value, as persisted under the filter key
    pub fn as_value(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

/// Distinct categories in first-seen order, and the current selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    categories: Vec<String>,
    selected: CategoryFilter,
}

impl CategoryIndex {
    pub fn build(store: &QuoteStore) -> Self {
        let mut index = Self::default();
        index.rebuild(store);
        index
    }

    /// Recompute categories from the store
    ///
    /// A selection whose category disappeared falls back to `All`.
    pub fn rebuild(&mut self, store: &QuoteStore) {
        let mut seen = HashSet::new();
        self.categories = store
            .quotes()
            .iter()
            .filter(|q| seen.insert(q.category.as_str()))
            .map(|q| q.category.clone())
            .collect();

        if !self.contains(&self.selected) {
            self.selected = CategoryFilter::All;
        }
    }

    /// Selector options, sentinel first
    pub fn options(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.categories.iter().cloned())
            .collect()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selected(&self) -> &CategoryFilter {
        &self.selected
    }

    pub fn contains(&self, filter: &CategoryFilter) -> bool {
        match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => self.categories.iter().any(|c| c == category),
        }
    }

    /// Restore the persisted filter, falling back to `All` for unknown categories
    pub fn restore_selection(&mut self, durable: &dyn KeyValueStore) -> &CategoryFilter {
        let saved = match durable.get(FILTER_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("Failed to read saved category filter: {}", e);
                None
            }
        };

        let filter = saved
            .map(|value| CategoryFilter::from_value(&value))
            .unwrap_or_default();

        self.selected = if self.contains(&filter) {
            filter
        } else {
            tracing::debug!(filter = filter.as_value(), "Saved filter no longer present");
            CategoryFilter::All
        };
        &self.selected
    }

    /// Select and persist a filter value
    pub fn select(
        &mut self,
        durable: &mut dyn KeyValueStore,
        filter: CategoryFilter,
    ) -> Result<(), StorageError> {
        durable.set(FILTER_KEY, filter.as_value())?;
        self.selected = filter;
        Ok(())
    }
}
