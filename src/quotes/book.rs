//! Quote book session
//!
//! The single owned state object for a session. It holds the store, the
//! category index and both key-value stores, and runs every mutation
//! through the same flush + index rebuild path.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::quotes::display::{pick_quote, present, Pick, RenderSurface};
use crate::quotes::{transfer, CategoryFilter, CategoryIndex, QuoteError, QuoteStore};
use crate::storage::{KeyValueStore, LAST_QUOTE_KEY};
use crate::sync::merge::{merge, MergeOutcome};
use crate::types::Quote;

pub struct QuoteBook {
    store: QuoteStore,
    categories: CategoryIndex,
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
}

impl QuoteBook {
    /// Load durable state, build the category index and restore the filter
    pub fn open(durable: Box<dyn KeyValueStore>, session: Box<dyn KeyValueStore>) -> Self {
        let store = QuoteStore::load(durable.as_ref());
        let mut categories = CategoryIndex::build(&store);
        categories.restore_selection(durable.as_ref());

        tracing::info!(
            quotes = store.len(),
            categories = categories.categories().len(),
            filter = categories.selected().as_value(),
            "Quote book opened"
        );

        Self {
            store,
            categories,
            durable,
            session,
        }
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    pub fn selected(&self) -> &CategoryFilter {
        self.categories.selected()
    }

    pub fn add_quote(&mut self, text: &str, category: &str) -> Result<Quote, QuoteError> {
        let quote = self.store.add(self.durable.as_mut(), text, category)?;
        self.categories.rebuild(&self.store);
        Ok(quote)
    }

    pub fn import_document(&mut self, raw: &str) -> Result<usize, QuoteError> {
        let count = transfer::import_document(&mut self.store, self.durable.as_mut(), raw)?;
        self.categories.rebuild(&self.store);
        Ok(count)
    }

    pub fn export_document(&self) -> Result<String, QuoteError> {
        transfer::export_document(&self.store)
    }

    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, QuoteError> {
        transfer::export_to_dir(&self.store, dir)
    }

    /// Merge fetched remote quotes; flush and reindex only if something changed
    pub fn apply_remote(&mut self, fetched: Vec<Quote>) -> Result<MergeOutcome, QuoteError> {
        let outcome = merge(&mut self.store, fetched);
        if outcome.changed() {
            self.store.flush(self.durable.as_mut())?;
            self.categories.rebuild(&self.store);
        }
        Ok(outcome)
    }

    /// Random pick under the current filter, remembered for the session
    pub fn pick(&mut self) -> Pick {
        self.pick_with(&mut rand::rng())
    }

    pub fn pick_with<R: Rng>(&mut self, rng: &mut R) -> Pick {
        let pick = pick_quote(&self.store, self.categories.selected(), rng);
        if let Pick::Quote(quote) = &pick {
            self.remember_shown(quote);
        }
        pick
    }

    /// Last quote shown in this session, if any
    pub fn last_shown(&self) -> Option<Quote> {
        let json = match self.session.get(LAST_QUOTE_KEY) {
            Ok(json) => json?,
            Err(e) => {
                tracing::warn!("Failed to read last shown quote: {}", e);
                return None;
            }
        };
        serde_json::from_str(&json).ok()
    }

    /// Reuse the session's last shown quote, otherwise draw a new one
    pub fn startup_pick(&mut self) -> Pick {
        match self.last_shown() {
            Some(quote) => Pick::Quote(quote),
            None => self.pick(),
        }
    }

    /// Persist a new filter selection and draw under it
    pub fn select_category(&mut self, value: &str) -> Result<Pick, QuoteError> {
        let filter = CategoryFilter::from_value(value);
        self.categories.select(self.durable.as_mut(), filter)?;
        Ok(self.pick())
    }

    /// Push category options to the surface
    pub fn populate(&self, surface: &mut dyn RenderSurface) {
        surface.populate_category_options(
            self.categories.options(),
            self.categories.selected().as_value().to_string(),
        );
    }

    /// Repopulate options and show a fresh filtered pick
    pub fn refresh(&mut self, surface: &mut dyn RenderSurface) -> Pick {
        self.populate(surface);
        let pick = self.pick();
        present(&pick, surface);
        pick
    }

    fn remember_shown(&mut self, quote: &Quote) {
        let result = serde_json::to_string(quote)
            .map_err(crate::storage::StorageError::from)
            .and_then(|json| self.session.set(LAST_QUOTE_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to remember shown quote: {}", e);
        }
    }
}
