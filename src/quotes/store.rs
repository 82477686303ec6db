//! Quote store
//!
//! Ordered list of quotes, loaded from and flushed to a durable key.

use serde_json::Value;

use crate::quotes::QuoteError;
use crate::storage::{KeyValueStore, StorageError, QUOTES_KEY};
use crate::types::{seed_quotes, Quote, QuoteDraft};

/// In-memory source of truth for the session's quotes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

impl QuoteStore {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// Load the durable quote list, falling back to the built-in seed
    ///
    /// Missing, unreadable or unparseable state, and an empty saved list,
    /// all yield the seed. The result is never empty.
    pub fn load(durable: &dyn KeyValueStore) -> Self {
        match Self::load_internal(durable) {
            Ok(Some(quotes)) if !quotes.is_empty() => {
                tracing::debug!(count = quotes.len(), "Loaded quotes from durable storage");
                Self { quotes }
            }
            Ok(_) => {
                tracing::info!("No saved quotes found, using seed quotes");
                Self::new(seed_quotes())
            }
            Err(e) => {
                tracing::warn!("Failed to load quotes, using seed quotes: {}", e);
                Self::new(seed_quotes())
            }
        }
    }

    fn load_internal(durable: &dyn KeyValueStore) -> Result<Option<Vec<Quote>>, StorageError> {
        let Some(json) = durable.get(QUOTES_KEY)? else {
            return Ok(None);
        };
        let quotes: Vec<Quote> = serde_json::from_str(&json)?;
        Ok(Some(quotes))
    }

    /// Replace the durable copy with the full current list
    pub fn flush(&self, durable: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.quotes)?;
        durable.set(QUOTES_KEY, &json)
    }

    /// Validate, append and flush a new quote
    pub fn add(
        &mut self,
        durable: &mut dyn KeyValueStore,
        text: &str,
        category: &str,
    ) -> Result<Quote, QuoteError> {
        let draft = QuoteDraft::parse(text, category).ok_or_else(|| {
            QuoteError::Validation("Please enter both quote text and category.".to_string())
        })?;
        let quote = draft.into_quote();

        self.quotes.push(quote.clone());
        if let Err(e) = self.flush(durable) {
            self.quotes.pop();
            return Err(e.into());
        }

        tracing::info!(category = %quote.category, "Added quote");
        Ok(quote)
    }

    /// Append every record of an imported sequence, then flush
    ///
    /// All records are checked before anything is appended. No de-duplication.
    pub fn import_many(
        &mut self,
        durable: &mut dyn KeyValueStore,
        records: Vec<Value>,
    ) -> Result<usize, QuoteError> {
        let mut incoming = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let quote: Quote = serde_json::from_value(record).map_err(|e| {
                QuoteError::Validation(format!("record {index} is not a quote: {e}"))
            })?;
            if !quote.is_complete() {
                return Err(QuoteError::Validation(format!(
                    "record {index} has an empty text or category"
                )));
            }
            incoming.push(quote);
        }

        let count = incoming.len();
        let previous_len = self.quotes.len();
        self.quotes.extend(incoming);
        if let Err(e) = self.flush(durable) {
            self.quotes.truncate(previous_len);
            return Err(e.into());
        }

        tracing::info!(count, "Imported quotes");
        Ok(count)
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// First record whose text equals `text`
    pub fn find_by_text_mut(&mut self, text: &str) -> Option<&mut Quote> {
        self.quotes.iter_mut().find(|q| q.text == text)
    }

    pub(crate) fn append(&mut self, quotes: Vec<Quote>) {
        self.quotes.extend(quotes);
    }
}
