//! Quote types
//!
//! Defines the quote record and the validated draft used by the add form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single quote record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote body. Acts as the natural key during sync merges.
    pub text: String,
    /// Category label used for filtering
    pub category: String,
}

impl Quote {
    /// Create a new quote without validation
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// True when both fields carry something other than whitespace
    pub fn is_complete(&self) -> bool {
        !self.text.trim().is_empty() && !self.category.trim().is_empty()
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.text, self.category)
    }
}

/// User-entered quote fields, trimmed and checked before they reach the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDraft {
    text: String,
    category: String,
}

impl QuoteDraft {
    /// Trim both inputs. Returns `None` if either is empty afterwards.
    pub fn parse(text: &str, category: &str) -> Option<Self> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() || category.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            category: category.to_string(),
        })
    }

    pub fn into_quote(self) -> Quote {
        Quote {
            text: self.text,
            category: self.category,
        }
    }
}

/// The fixed seed used when no durable state exists
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The only limit to our realization of tomorrow is our doubts of today.",
            "Motivation",
        ),
        Quote::new(
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        Quote::new("JavaScript is the language of the web.", "Tech"),
    ]
}
