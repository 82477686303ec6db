//! Quote book
//!
//! The in-memory quote store, its category index, random selection and
//! import/export, tied together by [`QuoteBook`].

pub mod book;
pub mod category;
pub mod display;
pub mod status;
pub mod store;
pub mod transfer;

use thiserror::Error;

use crate::storage::StorageError;

pub use book::QuoteBook;
pub use category::{CategoryFilter, CategoryIndex, ALL_CATEGORIES};
pub use display::{pick_quote, render, Pick, QuoteCard, RenderSurface};
pub use status::StatusBoard;
pub use store::QuoteStore;

/// Errors raised by quote book operations
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Empty or malformed user-entered text or category
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Import document is not a well-formed JSON array
    #[error("Invalid document: {0}")]
    Format(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
