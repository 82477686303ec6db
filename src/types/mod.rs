//! Shared type definitions
//!
//! This module contains the data types shared across the application.

pub mod quote;

pub use quote::{seed_quotes, Quote, QuoteDraft};
