//! Quote Board Library
//!
//! Core library for the Quote Board desktop application: the quote book,
//! its persistence, and periodic sync against a remote collection.

pub mod app;
pub mod quotes;
pub mod storage;
pub mod sync;
pub mod types;
pub mod ui;
