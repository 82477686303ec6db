//! UI components for Quote Board
//!
//! This module contains all user interface components built with Dioxus.

#![allow(non_snake_case)]

pub mod add_form;
pub mod quote_panel;
pub mod status;
pub mod surface;
pub mod transfer;

use dioxus::prelude::*;

use crate::ui::add_form::AddQuoteForm;
use crate::ui::quote_panel::{CategorySelect, QuotePanel};
use crate::ui::status::{StatusBanner, SyncBar};
use crate::ui::transfer::TransferPanel;

const STYLES: &str = r#"
:root { --bg: #1b1a19; --panel: #252321; --text: #f2ede7; --muted: #9b948c; --accent: #2a6b7c; --error: #c0533f; }
body { margin: 0; background: var(--bg); color: var(--text); font-family: system-ui, sans-serif; }
.board { max-width: 680px; margin: 0 auto; padding: 24px; display: flex; flex-direction: column; gap: 16px; }
.card { background: var(--panel); border-radius: 14px; padding: 18px 20px; }
.quote-body { font-size: 1.2rem; line-height: 1.5; margin: 0 0 8px 0; }
.quote-caption { color: var(--muted); font-size: 0.85rem; margin: 0; }
.quote-empty { color: var(--muted); font-style: italic; }
.row { display: flex; gap: 8px; align-items: center; flex-wrap: wrap; }
input, select { background: #11100f; color: var(--text); border: 1px solid #3a3733; border-radius: 8px; padding: 8px 10px; }
input[type=text] { flex: 1; min-width: 160px; }
button { background: var(--accent); color: var(--text); border: none; border-radius: 8px; padding: 8px 14px; cursor: pointer; }
button.secondary { background: #3a3733; }
.status { background: var(--accent); border-radius: 10px; padding: 10px 14px; font-size: 0.9rem; }
.sync-bar { color: var(--muted); font-size: 0.8rem; justify-content: space-between; }
"#;

pub fn Layout() -> Element {
    rsx! {
        style { "{STYLES}" }
        div {
            class: "board",
            h1 { "Quote Board" }
            StatusBanner {}
            div {
                class: "row",
                CategorySelect {}
            }
            QuotePanel {}
            AddQuoteForm {}
            TransferPanel {}
            SyncBar {}
        }
    }
}
