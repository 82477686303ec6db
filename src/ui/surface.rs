//! Signal-backed render surface
//!
//! Bridges the quote book's [`RenderSurface`] calls onto Dioxus signals.

use std::time::Duration;

use dioxus::prelude::*;

use crate::quotes::{QuoteCard, RenderSurface, StatusBoard};

/// Must only be used from inside the Dioxus runtime (components, handlers, spawned tasks)
#[derive(Clone, Copy)]
pub struct SignalSurface {
    pub card: Signal<QuoteCard>,
    pub options: Signal<Vec<String>>,
    pub selected: Signal<String>,
    pub status: Signal<StatusBoard>,
    pub status_duration: Duration,
}

impl RenderSurface for SignalSurface {
    fn render_quote(&mut self, card: QuoteCard) {
        self.card.set(card);
    }

    fn render_empty(&mut self, card: QuoteCard) {
        self.card.set(card);
    }

    fn populate_category_options(&mut self, options: Vec<String>, selected: String) {
        self.options.set(options);
        self.selected.set(selected);
    }

    fn show_status(&mut self, message: String) {
        let generation = self.status.write().post(message);
        let mut status = self.status;
        let duration = self.status_duration;
        spawn(async move {
            tokio::time::sleep(duration).await;
            status.write().expire(generation);
        });
    }
}
