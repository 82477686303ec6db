//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of the UI tree.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use tokio::sync::Mutex;

use crate::quotes::{QuoteBook, QuoteCard, StatusBoard};
use crate::storage::settings::AppSettings;
use crate::sync::{deliver, run_display_loop, SyncEngine, SyncEvent, SyncOutcome};
use crate::ui::surface::SignalSurface;
use crate::ui::Layout;

/// Long-lived handles built before the window opens
#[derive(Clone)]
pub struct Services {
    pub book: Arc<Mutex<QuoteBook>>,
    pub engine: Arc<SyncEngine>,
    pub settings: AppSettings,
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub book: Arc<Mutex<QuoteBook>>,
    pub engine: Arc<SyncEngine>,
    pub settings: AppSettings,
    pub card: Signal<QuoteCard>,
    pub options: Signal<Vec<String>>,
    pub selected: Signal<String>,
    pub status: Signal<StatusBoard>,
    pub last_sync: Signal<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        tracing::info!("AppState initialized");
        Self {
            book: services.book,
            engine: services.engine,
            settings: services.settings,
            card: Signal::new(QuoteCard::default()),
            options: Signal::new(Vec::new()),
            selected: Signal::new(crate::quotes::ALL_CATEGORIES.to_string()),
            status: Signal::new(StatusBoard::new()),
            last_sync: Signal::new(None),
        }
    }

    pub fn surface(&self) -> SignalSurface {
        SignalSurface {
            card: self.card,
            options: self.options,
            selected: self.selected,
            status: self.status,
            status_duration: self.settings.status_duration(),
        }
    }

    /// Post a transient status message
    pub fn notify(&self, message: impl Into<String>) {
        use crate::quotes::RenderSurface;
        self.surface().show_status(message.into());
    }

    /// Refresh the display and status from a finished sync run
    pub async fn apply_sync_event(&self, event: SyncEvent) {
        let mut last_sync = self.last_sync;
        record_sync_time(&mut last_sync, &event);
        let mut surface = self.surface();
        let mut book = self.book.lock().await;
        deliver(&event, &mut book, &mut surface);
    }
}

/// Only runs that reached the remote count as a sync
fn record_sync_time(last_sync: &mut Signal<Option<DateTime<Utc>>>, event: &SyncEvent) {
    if !matches!(event.outcome, SyncOutcome::Failed(_)) {
        last_sync.set(Some(event.at));
    }
}

#[component]
pub fn App() -> Element {
    let services = use_context::<Services>();
    let app_state = use_context_provider(|| AppState::new(services));

    {
        let app_state = app_state.clone();
        use_effect(move || {
            let app_state = app_state.clone();
            spawn(async move {
                let mut surface = app_state.surface();
                let mut last_sync = app_state.last_sync;
                run_display_loop(
                    app_state.engine.clone(),
                    app_state.settings.sync_interval(),
                    &mut surface,
                    |event| record_sync_time(&mut last_sync, event),
                )
                .await;
            });
        });
    }

    rsx! {
        Layout {}
    }
}
