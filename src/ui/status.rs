//! Status banner and sync bar

use dioxus::prelude::*;

use crate::app::AppState;

#[component]
pub fn StatusBanner() -> Element {
    let app_state = use_context::<AppState>();
    let message = app_state.status.read().message().map(str::to_string);

    rsx! {
        if let Some(message) = message {
            div {
                class: "status",
                role: "status",
                "{message}"
            }
        }
    }
}

#[component]
pub fn SyncBar() -> Element {
    let app_state = use_context::<AppState>();
    let mut syncing = use_signal(|| false);

    let last_sync = (*app_state.last_sync.read())
        .map(|at| at.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let on_sync = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            if syncing() {
                return;
            }
            syncing.set(true);
            let app_state = app_state.clone();
            spawn(async move {
                let event = app_state.engine.sync_once().await;
                app_state.apply_sync_event(event).await;
                syncing.set(false);
            });
        }
    };

    rsx! {
        div {
            class: "row sync-bar",
            span { "Last synced: {last_sync}" }
            button {
                class: "secondary",
                disabled: syncing(),
                onclick: on_sync,
                if syncing() { "Syncing..." } else { "Sync now" }
            }
        }
    }
}
