//! Quote display and category filter

use dioxus::prelude::*;

use crate::app::AppState;
use crate::quotes::display::present;
use crate::quotes::ALL_CATEGORIES;

#[component]
pub fn QuotePanel() -> Element {
    let app_state = use_context::<AppState>();
    let card = app_state.card.read().clone();

    let show_new = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let app_state = app_state.clone();
            spawn(async move {
                let mut surface = app_state.surface();
                let pick = app_state.book.lock().await.pick();
                present(&pick, &mut surface);
            });
        }
    };

    let body_class = if card.is_empty { "quote-body quote-empty" } else { "quote-body" };

    rsx! {
        div {
            class: "card",
            p { class: "{body_class}", "{card.body}" }
            if let Some(caption) = card.caption.as_ref() {
                p { class: "quote-caption", "{caption}" }
            }
        }
        div {
            class: "row",
            button {
                onclick: show_new,
                "Show New Quote"
            }
        }
    }
}

#[component]
pub fn CategorySelect() -> Element {
    let app_state = use_context::<AppState>();
    let options = app_state.options.read().clone();
    let selected = app_state.selected.read().clone();

    let on_change = {
        let app_state = app_state.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            let app_state = app_state.clone();
            spawn(async move {
                let mut surface = app_state.surface();
                let result = app_state.book.lock().await.select_category(&value);
                match result {
                    Ok(pick) => {
                        let mut selected = app_state.selected;
                        selected.set(value);
                        present(&pick, &mut surface);
                    }
                    Err(e) => {
                        tracing::error!("Failed to save category filter: {}", e);
                        app_state.notify(format!("Could not save filter: {e}"));
                    }
                }
            });
        }
    };

    rsx! {
        label { r#for: "category-filter", "Category" }
        select {
            id: "category-filter",
            value: "{selected}",
            onchange: on_change,
            for category in options {
                option {
                    key: "{category}",
                    value: "{category}",
                    selected: category == selected,
                    if category == ALL_CATEGORIES { "All Categories" } else { "{category}" }
                }
            }
        }
    }
}
