//! Add-quote form
//!
//! Adds locally, refreshes the category options, then posts the quote to the
//! remote. A failed post never undoes the local add.

use dioxus::prelude::*;

use crate::app::AppState;
use crate::quotes::QuoteError;

#[component]
pub fn AddQuoteForm() -> Element {
    let app_state = use_context::<AppState>();
    let mut text = use_signal(String::new);
    let mut category = use_signal(String::new);

    let on_add = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let app_state = app_state.clone();
            let new_text = text();
            let new_category = category();
            spawn(async move {
                let mut surface = app_state.surface();
                let added = {
                    let mut book = app_state.book.lock().await;
                    let result = book.add_quote(&new_text, &new_category);
                    if result.is_ok() {
                        book.populate(&mut surface);
                    }
                    result
                };

                let quote = match added {
                    Ok(quote) => quote,
                    Err(QuoteError::Validation(message)) => {
                        app_state.notify(message);
                        return;
                    }
                    Err(e) => {
                        tracing::error!("Failed to add quote: {}", e);
                        app_state.notify(format!("Could not save quote: {e}"));
                        return;
                    }
                };

                text.set(String::new());
                category.set(String::new());
                app_state.notify("New quote added!");

                let outcome = app_state.engine.push(&quote).await;
                if let Some(message) = outcome.status_message() {
                    app_state.notify(message);
                }
            });
        }
    };

    rsx! {
        div {
            class: "card",
            h3 { "Add a quote" }
            div {
                class: "row",
                input {
                    r#type: "text",
                    placeholder: "Enter a new quote",
                    value: "{text}",
                    oninput: move |evt| text.set(evt.value()),
                }
                input {
                    r#type: "text",
                    placeholder: "Enter quote category",
                    value: "{category}",
                    oninput: move |evt| category.set(evt.value()),
                }
                button {
                    onclick: on_add,
                    "Add Quote"
                }
            }
        }
    }
}
