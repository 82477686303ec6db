//! Import/export controls

use dioxus::prelude::*;

use crate::app::AppState;
use crate::storage::get_export_dir;

#[component]
pub fn TransferPanel() -> Element {
    let app_state = use_context::<AppState>();

    let on_export = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let app_state = app_state.clone();
            spawn(async move {
                let dir = match get_export_dir() {
                    Ok(dir) => dir,
                    Err(e) => {
                        tracing::error!("No export directory: {}", e);
                        app_state.notify(format!("Export failed: {e}"));
                        return;
                    }
                };

                let result = app_state.book.lock().await.export_to_dir(&dir);
                match result {
                    Ok(path) => app_state.notify(format!("Quotes exported to {}", path.display())),
                    Err(e) => {
                        tracing::error!("Failed to export quotes: {}", e);
                        app_state.notify(format!("Export failed: {e}"));
                    }
                }
            });
        }
    };

    let on_import = {
        let app_state = app_state.clone();
        move |evt: FormEvent| {
            let app_state = app_state.clone();
            async move {
                let Some(files) = evt.files() else {
                    return;
                };

                for name in files.files() {
                    let Some(raw) = files.read_file_to_string(&name).await else {
                        tracing::warn!("Could not read import file {}", name);
                        app_state.notify(format!("Could not read {name}"));
                        continue;
                    };

                    let mut surface = app_state.surface();
                    let result = {
                        let mut book = app_state.book.lock().await;
                        let result = book.import_document(&raw);
                        if result.is_ok() {
                            book.populate(&mut surface);
                        }
                        result
                    };

                    match result {
                        Ok(count) => {
                            tracing::info!(count, file = %name, "Imported quote document");
                            app_state.notify(format!("Quotes imported successfully! ({count} added)"));
                        }
                        Err(e) => {
                            tracing::warn!("Rejected import {}: {}", name, e);
                            app_state.notify(format!("Import failed: {e}"));
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "card",
            h3 { "Import / Export" }
            div {
                class: "row",
                button {
                    class: "secondary",
                    onclick: on_export,
                    "Export Quotes"
                }
                input {
                    r#type: "file",
                    accept: ".json,application/json",
                    onchange: on_import,
                }
            }
        }
    }
}
