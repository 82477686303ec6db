use std::sync::Arc;

use dioxus::desktop::{Config, WindowBuilder};
use quoteboard::app::{App, Services};
use quoteboard::quotes::QuoteBook;
use quoteboard::storage::settings::{load_settings, save_settings};
use quoteboard::storage::{FileStore, KeyValueStore, MemoryStore};
use quoteboard::sync::{HttpRemote, SyncEngine};
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quoteboard=debug"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let settings = load_settings();
    if let Err(e) = save_settings(&settings) {
        tracing::warn!("Failed to save settings: {}", e);
    }

    let durable: Box<dyn KeyValueStore> = match FileStore::open_default() {
        Ok(store) => {
            tracing::info!(root = %store.root().display(), "Using durable store");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("No durable storage available, quotes will not persist: {}", e);
            Box::new(MemoryStore::new())
        }
    };
    let book = Arc::new(Mutex::new(QuoteBook::open(durable, Box::new(MemoryStore::new()))));

    let remote = Arc::new(HttpRemote::from_settings(&settings)?);
    tracing::info!(endpoint = %remote.endpoint(), "Remote sync configured");
    let engine = Arc::new(SyncEngine::new(remote, book.clone(), settings.push_policy));

    let services = Services {
        book,
        engine,
        settings,
    };

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(WindowBuilder::new().with_title("Quote Board")),
        )
        .with_context(services)
        .launch(App);

    Ok(())
}
