//! Periodic sync task
//!
//! Runs the engine once immediately and then on a fixed period, forwarding
//! every [`SyncEvent`] over a channel. The task ends when the receiver is
//! dropped, which in the app only happens at shutdown.
//!
//! [`run_display_loop`] drives a surface from that channel for the lifetime
//! of a session.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::quotes::display::present;
use crate::quotes::RenderSurface;
use crate::sync::engine::{deliver, SyncEngine, SyncEvent};

pub fn spawn_sync_task(
    engine: Arc<SyncEngine>,
    period: Duration,
    events: mpsc::UnboundedSender<SyncEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(period_ms = period.as_millis() as u64, "Sync task started");

        loop {
            // First tick completes immediately: the startup sync
            ticker.tick().await;

            let event = engine.sync_once().await;
            if events.send(event).is_err() {
                tracing::debug!("Sync event receiver dropped, stopping sync task");
                break;
            }
        }
    })
}

/// Show the startup quote, then apply sync events to `surface` as they arrive
///
/// The startup display is fully rendered before the sync task is spawned, so
/// the first sync refresh always lands on top of it.
pub async fn run_display_loop(
    engine: Arc<SyncEngine>,
    period: Duration,
    surface: &mut dyn RenderSurface,
    mut on_event: impl FnMut(&SyncEvent),
) {
    {
        let mut book = engine.book().lock().await;
        book.populate(surface);
        let pick = book.startup_pick();
        present(&pick, surface);
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _task = spawn_sync_task(engine.clone(), period, tx);

    while let Some(event) = rx.recv().await {
        on_event(&event);
        let mut book = engine.book().lock().await;
        deliver(&event, &mut book, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::book::tests::{open_book, RecordingSurface};
    use crate::storage::settings::PushPolicy;
    use crate::sync::engine::tests::{record, MockRemote};
    use crate::sync::engine::SyncOutcome;
    use crate::sync::merge::{MergeOutcome, CONFLICT_MESSAGE};
    use tokio::sync::Mutex;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_sync_task_runs_at_startup_and_on_interval() {
        let (book, _) = open_book();
        let remote = Arc::new(MockRemote::with_records(vec![record(1, "from server")]));
        let engine = Arc::new(SyncEngine::new(
            remote,
            Arc::new(Mutex::new(book)),
            PushPolicy::BestEffort,
        ));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_sync_task(engine, Duration::from_millis(20), tx);

        let first = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
        assert_eq!(
            first.outcome,
            SyncOutcome::Merged(MergeOutcome { added: 1, conflicts: 0 })
        );

        let second = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
        assert!(!second.changed());
        assert!(second.at >= first.at);

        drop(rx);
        timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_startup_display_precedes_first_sync_refresh() {
        let (mut book, _) = open_book();
        // Remember the seed "Life" quote as last shown
        book.select_category("Life").unwrap();

        // id 5 maps to "Tech", moving that quote out of "Life"
        let remote = Arc::new(MockRemote::with_records(vec![record(
            5,
            "Life is what happens when you're busy making other plans.",
        )]));
        let engine = Arc::new(SyncEngine::new(
            remote,
            Arc::new(Mutex::new(book)),
            PushPolicy::BestEffort,
        ));

        let mut surface = RecordingSurface::default();
        let mut events = Vec::new();
        let _ = timeout(
            Duration::from_millis(300),
            run_display_loop(engine, Duration::from_secs(60), &mut surface, |event| {
                events.push(event.clone())
            }),
        )
        .await;

        assert_eq!(events.len(), 1);
        assert_eq!(surface.cards.len(), 2);
        assert_eq!(surface.cards[0].caption.as_deref(), Some("Category: Life"));
        assert_ne!(surface.cards[1].caption.as_deref(), Some("Category: Life"));
        assert_eq!(surface.statuses, vec![CONFLICT_MESSAGE.to_string()]);
        assert!(!surface.options.contains(&"Life".to_string()));
    }
}
