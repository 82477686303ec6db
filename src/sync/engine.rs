//! Sync engine
//!
//! Fetches remote records, merges them into the shared quote book and
//! reports each run as a [`SyncEvent`]. Also pushes locally added quotes.

use std::sync::Arc;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::quotes::{QuoteBook, RenderSurface};
use crate::storage::settings::PushPolicy;
use crate::sync::merge::{map_remote, MergeOutcome};
use crate::sync::remote::{RemoteSource, TransportError};
use crate::types::Quote;

pub const PUSH_FAILED_MESSAGE: &str = "Failed to post quote to server.";

/// Result of one sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Merged(MergeOutcome),
    /// Transport or persistence failure; the next tick is the retry
    Failed(String),
}

/// A completed sync run, consumed by the display layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEvent {
    pub outcome: SyncOutcome,
    pub at: DateTime<Utc>,
}

impl SyncEvent {
    fn new(outcome: SyncOutcome) -> Self {
        Self {
            outcome,
            at: Utc::now(),
        }
    }

    /// Whether the store changed and the display must be refreshed
    pub fn changed(&self) -> bool {
        matches!(&self.outcome, SyncOutcome::Merged(merge) if merge.changed())
    }

    pub fn status_message(&self) -> Option<String> {
        match &self.outcome {
            SyncOutcome::Merged(merge) => merge.status_message().map(str::to_string),
            SyncOutcome::Failed(reason) => Some(format!("Sync failed: {reason}")),
        }
    }
}

/// Result of pushing one quote outward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Delivered,
    Failed(String),
}

impl PushOutcome {
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            PushOutcome::Delivered => None,
            PushOutcome::Failed(_) => Some(PUSH_FAILED_MESSAGE),
        }
    }
}

pub struct SyncEngine {
    remote: Arc<dyn RemoteSource>,
    book: Arc<Mutex<QuoteBook>>,
    push_policy: PushPolicy,
    retry_delay: Duration,
}

impl SyncEngine {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        book: Arc<Mutex<QuoteBook>>,
        push_policy: PushPolicy,
    ) -> Self {
        Self {
            remote,
            book,
            push_policy,
            retry_delay: Duration::from_millis(500),
        }
    }

    /// Base delay between push retries
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn book(&self) -> &Arc<Mutex<QuoteBook>> {
        &self.book
    }

    /// Run one fetch + merge cycle
    ///
    /// The book is only locked for the merge, never across the fetch.
    pub async fn sync_once(&self) -> SyncEvent {
        let records = match self.remote.fetch().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Sync fetch failed");
                return SyncEvent::new(SyncOutcome::Failed(e.to_string()));
            }
        };

        let fetched: Vec<Quote> = records.iter().map(map_remote).collect();
        let mut book = self.book.lock().await;

        match book.apply_remote(fetched) {
            Ok(merge) => {
                if merge.changed() {
                    tracing::info!(added = merge.added, conflicts = merge.conflicts, "Sync merged remote quotes");
                } else {
                    tracing::debug!("Sync found nothing new");
                }
                SyncEvent::new(SyncOutcome::Merged(merge))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist merged quotes");
                SyncEvent::new(SyncOutcome::Failed(e.to_string()))
            }
        }
    }

    /// Send a locally added quote to the remote according to the push policy
    pub async fn push(&self, quote: &Quote) -> PushOutcome {
        let result = match self.push_policy {
            PushPolicy::BestEffort => self.remote.push(quote).await,
            PushPolicy::Retry { max_attempts } => {
                let backoff = ExponentialBuilder::default()
                    .with_min_delay(self.retry_delay)
                    .with_max_delay(self.retry_delay * 4)
                    .with_max_times(max_attempts.saturating_sub(1) as usize);

                (|| self.remote.push(quote))
                    .retry(backoff)
                    .notify(|e: &TransportError, delay: Duration| {
                        tracing::debug!(error = %e, ?delay, "Retrying quote push");
                    })
                    .await
            }
        };

        match result {
            Ok(()) => {
                tracing::info!("Quote posted to remote");
                PushOutcome::Delivered
            }
            Err(e) => {
                tracing::warn!(error = %e, "Quote push failed");
                PushOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Apply a sync event to the display: refresh on change, then post its status
pub fn deliver(event: &SyncEvent, book: &mut QuoteBook, surface: &mut dyn RenderSurface) {
    if event.changed() {
        book.refresh(surface);
    }
    if let Some(message) = event.status_message() {
        surface.show_status(message);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::quotes::book::tests::{open_book, RecordingSurface};
    use crate::storage::{KeyValueStore, QUOTES_KEY};
    use crate::sync::merge::{CONFLICT_MESSAGE, SYNCED_MESSAGE};
    use crate::sync::remote::RemoteRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    pub(crate) struct MockRemote {
        pub records: std::sync::Mutex<Vec<RemoteRecord>>,
        pub fail_fetch: bool,
        pub push_failures: AtomicU32,
        pub pushed: std::sync::Mutex<Vec<Quote>>,
        pub push_attempts: AtomicU32,
    }

    impl MockRemote {
        pub(crate) fn with_records(records: Vec<RemoteRecord>) -> Self {
            Self {
                records: std::sync::Mutex::new(records),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl RemoteSource for MockRemote {
        async fn fetch(&self) -> Result<Vec<RemoteRecord>, TransportError> {
            if self.fail_fetch {
                return Err(TransportError::Status(503));
            }
            Ok(self.records.lock().unwrap().clone())
        }

        async fn push(&self, quote: &Quote) -> Result<(), TransportError> {
            self.push_attempts.fetch_add(1, Ordering::SeqCst);
            let remaining = self.push_failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.push_failures.store(remaining - 1, Ordering::SeqCst);
                return Err(TransportError::Status(500));
            }
            self.pushed.lock().unwrap().push(quote.clone());
            Ok(())
        }
    }

    pub(crate) fn record(id: u64, title: &str) -> RemoteRecord {
        RemoteRecord {
            id,
            title: title.to_string(),
        }
    }

    fn engine(remote: MockRemote, policy: PushPolicy) -> (SyncEngine, Arc<MockRemote>) {
        let (book, _) = open_book();
        let remote = Arc::new(remote);
        let engine = SyncEngine::new(remote.clone(), Arc::new(Mutex::new(book)), policy)
            .with_retry_delay(Duration::from_millis(5));
        (engine, remote)
    }

    #[tokio::test]
    async fn test_sync_adds_new_quotes() {
        let remote = MockRemote::with_records(vec![record(1, "remote one"), record(2, "remote two")]);
        let (engine, _) = engine(remote, PushPolicy::BestEffort);

        let event = engine.sync_once().await;
        assert_eq!(
            event.outcome,
            SyncOutcome::Merged(MergeOutcome { added: 2, conflicts: 0 })
        );
        assert_eq!(event.status_message().as_deref(), Some(SYNCED_MESSAGE));
        assert_eq!(engine.book().lock().await.store().len(), 5);
    }

    #[tokio::test]
    async fn test_second_identical_sync_is_silent() {
        let (book, mut durable) = open_book();
        let remote = Arc::new(MockRemote::with_records(vec![record(1, "remote one")]));
        let engine = SyncEngine::new(remote, Arc::new(Mutex::new(book)), PushPolicy::BestEffort);

        assert!(engine.sync_once().await.changed());
        assert!(durable.get(QUOTES_KEY).unwrap().is_some());
        durable.remove(QUOTES_KEY).unwrap();

        let second = engine.sync_once().await;
        assert!(!second.changed());
        assert_eq!(second.status_message(), None);
        assert!(durable.get(QUOTES_KEY).unwrap().is_none());

        let mut surface = RecordingSurface::default();
        deliver(&second, &mut *engine.book().lock().await, &mut surface);
        assert!(surface.cards.is_empty());
        assert!(surface.statuses.is_empty());
    }

    #[tokio::test]
    async fn test_sync_conflict_message_wins() {
        // id 5 maps to "Tech"; the seed has this text under "Life"
        let remote = MockRemote::with_records(vec![
            record(5, "Life is what happens when you're busy making other plans."),
            record(6, "fresh"),
        ]);
        let (engine, _) = engine(remote, PushPolicy::BestEffort);

        let event = engine.sync_once().await;
        assert_eq!(event.status_message().as_deref(), Some(CONFLICT_MESSAGE));

        let book = engine.book().lock().await;
        assert_eq!(book.store().quotes()[1].category, "Tech");
        assert_eq!(book.store().len(), 4);
        assert!(!book.categories().categories().contains(&"Life".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported_not_fatal() {
        let remote = MockRemote {
            fail_fetch: true,
            ..MockRemote::default()
        };
        let (engine, _) = engine(remote, PushPolicy::BestEffort);

        let event = engine.sync_once().await;
        assert!(matches!(event.outcome, SyncOutcome::Failed(_)));
        assert!(!event.changed());
        assert!(event.status_message().unwrap().starts_with("Sync failed"));
        assert_eq!(engine.book().lock().await.store().len(), 3);
    }

    #[tokio::test]
    async fn test_best_effort_push_reports_failure() {
        let remote = MockRemote::default();
        remote.push_failures.store(1, Ordering::SeqCst);
        let (engine, remote) = engine(remote, PushPolicy::BestEffort);

        let outcome = engine.push(&Quote::new("x", "y")).await;
        assert_eq!(outcome.status_message(), Some(PUSH_FAILED_MESSAGE));
        assert_eq!(remote.push_attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_push_recovers() {
        let remote = MockRemote::default();
        remote.push_failures.store(2, Ordering::SeqCst);
        let (engine, remote) = engine(remote, PushPolicy::Retry { max_attempts: 3 });

        let outcome = engine.push(&Quote::new("x", "y")).await;
        assert_eq!(outcome, PushOutcome::Delivered);
        assert_eq!(remote.push_attempts.load(Ordering::SeqCst), 3);
        assert_eq!(remote.pushed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_retry_push_gives_up() {
        let remote = MockRemote::default();
        remote.push_failures.store(10, Ordering::SeqCst);
        let (engine, remote) = engine(remote, PushPolicy::Retry { max_attempts: 2 });

        let outcome = engine.push(&Quote::new("x", "y")).await;
        assert!(matches!(outcome, PushOutcome::Failed(_)));
        assert_eq!(remote.push_attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_local_add_survives_failed_push() {
        let remote = MockRemote::default();
        remote.push_failures.store(1, Ordering::SeqCst);
        let (engine, _) = engine(remote, PushPolicy::BestEffort);

        let quote = engine.book().lock().await.add_quote("Kept", "Local").unwrap();
        let outcome = engine.push(&quote).await;

        assert!(matches!(outcome, PushOutcome::Failed(_)));
        assert_eq!(engine.book().lock().await.store().len(), 4);
    }

    #[test]
    fn test_deliver_refreshes_only_on_change() {
        let (mut book, durable) = open_book();
        let mut surface = RecordingSurface::default();

        let quiet = SyncEvent::new(SyncOutcome::Merged(MergeOutcome::default()));
        deliver(&quiet, &mut book, &mut surface);
        assert!(surface.cards.is_empty());
        assert!(surface.statuses.is_empty());
        assert!(durable.get(QUOTES_KEY).unwrap().is_none());

        let synced = SyncEvent::new(SyncOutcome::Merged(MergeOutcome { added: 1, conflicts: 0 }));
        deliver(&synced, &mut book, &mut surface);
        assert_eq!(surface.cards.len(), 1);
        assert_eq!(surface.statuses, vec![SYNCED_MESSAGE.to_string()]);
    }
}
