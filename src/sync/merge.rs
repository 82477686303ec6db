//! Merge phase
//!
//! Reconciles fetched remote quotes against the local store, using quote text
//! as identity. Two different quotes that share text collapse into one here.

use crate::quotes::QuoteStore;
use crate::sync::remote::RemoteRecord;
use crate::types::Quote;

/// Categories assigned to remote records by `id % 3`
pub const CATEGORY_ROTATION: [&str; 3] = ["Motivation", "Life", "Tech"];

pub const CONFLICT_MESSAGE: &str = "Conflicts resolved using server data.";
pub const SYNCED_MESSAGE: &str = "New quotes synced from server.";

/// Map a remote record into the local quote shape
pub fn map_remote(record: &RemoteRecord) -> Quote {
    let slot = (record.id % CATEGORY_ROTATION.len() as u64) as usize;
    Quote::new(record.title.clone(), CATEGORY_ROTATION[slot])
}

/// What a merge changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub added: usize,
    pub conflicts: usize,
}

impl MergeOutcome {
    pub fn changed(&self) -> bool {
        self.added > 0 || self.conflicts > 0
    }

    /// Notification text; conflicts take priority over additions
    pub fn status_message(&self) -> Option<&'static str> {
        if self.conflicts > 0 {
            Some(CONFLICT_MESSAGE)
        } else if self.added > 0 {
            Some(SYNCED_MESSAGE)
        } else {
            None
        }
    }
}

/// Merge `fetched` into `store`
///
/// Unknown text is staged and appended after the whole batch is processed, so
/// lookups only ever see pre-existing local records. A known text with a
/// different category is overwritten in place (server wins). Records with a
/// blank text or category never reach the store.
pub fn merge(store: &mut QuoteStore, fetched: Vec<Quote>) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    let mut staged = Vec::new();

    for remote in fetched {
        if !remote.is_complete() {
            tracing::debug!(quote = %remote, "Skipping incomplete remote quote");
            continue;
        }
        match store.find_by_text_mut(&remote.text) {
            None => staged.push(remote),
            Some(local) if local.category != remote.category => {
                tracing::debug!(
                    text = %remote.text,
                    local = %local.category,
                    server = %remote.category,
                    "Category conflict, keeping server value"
                );
                local.category = remote.category;
                outcome.conflicts += 1;
            }
            Some(_) => {}
        }
    }

    outcome.added = staged.len();
    store.append(staged);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, title: &str) -> RemoteRecord {
        RemoteRecord {
            id,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_map_remote_rotates_categories() {
        assert_eq!(map_remote(&record(3, "x")).category, "Motivation");
        assert_eq!(map_remote(&record(4, "x")).category, "Life");
        assert_eq!(map_remote(&record(5, "x")).category, "Tech");
        assert_eq!(map_remote(&record(5, "title")).text, "title");
    }

    #[test]
    fn test_merge_adds_unknown_quotes() {
        let mut store = QuoteStore::new(vec![Quote::new("local", "Life")]);
        let outcome = merge(&mut store, vec![Quote::new("remote", "Tech")]);

        assert_eq!(outcome, MergeOutcome { added: 1, conflicts: 0 });
        assert_eq!(store.quotes()[1], Quote::new("remote", "Tech"));
        assert_eq!(outcome.status_message(), Some(SYNCED_MESSAGE));
    }

    #[test]
    fn test_merge_server_wins_on_category_conflict() {
        let mut store = QuoteStore::new(vec![Quote::new("shared", "Life")]);
        let outcome = merge(&mut store, vec![Quote::new("shared", "Tech")]);

        assert_eq!(outcome, MergeOutcome { added: 0, conflicts: 1 });
        assert_eq!(store.quotes(), &[Quote::new("shared", "Tech")]);
    }

    #[test]
    fn test_conflict_message_takes_priority() {
        let mut store = QuoteStore::new(vec![Quote::new("shared", "Life")]);
        let outcome = merge(
            &mut store,
            vec![Quote::new("shared", "Tech"), Quote::new("brand new", "Life")],
        );

        assert_eq!(outcome, MergeOutcome { added: 1, conflicts: 1 });
        assert_eq!(outcome.status_message(), Some(CONFLICT_MESSAGE));
    }

    #[test]
    fn test_second_identical_merge_is_noop() {
        let mut store = QuoteStore::new(vec![Quote::new("shared", "Life")]);
        let fetched = vec![Quote::new("shared", "Tech"), Quote::new("new", "Life")];

        assert!(merge(&mut store, fetched.clone()).changed());
        let snapshot = store.clone();

        let second = merge(&mut store, fetched);
        assert!(!second.changed());
        assert_eq!(second.status_message(), None);
        assert_eq!(store, snapshot);
    }

    #[test]
    fn test_text_identity_collapses_distinct_quotes() {
        // Known quirk: only the first local record sharing the text is compared
        let mut store = QuoteStore::new(vec![
            Quote::new("same words", "Life"),
            Quote::new("same words", "Tech"),
        ]);
        let outcome = merge(&mut store, vec![Quote::new("same words", "Tech")]);

        assert_eq!(outcome.conflicts, 1);
        assert_eq!(store.quotes()[0].category, "Tech");
        assert_eq!(store.quotes()[1].category, "Tech");
    }

    #[test]
    fn test_blank_remote_titles_are_skipped() {
        let mut store = QuoteStore::new(vec![Quote::new("local", "Life")]);
        let snapshot = store.clone();
        let fetched = vec![map_remote(&record(7, "   ")), map_remote(&record(8, ""))];

        let outcome = merge(&mut store, fetched);
        assert!(!outcome.changed());
        assert_eq!(outcome.status_message(), None);
        assert_eq!(store, snapshot);
    }

    #[test]
    fn test_duplicate_new_texts_in_one_batch_are_both_staged() {
        let mut store = QuoteStore::new(vec![]);
        let outcome = merge(
            &mut store,
            vec![Quote::new("twice", "Life"), Quote::new("twice", "Life")],
        );
        assert_eq!(outcome.added, 2);
        assert_eq!(store.len(), 2);
    }
}
