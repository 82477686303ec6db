//! Remote synchronization
//!
//! Periodic fetch + merge against a remote collection, and outbound pushes of
//! locally added quotes.

pub mod engine;
pub mod merge;
pub mod remote;
pub mod scheduler;

pub use engine::{deliver, PushOutcome, SyncEngine, SyncEvent, SyncOutcome};
pub use merge::{map_remote, merge, MergeOutcome};
pub use remote::{HttpRemote, RemoteRecord, RemoteSource, TransportError};
pub use scheduler::{run_display_loop, spawn_sync_task};
