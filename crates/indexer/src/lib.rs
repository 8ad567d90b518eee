//! Govtally Indexer
//!
//! The vote aggregation engine: folds governor voting events into a lifetime
//! summary per proposal, a daily summary per (proposal, UTC day), and an
//! append-only voter-detail log, all persisted through a
//! [`RecordStore`](govtally_store::RecordStore).
//!
//! Processing is synchronous and event-at-a-time. The engine assumes the
//! host pipeline serializes calls; it holds no locks of its own, and storage
//! failures propagate to the caller, which owns retry policy.

pub mod archive;
pub mod daily;
pub mod detail;
pub mod ingest;
pub mod lifetime;
pub mod resolve;

pub use ingest::{EventMessage, Indexer, IndexerConfig};
pub use resolve::resolve_proposal;

use govtally_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("event decode error: {0}")]
    Decode(String),
}
