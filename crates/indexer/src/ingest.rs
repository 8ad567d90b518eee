//! Vote ingestion driver.
//!
//! Processes one governor event at a time: archives the raw record, then
//! folds vote events into the lifetime summary and the daily summary, in
//! that fixed order. Each event is fully aggregated and persisted before
//! the next one is considered.

use alloy_primitives::{Address, U256};
use govtally_core::events::{EventLocation, GovernorEvent};
use govtally_store::RecordStore;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::archive::archive_event;
use crate::{daily, lifetime, IndexError};

/// Marker kind for already-aggregated vote events (replay dedup only).
const PROCESSED_KIND: &str = "processed_vote";

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Skip re-aggregating a vote event whose log position was already
    /// processed. Off by default: with exactly-once delivery from the host
    /// the marker is pure overhead, and replayed events then double-count,
    /// matching historical deployments.
    pub dedup_replays: bool,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            dedup_replays: false,
        }
    }
}

/// A serialized governor event handed over from the host pipeline.
#[derive(Debug, Clone)]
pub struct EventMessage {
    pub data: Vec<u8>,
}

/// Processes governor events against a record store.
pub struct Indexer<S> {
    store: S,
    config: IndexerConfig,
}

impl<S: RecordStore> Indexer<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, IndexerConfig::default())
    }

    pub fn with_config(store: S, config: IndexerConfig) -> Self {
        Self { store, config }
    }

    /// The underlying store, for queries.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Process one governor event.
    ///
    /// A storage failure aborts the current event and propagates; the host
    /// decides whether to re-run the whole event.
    pub fn ingest(&mut self, event: &GovernorEvent) -> Result<(), IndexError> {
        archive_event(&mut self.store, event)?;

        match event {
            GovernorEvent::VoteCast(ev) => {
                self.aggregate_vote(ev.proposal_id, ev.support, ev.weight, ev.voter, &ev.location)
            }
            GovernorEvent::VoteCastWithParams(ev) => {
                self.aggregate_vote(ev.proposal_id, ev.support, ev.weight, ev.voter, &ev.location)
            }
            _ => Ok(()),
        }
    }

    /// Lifetime summary first, daily summary second. Both are read-modify-
    /// write against the latest persisted state.
    fn aggregate_vote(
        &mut self,
        proposal_id: U256,
        support: u8,
        weight: U256,
        voter: Address,
        location: &EventLocation,
    ) -> Result<(), IndexError> {
        if self.config.dedup_replays {
            let event_key = location.event_key();
            if self.store.contains(PROCESSED_KIND, &event_key)? {
                warn!(event = %event_key, "vote event replayed, skipping aggregation");
                return Ok(());
            }
        }

        let timestamp = location.block_timestamp;
        lifetime::apply_vote(&mut self.store, proposal_id, support, weight, voter, timestamp)?;
        daily::apply_vote(&mut self.store, proposal_id, support, weight, timestamp)?;

        if self.config.dedup_replays {
            self.store.put(PROCESSED_KIND, &location.event_key(), &[1])?;
        }

        debug!(proposal = %proposal_id, "vote aggregated");
        Ok(())
    }

    /// Decode and ingest one serialized event from the host pipeline.
    pub fn process_event_message(&mut self, data: &[u8]) -> Result<(), IndexError> {
        let event: GovernorEvent =
            bincode::deserialize(data).map_err(|e| IndexError::Decode(e.to_string()))?;
        self.ingest(&event)
    }

    /// Drain all queued event messages without blocking. Returns how many
    /// events were ingested; undecodable or failed messages are logged and
    /// dropped.
    pub fn drain_channel(&mut self, rx: &mut mpsc::Receiver<EventMessage>) -> usize {
        let mut ingested = 0;
        while let Ok(msg) = rx.try_recv() {
            match self.process_event_message(&msg.data) {
                Ok(()) => ingested += 1,
                Err(e) => warn!(error = %e, "dropping event message"),
            }
        }
        ingested
    }
}
