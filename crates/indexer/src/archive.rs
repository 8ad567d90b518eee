//! Verbatim archival of raw governor events.
//!
//! These handlers copy events one-to-one into stored records and hold no
//! aggregation logic. Vote and lifecycle records key on the event's log
//! position; creation records key on the proposal id so the resolver can
//! address them.

use govtally_core::events::GovernorEvent;
use govtally_store::{RecordStore, RecordStoreExt, StoreError};
use tracing::debug;

/// Persist the raw record for any governor event.
pub fn archive_event<S>(store: &mut S, event: &GovernorEvent) -> Result<(), StoreError>
where
    S: RecordStore + ?Sized,
{
    match event {
        GovernorEvent::VoteCast(ev) => store.save(ev),
        GovernorEvent::VoteCastWithParams(ev) => store.save(ev),
        GovernorEvent::ProposalCreated(ev) => store.save(ev),
        GovernorEvent::ModuleProposalCreated(ev) => store.save(ev),
        GovernorEvent::ModuleProposalCreatedLegacy(ev) => store.save(ev),
        GovernorEvent::ProposalCreatedLegacy(ev) => store.save(ev),
        GovernorEvent::ProposalCanceled(ev) => store.save(ev),
        GovernorEvent::ProposalExecuted(ev) => store.save(ev),
    }?;
    debug!(event = %event.location().event_key(), "raw event archived");
    Ok(())
}
