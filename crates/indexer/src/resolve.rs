//! Polymorphic proposal resolution.
//!
//! A proposal was created under exactly one of four structurally different
//! event shapes; summaries link back to whichever one exists.

use alloy_primitives::U256;
use govtally_core::records::{ProposalRef, ProposalVariant};
use govtally_store::{RecordStore, StoreError};

/// Probe order when resolving a proposal id to its creation record.
const RESOLUTION_ORDER: [ProposalVariant; 4] = [
    ProposalVariant::Standard,
    ProposalVariant::Module,
    ProposalVariant::ModuleLegacy,
    ProposalVariant::StandardLegacy,
];

/// Find the creation record for a proposal, trying each shape in priority
/// order.
///
/// Votes can arrive (or be reprocessed) before the creation event has been
/// indexed, so a miss is a normal outcome, returned as `Ok(None)`.
pub fn resolve_proposal<S>(
    store: &S,
    proposal_id: U256,
) -> Result<Option<ProposalRef>, StoreError>
where
    S: RecordStore + ?Sized,
{
    let key = proposal_id.to_string();
    for variant in RESOLUTION_ORDER {
        if store.contains(variant.kind(), &key)? {
            return Ok(Some(ProposalRef { variant, key }));
        }
    }
    Ok(None)
}
