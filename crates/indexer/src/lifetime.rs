//! Lifetime vote summaries: one cumulative tally per proposal.

use alloy_primitives::{Address, U256};
use govtally_core::records::VoteSummary;
use govtally_store::{RecordStore, RecordStoreExt, StoreError};
use tracing::debug;

use crate::detail::record_voter_detail;
use crate::resolve::resolve_proposal;

/// Fold one vote into the proposal's lifetime summary and persist it.
///
/// The summary is created lazily on the first vote for the proposal; the
/// proposal back-reference is resolved only at that moment and never
/// revisited, even if the creation event is indexed later.
pub fn apply_vote<S>(
    store: &mut S,
    proposal_id: U256,
    support: u8,
    weight: U256,
    voter: Address,
    timestamp: u64,
) -> Result<VoteSummary, StoreError>
where
    S: RecordStore + ?Sized,
{
    let key = proposal_id.to_string();
    let mut summary = match store.load::<VoteSummary>(&key)? {
        Some(existing) => existing,
        None => {
            let proposal = resolve_proposal(store, proposal_id)?;
            VoteSummary::new(proposal_id, proposal)
        }
    };

    let detail_key =
        record_voter_detail(store, proposal_id, voter, weight, support, timestamp)?;
    summary.voter_details.push(detail_key);
    summary.tally.record(support, weight);
    summary.last_updated = timestamp;
    store.save(&summary)?;

    debug!(
        proposal = %proposal_id,
        total_votes = summary.tally.total_votes,
        "lifetime summary updated"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use govtally_store::MemoryStore;

    use super::*;

    #[test]
    fn test_summary_created_lazily() {
        let mut store = MemoryStore::new();
        let summary = apply_vote(
            &mut store,
            U256::from(1u64),
            1,
            U256::from(100u64),
            Address::repeat_byte(0xaa),
            1000,
        )
        .unwrap();

        assert_eq!(summary.tally.total_votes, 1);
        assert_eq!(summary.last_updated, 1000);
        assert_eq!(summary.voter_details.len(), 1);
        assert_eq!(summary.proposal, None);

        let loaded: VoteSummary = store.load("1").unwrap().unwrap();
        assert_eq!(loaded, summary);
    }

    #[test]
    fn test_counters_accumulate_across_votes() {
        let mut store = MemoryStore::new();
        let id = U256::from(1u64);
        apply_vote(&mut store, id, 1, U256::from(100u64), Address::repeat_byte(0x01), 1000)
            .unwrap();
        apply_vote(&mut store, id, 0, U256::from(50u64), Address::repeat_byte(0x02), 1050)
            .unwrap();
        let summary =
            apply_vote(&mut store, id, 2, U256::from(10u64), Address::repeat_byte(0x03), 1100)
                .unwrap();

        assert_eq!(summary.tally.total_votes, 3);
        assert_eq!(summary.tally.total_weight, U256::from(160u64));
        assert_eq!(summary.voter_details.len(), 3);
        assert_eq!(summary.last_updated, 1100);
    }
}
