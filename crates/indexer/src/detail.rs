//! Voter detail records: one immutable entry per vote event.

use alloy_primitives::{Address, U256};
use govtally_core::records::{StoredRecord, VoterDetail};
use govtally_store::{RecordStore, RecordStoreExt, StoreError};
use tracing::debug;

/// Persist the voter-detail record for one vote and return its key.
///
/// The write is an unconditional upsert: a second event with the same
/// proposal, voter, and timestamp overwrites the first instead of
/// duplicating it. The key space is expected to disambiguate real events.
pub fn record_voter_detail<S>(
    store: &mut S,
    proposal_id: U256,
    voter: Address,
    weight: U256,
    support: u8,
    timestamp: u64,
) -> Result<String, StoreError>
where
    S: RecordStore + ?Sized,
{
    let detail = VoterDetail {
        voter,
        proposal_id,
        voting_power: weight,
        support,
        timestamp,
    };
    store.save(&detail)?;
    let key = detail.key();
    debug!(key = %key, "voter detail recorded");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use govtally_store::MemoryStore;

    use super::*;

    #[test]
    fn test_record_returns_loadable_key() {
        let mut store = MemoryStore::new();
        let key = record_voter_detail(
            &mut store,
            U256::from(1u64),
            Address::repeat_byte(0xaa),
            U256::from(100u64),
            1,
            1000,
        )
        .unwrap();

        let detail: VoterDetail = store.load(&key).unwrap().unwrap();
        assert_eq!(detail.proposal_id, U256::from(1u64));
        assert_eq!(detail.voting_power, U256::from(100u64));
        assert_eq!(detail.support, 1);
        assert_eq!(detail.timestamp, 1000);
    }

    #[test]
    fn test_identical_key_overwrites() {
        let mut store = MemoryStore::new();
        let voter = Address::repeat_byte(0xaa);

        let first = record_voter_detail(&mut store, U256::from(1u64), voter, U256::from(10u64), 0, 5)
            .unwrap();
        let second =
            record_voter_detail(&mut store, U256::from(1u64), voter, U256::from(99u64), 1, 5)
                .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.count_kind(VoterDetail::KIND), 1);
        let detail: VoterDetail = store.load(&second).unwrap().unwrap();
        assert_eq!(detail.voting_power, U256::from(99u64));
    }
}
