//! Daily vote summaries, bucketed by UTC day.

use alloy_primitives::U256;
use chrono::{LocalResult, TimeZone, Utc};
use govtally_core::records::DailyVoteSummary;
use govtally_core::SECONDS_PER_DAY;
use govtally_store::{RecordStore, RecordStoreExt, StoreError};
use tracing::debug;

use crate::resolve::resolve_proposal;

/// Truncate a timestamp to the start of its UTC day bucket.
pub fn day_start(timestamp: u64) -> u64 {
    (timestamp / SECONDS_PER_DAY) * SECONDS_PER_DAY
}

/// Render the display date for a day-bucket start.
pub fn day_string(day_start: u64) -> String {
    match Utc.timestamp_opt(day_start as i64, 0) {
        LocalResult::Single(dt) => dt.format("%Y-%m-%d").to_string(),
        _ => day_start.to_string(),
    }
}

/// Fold one vote into the proposal's bucket for the event's day.
///
/// Buckets are addressed purely by the computed day start: no ordering is
/// assumed across calls, and a late event for an already-passed day lands in
/// (and re-opens) the historical bucket instead of being rejected.
pub fn apply_vote<S>(
    store: &mut S,
    proposal_id: U256,
    support: u8,
    weight: U256,
    timestamp: u64,
) -> Result<DailyVoteSummary, StoreError>
where
    S: RecordStore + ?Sized,
{
    let day = day_start(timestamp);
    let key = DailyVoteSummary::key_for(proposal_id, day);
    let mut summary = match store.load::<DailyVoteSummary>(&key)? {
        Some(existing) => existing,
        None => {
            let proposal = resolve_proposal(store, proposal_id)?;
            DailyVoteSummary::new(proposal_id, day, day_string(day), proposal)
        }
    };

    summary.tally.record(support, weight);
    store.save(&summary)?;

    debug!(
        proposal = %proposal_id,
        day,
        total_votes = summary.tally.total_votes,
        "daily summary updated"
    );
    Ok(summary)
}
