//! Govtally Core
//!
//! Event and record types shared by all govtally crates: the typed governor
//! event stream, the stored entity schema, and the tally transform.

pub mod events;
pub mod records;

pub use events::{EventLocation, GovernorEvent, VoteCast, VoteCastWithParams};
pub use records::{
    DailyVoteSummary, ProposalRef, ProposalVariant, StoredRecord, Support, Tally, VoteSummary,
    VoterDetail,
};

/// Length of one UTC day bucket in seconds.
pub const SECONDS_PER_DAY: u64 = 86_400;
