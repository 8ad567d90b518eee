//! Stored entity schema: summaries, voter details, and proposal references.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::events;

/// Common contract for records persisted to the record store.
///
/// Each entity names the kind (namespace) it is stored under and derives its
/// own key; the store addresses records by the (kind, key) pair.
pub trait StoredRecord {
    /// Namespace the record is stored under.
    const KIND: &'static str;
    /// Storage key within the namespace.
    fn key(&self) -> String;
}

/// A voter's stance on a proposal, as encoded in the `support` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Support {
    Against = 0,
    For = 1,
    Abstain = 2,
}

impl Support {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Against),
            1 => Some(Self::For),
            2 => Some(Self::Abstain),
            _ => None,
        }
    }
}

/// Which creation-event shape backs a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalVariant {
    Standard,
    Module,
    ModuleLegacy,
    StandardLegacy,
}

impl ProposalVariant {
    /// Store kind the variant's creation records live under.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Standard => events::ProposalCreated::KIND,
            Self::Module => events::ModuleProposalCreated::KIND,
            Self::ModuleLegacy => events::ModuleProposalCreatedLegacy::KIND,
            Self::StandardLegacy => events::ProposalCreatedLegacy::KIND,
        }
    }
}

/// Reference from a summary to the creation record backing its proposal.
///
/// Captured once, when the summary is first created; never re-resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRef {
    pub variant: ProposalVariant,
    /// Storage key of the creation record (the proposal id in string form).
    pub key: String,
}

/// Running vote counters shared by the lifetime and daily summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub total_votes: u64,
    pub total_weight: U256,
    pub votes_for: u64,
    pub votes_against: u64,
    pub votes_abstain: u64,
    pub weight_for: U256,
    pub weight_against: U256,
    pub weight_abstain: U256,
    /// Share of votes per choice on a vote-count basis, 0..=100.
    pub percent_for: f64,
    pub percent_against: f64,
    pub percent_abstain: f64,
}

impl Tally {
    /// Fold one vote into the counters and refresh the percentages.
    ///
    /// A support value outside 0..=2 moves the totals but lands in no
    /// per-choice bucket.
    pub fn record(&mut self, support: u8, weight: U256) {
        self.total_votes += 1;
        self.total_weight += weight;
        match Support::from_u8(support) {
            Some(Support::Against) => {
                self.votes_against += 1;
                self.weight_against += weight;
            }
            Some(Support::For) => {
                self.votes_for += 1;
                self.weight_for += weight;
            }
            Some(Support::Abstain) => {
                self.votes_abstain += 1;
                self.weight_abstain += weight;
            }
            None => {}
        }
        self.recompute_percentages();
    }

    fn recompute_percentages(&mut self) {
        self.percent_for = percent(self.votes_for, self.total_votes);
        self.percent_against = percent(self.votes_against, self.total_votes);
        self.percent_abstain = percent(self.votes_abstain, self.total_votes);
    }
}

fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Lifetime vote tally for one proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteSummary {
    pub proposal_id: U256,
    pub tally: Tally,
    /// Timestamp of the most recent vote folded in.
    pub last_updated: u64,
    /// Keys of the voter-detail records, in arrival order.
    pub voter_details: Vec<String>,
    /// Creation record found when the summary was first created, if any.
    pub proposal: Option<ProposalRef>,
}

impl VoteSummary {
    /// Fresh summary with zeroed counters.
    pub fn new(proposal_id: U256, proposal: Option<ProposalRef>) -> Self {
        Self {
            proposal_id,
            tally: Tally::default(),
            last_updated: 0,
            voter_details: Vec::new(),
            proposal,
        }
    }
}

impl StoredRecord for VoteSummary {
    const KIND: &'static str = "vote_summary";
    fn key(&self) -> String {
        self.proposal_id.to_string()
    }
}

/// Vote tally for one proposal scoped to one UTC day bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVoteSummary {
    pub proposal_id: U256,
    /// Start of the day bucket; always a multiple of 86400.
    pub day_start: u64,
    /// Display date for the bucket, `YYYY-MM-DD` in UTC.
    pub date: String,
    pub tally: Tally,
    /// Creation record found when this bucket was first created, if any.
    pub proposal: Option<ProposalRef>,
}

impl DailyVoteSummary {
    pub fn new(
        proposal_id: U256,
        day_start: u64,
        date: String,
        proposal: Option<ProposalRef>,
    ) -> Self {
        Self {
            proposal_id,
            day_start,
            date,
            tally: Tally::default(),
            proposal,
        }
    }

    /// Composite key, `{proposal_id}-{day_start}`.
    pub fn key_for(proposal_id: U256, day_start: u64) -> String {
        format!("{proposal_id}-{day_start}")
    }
}

impl StoredRecord for DailyVoteSummary {
    const KIND: &'static str = "daily_vote_summary";
    fn key(&self) -> String {
        Self::key_for(self.proposal_id, self.day_start)
    }
}

/// One voter's contribution to one proposal at one timestamp.
///
/// Immutable once written; a replayed event with the same key overwrites
/// rather than duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoterDetail {
    pub voter: Address,
    pub proposal_id: U256,
    pub voting_power: U256,
    pub support: u8,
    pub timestamp: u64,
}

impl VoterDetail {
    /// Composite key, `{proposal_id}-0x{voter_hex}-{timestamp}`.
    pub fn key_for(proposal_id: U256, voter: Address, timestamp: u64) -> String {
        format!("{proposal_id}-0x{}-{timestamp}", hex::encode(voter.as_slice()))
    }
}

impl StoredRecord for VoterDetail {
    const KIND: &'static str = "voter_detail";
    fn key(&self) -> String {
        Self::key_for(self.proposal_id, self.voter, self.timestamp)
    }
}
