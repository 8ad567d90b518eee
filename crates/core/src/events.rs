//! Typed governor event stream.
//!
//! One struct per on-chain event shape the engine consumes, with field
//! layouts matching the governor ABI one-to-one. The engine trusts its
//! inputs; no validity or eligibility checks happen here.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::records::StoredRecord;

/// Where an event landed in the chain log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLocation {
    pub block_number: u64,
    /// Block timestamp in seconds since epoch.
    pub block_timestamp: u64,
    pub tx_hash: B256,
    pub log_index: u32,
}

impl EventLocation {
    /// Globally unique event key, `{tx_hash}-{log_index}`.
    pub fn event_key(&self) -> String {
        format!("{}-{}", self.tx_hash, self.log_index)
    }
}

/// A plain `VoteCast` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteCast {
    pub voter: Address,
    pub proposal_id: U256,
    /// Support choice as emitted: 0 = against, 1 = for, 2 = abstain.
    pub support: u8,
    /// Voting power the voter contributes.
    pub weight: U256,
    pub reason: String,
    pub location: EventLocation,
}

/// A `VoteCastWithParams` event: a [`VoteCast`] plus the opaque parameter
/// payload consumed by the proposal's voting module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteCastWithParams {
    pub voter: Address,
    pub proposal_id: U256,
    pub support: u8,
    pub weight: U256,
    pub reason: String,
    pub params: Bytes,
    pub location: EventLocation,
}

/// Standard proposal creation carrying an explicit proposal type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalCreated {
    pub proposal_id: U256,
    pub proposer: Address,
    pub targets: Vec<Address>,
    pub values: Vec<U256>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<Bytes>,
    pub start_block: U256,
    pub end_block: U256,
    pub description: String,
    pub proposal_type: u8,
    pub location: EventLocation,
}

/// Modular-voting proposal creation carrying an explicit proposal type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleProposalCreated {
    pub proposal_id: U256,
    pub proposer: Address,
    pub voting_module: Address,
    pub proposal_data: Bytes,
    pub start_block: U256,
    pub end_block: U256,
    pub description: String,
    pub proposal_type: u8,
    pub location: EventLocation,
}

/// Modular-voting creation from governor versions without a type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleProposalCreatedLegacy {
    pub proposal_id: U256,
    pub proposer: Address,
    pub voting_module: Address,
    pub proposal_data: Bytes,
    pub start_block: U256,
    pub end_block: U256,
    pub description: String,
    pub location: EventLocation,
}

/// Standard creation from governor versions without a type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalCreatedLegacy {
    pub proposal_id: U256,
    pub proposer: Address,
    pub targets: Vec<Address>,
    pub values: Vec<U256>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<Bytes>,
    pub start_block: U256,
    pub end_block: U256,
    pub description: String,
    pub location: EventLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalCanceled {
    pub proposal_id: U256,
    pub location: EventLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalExecuted {
    pub proposal_id: U256,
    pub location: EventLocation,
}

/// Any governor event the engine consumes, in log order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GovernorEvent {
    VoteCast(VoteCast),
    VoteCastWithParams(VoteCastWithParams),
    ProposalCreated(ProposalCreated),
    ModuleProposalCreated(ModuleProposalCreated),
    ModuleProposalCreatedLegacy(ModuleProposalCreatedLegacy),
    ProposalCreatedLegacy(ProposalCreatedLegacy),
    ProposalCanceled(ProposalCanceled),
    ProposalExecuted(ProposalExecuted),
}

impl GovernorEvent {
    pub fn location(&self) -> &EventLocation {
        match self {
            Self::VoteCast(ev) => &ev.location,
            Self::VoteCastWithParams(ev) => &ev.location,
            Self::ProposalCreated(ev) => &ev.location,
            Self::ModuleProposalCreated(ev) => &ev.location,
            Self::ModuleProposalCreatedLegacy(ev) => &ev.location,
            Self::ProposalCreatedLegacy(ev) => &ev.location,
            Self::ProposalCanceled(ev) => &ev.location,
            Self::ProposalExecuted(ev) => &ev.location,
        }
    }
}

// Raw events are archived verbatim. Vote and lifecycle records key on the
// event's log position; creation records key on the proposal id so the
// resolver can address them (at most one creation event exists per id).

impl StoredRecord for VoteCast {
    const KIND: &'static str = "vote_cast";
    fn key(&self) -> String {
        self.location.event_key()
    }
}

impl StoredRecord for VoteCastWithParams {
    const KIND: &'static str = "vote_cast_with_params";
    fn key(&self) -> String {
        self.location.event_key()
    }
}

impl StoredRecord for ProposalCreated {
    const KIND: &'static str = "proposal_created";
    fn key(&self) -> String {
        self.proposal_id.to_string()
    }
}

impl StoredRecord for ModuleProposalCreated {
    const KIND: &'static str = "module_proposal_created";
    fn key(&self) -> String {
        self.proposal_id.to_string()
    }
}

impl StoredRecord for ModuleProposalCreatedLegacy {
    const KIND: &'static str = "module_proposal_created_legacy";
    fn key(&self) -> String {
        self.proposal_id.to_string()
    }
}

impl StoredRecord for ProposalCreatedLegacy {
    const KIND: &'static str = "proposal_created_legacy";
    fn key(&self) -> String {
        self.proposal_id.to_string()
    }
}

impl StoredRecord for ProposalCanceled {
    const KIND: &'static str = "proposal_canceled";
    fn key(&self) -> String {
        self.location.event_key()
    }
}

impl StoredRecord for ProposalExecuted {
    const KIND: &'static str = "proposal_executed";
    fn key(&self) -> String {
        self.location.event_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> EventLocation {
        EventLocation {
            block_number: 1200,
            block_timestamp: 1000,
            tx_hash: B256::repeat_byte(0xab),
            log_index: 7,
        }
    }

    #[test]
    fn test_event_key_format() {
        let key = location().event_key();
        assert_eq!(key, format!("0x{}-7", "ab".repeat(32)));
    }

    #[test]
    fn test_vote_cast_keys_on_log_position() {
        let ev = VoteCast {
            voter: Address::repeat_byte(0xaa),
            proposal_id: U256::from(1u64),
            support: 1,
            weight: U256::from(100u64),
            reason: String::new(),
            location: location(),
        };
        assert_eq!(ev.key(), ev.location.event_key());
    }

    #[test]
    fn test_creation_records_key_on_proposal_id() {
        let ev = ModuleProposalCreated {
            proposal_id: U256::from(42u64),
            proposer: Address::repeat_byte(0x01),
            voting_module: Address::repeat_byte(0x02),
            proposal_data: Bytes::from(vec![1, 2, 3]),
            start_block: U256::from(10u64),
            end_block: U256::from(20u64),
            description: "test".to_string(),
            proposal_type: 1,
            location: location(),
        };
        assert_eq!(ev.key(), "42");
    }

    #[test]
    fn test_governor_event_serde_roundtrip() {
        let ev = GovernorEvent::VoteCast(VoteCast {
            voter: Address::repeat_byte(0xaa),
            proposal_id: U256::from(7u64),
            support: 2,
            weight: U256::from(50u64),
            reason: "because".to_string(),
            location: location(),
        });
        let json = serde_json::to_string(&ev).unwrap();
        let back: GovernorEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }
}
