use crate::constants::{GENESIS_CANDIDATE, GENESIS_FINGERPRINT, GENESIS_INDEX, GENESIS_PREVIOUS_HASH};
use crate::hasher::{digest, Fingerprint};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch. A clock set before 1970 reads as 0.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// One cast vote, or the genesis marker at index 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: u64,
    pub voter_fingerprint: Fingerprint,
    pub candidate: String,
    pub previous_hash: String,
    pub hash: String,
}

impl Block {
    pub fn new(
        index: u64,
        timestamp: u64,
        voter_fingerprint: Fingerprint,
        candidate: impl Into<String>,
        previous_hash: impl Into<String>,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp,
            voter_fingerprint,
            candidate: candidate.into(),
            previous_hash: previous_hash.into(),
            hash: String::new(),
        };
        block.hash = block.calculate_hash();
        block
    }

    /// A vote block not yet linked to any chain. The ledger sets the real
    /// `previous_hash` (and re-seals) when it is appended.
    pub fn vote(
        index: u64,
        timestamp: u64,
        voter_fingerprint: Fingerprint,
        candidate: impl Into<String>,
    ) -> Self {
        Self::new(
            index,
            timestamp,
            voter_fingerprint,
            candidate,
            GENESIS_PREVIOUS_HASH,
        )
    }

    pub fn genesis(timestamp: u64) -> Self {
        Self::new(
            GENESIS_INDEX,
            timestamp,
            Fingerprint::from_hex(GENESIS_FINGERPRINT),
            GENESIS_CANDIDATE,
            GENESIS_PREVIOUS_HASH,
        )
    }

    /// Hash over `index, previous_hash, timestamp, voter_fingerprint, candidate`
    /// in that order. Pure: reads only the fields, never `self.hash`.
    pub fn calculate_hash(&self) -> String {
        let index = self.index.to_string();
        let timestamp = self.timestamp.to_string();
        digest(&[
            &index,
            &self.previous_hash,
            &timestamp,
            self.voter_fingerprint.as_str(),
            &self.candidate,
        ])
    }

    /// Whether the stored hash still matches the fields.
    pub fn is_sealed(&self) -> bool {
        self.hash == self.calculate_hash()
    }

    pub(crate) fn reseal(&mut self) {
        self.hash = self.calculate_hash();
    }

    pub fn is_genesis(&self) -> bool {
        self.index == GENESIS_INDEX
    }
}
