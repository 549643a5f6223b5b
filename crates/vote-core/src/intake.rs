use crate::block::{now_millis, Block};
use crate::error::{IntakeError, ValidationFailure};
use crate::hasher::Fingerprint;
use crate::ledger::Ledger;
use crate::registry::VoterRegistry;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

/// Registration and vote casting over one ledger and one registry.
///
/// Casting holds the ledger write lock across the duplicate check, block
/// construction and append, so concurrent votes never link against a stale tip.
/// Reads take the read lock and see either the pre- or post-append chain.
#[derive(Debug, Default)]
pub struct Election {
    ledger: RwLock<Ledger>,
    registry: RwLock<VoterRegistry>,
}

/// Height and tip hash of the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Head {
    pub height: u64,
    pub hash: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainStatus {
    pub length: usize,
    pub failure: Option<ValidationFailure>,
}

impl Election {
    pub fn new(ledger: Ledger, registry: VoterRegistry) -> Self {
        Self {
            ledger: RwLock::new(ledger),
            registry: RwLock::new(registry),
        }
    }

    pub fn register(&self, voter_id: &str) -> Result<Fingerprint, IntakeError> {
        let voter_id = required(voter_id, "Voter ID")?;
        let fingerprint = Fingerprint::of_voter(voter_id);
        if !self.registry_mut().register(fingerprint.clone()) {
            return Err(IntakeError::AlreadyRegistered);
        }
        info!(fingerprint = %fingerprint, "voter registered");
        Ok(fingerprint)
    }

    /// Returns a copy of the appended block so callers can mirror it without
    /// holding any lock.
    pub fn cast_vote(&self, voter_id: &str, candidate: &str) -> Result<Block, IntakeError> {
        let voter_id = required(voter_id, "Voter ID")?;
        let candidate = required(candidate, "Candidate")?;
        let fingerprint = Fingerprint::of_voter(voter_id);

        if !self.registry().is_registered(&fingerprint) {
            return Err(IntakeError::NotRegistered);
        }

        let mut ledger = self.ledger_mut();
        if ledger.has_voted(&fingerprint) {
            return Err(IntakeError::DuplicateVote);
        }
        let index = ledger.len() as u64;
        let block = Block::vote(index, now_millis(), fingerprint, candidate);
        let appended = ledger.append(block)?.clone();
        drop(ledger);

        info!(index = appended.index, hash = %appended.hash, "vote recorded");
        Ok(appended)
    }

    /// The block this election's chain starts from.
    pub fn genesis(&self) -> Block {
        self.ledger().blocks()[0].clone()
    }

    pub fn head(&self) -> Head {
        let ledger = self.ledger();
        let tip = ledger.tip();
        Head {
            height: tip.index,
            hash: tip.hash.clone(),
        }
    }

    pub fn snapshot(&self) -> Vec<Block> {
        self.ledger().blocks().to_vec()
    }

    pub fn verify(&self) -> Result<(), ValidationFailure> {
        self.ledger().verify()
    }

    /// Length and verification result read under a single lock.
    pub fn status(&self) -> ChainStatus {
        let ledger = self.ledger();
        ChainStatus {
            length: ledger.len(),
            failure: ledger.verify().err(),
        }
    }

    pub fn results(&self) -> BTreeMap<String, u64> {
        self.ledger().tally()
    }

    pub fn voter_count(&self) -> usize {
        self.registry().len()
    }

    // Every critical section is panic-free, so a poisoned lock still guards a
    // consistent value.
    fn ledger(&self) -> RwLockReadGuard<'_, Ledger> {
        self.ledger.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn ledger_mut(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.ledger.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn registry(&self) -> RwLockReadGuard<'_, VoterRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn registry_mut(&self) -> RwLockWriteGuard<'_, VoterRegistry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, IntakeError> {
    if value.trim().is_empty() {
        Err(IntakeError::MissingField(field))
    } else {
        Ok(value)
    }
}
