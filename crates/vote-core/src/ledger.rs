use crate::block::{now_millis, Block};
use crate::error::{FailureReason, LedgerError, ValidationFailure};
use crate::hasher::Fingerprint;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// In-memory, append-only vote chain. Always holds at least the genesis block.
#[derive(Clone, Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    voted: HashSet<Fingerprint>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_genesis(Block::genesis(now_millis()))
    }

    /// Seeds the ledger with a caller-built genesis. Its index, link and hash are
    /// normalised the same way `append` treats every other block.
    pub fn with_genesis(mut genesis: Block) -> Self {
        genesis.index = 0;
        genesis.previous_hash = crate::constants::GENESIS_PREVIOUS_HASH.to_string();
        genesis.reseal();
        let mut voted = HashSet::new();
        voted.insert(genesis.voter_fingerprint.clone());
        Self {
            chain: vec![genesis],
            voted,
        }
    }

    pub fn tip(&self) -> &Block {
        self.chain
            .last()
            .unwrap_or_else(|| unreachable!("ledger always holds a genesis block"))
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Never true; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.chain.get(i))
    }

    /// Links `block` onto the tip and stores it. Whatever `index`, `previous_hash`
    /// and `hash` the caller supplied are overwritten.
    pub fn append(&mut self, mut block: Block) -> Result<&Block, LedgerError> {
        if self.voted.contains(&block.voter_fingerprint) {
            return Err(LedgerError::DuplicateVote(block.voter_fingerprint.to_string()));
        }
        block.index = self.chain.len() as u64;
        block.previous_hash = self.tip().hash.clone();
        block.reseal();
        debug!(index = block.index, hash = %block.hash, "appending block");
        self.voted.insert(block.voter_fingerprint.clone());
        self.chain.push(block);
        Ok(self.tip())
    }

    pub fn has_voted(&self, fingerprint: &Fingerprint) -> bool {
        self.voted.contains(fingerprint)
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    pub fn verify(&self) -> Result<(), ValidationFailure> {
        let result = verify_chain(&self.chain);
        if let Err(failure) = &result {
            warn!(index = failure.index, reason = ?failure.reason, "ledger failed verification");
        }
        result
    }

    /// Votes per candidate, genesis excluded.
    pub fn tally(&self) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();
        for block in self.chain.iter().skip(1) {
            *counts.entry(block.candidate.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Full-chain scan: `blocks[0]` must sit at index 0, and every later block must
/// carry its position as index, a hash matching its fields, and a link to its
/// predecessor's stored hash. Reports the first block that fails.
pub fn verify_chain(blocks: &[Block]) -> Result<(), ValidationFailure> {
    let first = blocks.first().ok_or(ValidationFailure {
        index: 0,
        reason: FailureReason::Empty,
    })?;
    if first.index != 0 {
        return Err(ValidationFailure {
            index: 0,
            reason: FailureReason::IndexMismatch,
        });
    }
    check_links(blocks)
}

/// Checks a detached run of blocks, such as a mirror snapshot that starts after
/// genesis. The first block's `previous_hash` is taken on trust, but its hash is
/// still recomputed.
pub fn verify_segment(blocks: &[Block]) -> Result<(), ValidationFailure> {
    let first = blocks.first().ok_or(ValidationFailure {
        index: 0,
        reason: FailureReason::Empty,
    })?;
    if !first.is_sealed() {
        return Err(ValidationFailure {
            index: first.index,
            reason: FailureReason::HashMismatch,
        });
    }
    check_links(blocks)
}

/// Splits a mirror snapshot into one slice per node run. Every run after the
/// first starts at a genesis record; a leading slice without one is returned
/// as-is.
pub fn split_runs(blocks: &[Block]) -> Vec<&[Block]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for (i, block) in blocks.iter().enumerate() {
        if block.is_genesis() && i > start {
            runs.push(&blocks[start..i]);
            start = i;
        }
    }
    if start < blocks.len() {
        runs.push(&blocks[start..]);
    }
    runs
}

fn check_links(blocks: &[Block]) -> Result<(), ValidationFailure> {
    for pair in blocks.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);
        let fail = |reason| ValidationFailure {
            index: current.index,
            reason,
        };
        if prev.index.checked_add(1) != Some(current.index) {
            return Err(fail(FailureReason::IndexMismatch));
        }
        if !current.is_sealed() {
            return Err(fail(FailureReason::HashMismatch));
        }
        if current.previous_hash != prev.hash {
            return Err(fail(FailureReason::BrokenLink));
        }
    }
    Ok(())
}
