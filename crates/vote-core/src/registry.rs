use crate::hasher::Fingerprint;
use std::collections::HashSet;

/// Fingerprints of voters eligible to cast a ballot.
#[derive(Clone, Debug, Default)]
pub struct VoterRegistry {
    voters: HashSet<Fingerprint>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_registered(&self, fingerprint: &Fingerprint) -> bool {
        self.voters.contains(fingerprint)
    }

    /// Returns false if the fingerprint was already present.
    pub fn register(&mut self, fingerprint: Fingerprint) -> bool {
        self.voters.insert(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }
}
