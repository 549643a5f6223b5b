use serde::Serialize;
use thiserror::Error;

/// Why a block failed chain verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// No blocks at all.
    Empty,
    /// `index` does not match the block's position.
    IndexMismatch,
    /// Stored `hash` differs from a fresh recomputation.
    HashMismatch,
    /// `previous_hash` differs from the predecessor's stored hash.
    BrokenLink,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize)]
#[error("chain integrity broken at block {index}: {reason:?}")]
pub struct ValidationFailure {
    pub index: u64,
    pub reason: FailureReason,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("voter {0} has already voted")]
    DuplicateVote(String),
}

/// Business-rule rejections surfaced to whoever submitted the request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Voter already registered")]
    AlreadyRegistered,
    #[error("Voter not registered")]
    NotRegistered,
    #[error("Voter has already voted")]
    DuplicateVote,
}

impl From<LedgerError> for IntakeError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::DuplicateVote(_) => IntakeError::DuplicateVote,
        }
    }
}
