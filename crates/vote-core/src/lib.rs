//! Tamper-evident vote ledger: hash-linked blocks, one vote per registered voter.

pub mod block;
pub mod constants;
pub mod error;
pub mod hasher;
pub mod intake;
pub mod ledger;
pub mod registry;

pub use block::{now_millis, Block};
pub use error::{FailureReason, IntakeError, LedgerError, ValidationFailure};
pub use hasher::{digest, Fingerprint};
pub use intake::{ChainStatus, Election, Head};
pub use ledger::{split_runs, verify_chain, verify_segment, Ledger};
pub use registry::VoterRegistry;
