#![allow(dead_code)]

use std::fs;

use tempfile::{tempdir, TempDir};
use vote_core::{Block, Fingerprint, Ledger};
use vote_storage::sled_store::SledMirror;

pub fn create_temp_mirror() -> (TempDir, SledMirror) {
    // Create a temporary directory for the sled database
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().to_path_buf();
    (
        temp_dir,
        SledMirror::open(db_path).expect("Failed to open SledMirror"),
    )
}

pub fn teardown_mirror(temp_dir: TempDir, mirror: SledMirror) {
    let db_path = temp_dir.path().to_path_buf();
    mirror.clear().expect("Failed to clear the mirror");
    drop(mirror);
    temp_dir.close().expect("Failed to delete temp dir");
    let _ = fs::remove_dir_all(&db_path);
    assert!(!db_path.exists(), "Database directory should be removed");
}

/// A ledger with `votes` appended blocks, returned without its genesis.
pub fn voted_blocks(votes: usize) -> Vec<Block> {
    voted_run(votes, 1_600_000_000_000)[1..].to_vec()
}

/// Every block of one node run, genesis included, as the node mirrors them.
pub fn voted_run(votes: usize, started_at: u64) -> Vec<Block> {
    let mut ledger = Ledger::with_genesis(Block::genesis(started_at));
    for i in 0..votes {
        let candidate = if i % 3 == 0 { "Bob" } else { "Eve" };
        let block = Block::vote(
            0,
            started_at + 1 + i as u64,
            Fingerprint::of_voter(&format!("voter-{i}")),
            candidate,
        );
        ledger.append(block).expect("unique voter");
    }
    ledger.blocks().to_vec()
}
