pub mod json_file;
pub mod sled_store;

use anyhow::Result;
use vote_core::Block;

/// Best-effort, append-only copy of every recorded vote block.
///
/// The in-memory ledger stays the source of truth; a mirror that falls behind or
/// fails is never used to roll anything back.
pub trait VoteMirror: Send + Sync {
    fn record(&self, block: &Block) -> Result<()>;
    fn load(&self) -> Result<Vec<Block>>;
}

pub use json_file::JsonFileMirror;
pub use sled_store::SledMirror;
