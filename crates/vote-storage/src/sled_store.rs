use crate::VoteMirror;
use anyhow::{Context, Result};
use sled::{Db, Tree};
use std::path::Path;
use tracing::info;
use vote_core::Block;

const TREE_BLOCKS: &str = "blocks";
const KEY_TIP_INDEX: &[u8] = b"tip_index";

#[derive(Clone)]
pub struct SledMirror {
  db: Db,
  blocks: Tree,
}

impl SledMirror {
  pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
    let db = sled::open(path)?;
    let blocks = db.open_tree(TREE_BLOCKS)?;
    info!("sled mirror opened");
    Ok(Self { db, blocks })
  }

  /// Index of the last mirrored block, if any.
  pub fn tip_index(&self) -> Result<Option<u64>> {
    Ok(self.db.get(KEY_TIP_INDEX)?.map(|v| {
      let mut arr = [0u8; 8];
      arr.copy_from_slice(&v);
      u64::from_be_bytes(arr)
    }))
  }

  pub fn clear(&self) -> Result<()> {
    self.blocks.clear()?;
    self.db.remove(KEY_TIP_INDEX)?;
    self.db.flush()?;
    Ok(())
  }
}

impl VoteMirror for SledMirror {
  fn record(&self, block: &Block) -> Result<()> {
    // keyed by insertion sequence, not block index: each node run restarts at 0
    let key = self.db.generate_id()?.to_be_bytes();
    let bytes = bincode::serialize(block)?;
    self.blocks.insert(key, bytes)?;

    // update tip
    self.db.insert(KEY_TIP_INDEX, block.index.to_be_bytes().to_vec())?;

    self.db.flush()?;
    Ok(())
  }

  fn load(&self) -> Result<Vec<Block>> {
    // big-endian keys iterate in insertion order
    self
      .blocks
      .iter()
      .values()
      .map(|v| decode(&v?))
      .collect()
  }
}

fn decode(bytes: &[u8]) -> Result<Block> {
  bincode::deserialize(bytes).context("decode mirrored block")
}
