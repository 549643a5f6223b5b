use crate::VoteMirror;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use vote_core::Block;

/// Mirror kept as a single pretty-printed JSON array, rewritten on each record
/// through a sibling `.json.tmp` file.
#[derive(Debug)]
pub struct JsonFileMirror {
    path: PathBuf,
    // serialises read-modify-write cycles from this process
    write_lock: Mutex<()>,
}

impl JsonFileMirror {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Block>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("parse mirror file {}", self.path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => {
                Err(err).with_context(|| format!("read mirror file {}", self.path.display()))
            }
        }
    }
}

impl VoteMirror for JsonFileMirror {
    fn record(&self, block: &Block) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // whole-array rewrite keeps the file a plain JSON array; cost grows with
        // the number of votes, which stays small for a single election
        let mut blocks = self.read_all()?;
        blocks.push(block.clone());
        let json = serde_json::to_vec_pretty(&blocks)?;
        // readers never observe a half-written array
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("write mirror file {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace mirror file {}", self.path.display()))?;
        debug!(index = block.index, path = %self.path.display(), "block mirrored");
        Ok(())
    }

    fn load(&self) -> Result<Vec<Block>> {
        self.read_all()
    }
}
