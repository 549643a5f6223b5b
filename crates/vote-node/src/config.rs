use crate::constants::{DEFAULT_LISTEN, DEFAULT_MIRROR_PATH, DEFAULT_PUBLIC_DIR};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::{path::PathBuf, sync::Arc};
use vote_storage::{JsonFileMirror, SledMirror, VoteMirror};

#[derive(Parser, Debug, Clone)]
#[command(name = "vote-node", about = "Voting node backed by a hash-linked ledger")]
pub struct Args {
    /// Address to listen on, e.g. 127.0.0.1:3000
    #[arg(long, env = "VOTE_LISTEN", default_value = DEFAULT_LISTEN)]
    pub listen: String,

    /// Where appended blocks are mirrored
    #[arg(long, env = "VOTE_MIRROR", value_enum, default_value_t = MirrorKind::Json)]
    pub mirror: MirrorKind,

    /// JSON file (json) or data directory (sled) for the mirror
    #[arg(long, env = "VOTE_MIRROR_PATH", default_value = DEFAULT_MIRROR_PATH)]
    pub mirror_path: PathBuf,

    /// Directory holding the static voting page
    #[arg(long, env = "VOTE_PUBLIC_DIR", default_value = DEFAULT_PUBLIC_DIR)]
    pub public_dir: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MirrorKind {
    Json,
    Sled,
    None,
}

impl Args {
    pub fn open_mirror(&self) -> Result<Option<Arc<dyn VoteMirror>>> {
        Ok(match self.mirror {
            MirrorKind::Json => Some(Arc::new(JsonFileMirror::new(&self.mirror_path))),
            MirrorKind::Sled => Some(Arc::new(SledMirror::open(&self.mirror_path)?)),
            MirrorKind::None => None,
        })
    }
}
