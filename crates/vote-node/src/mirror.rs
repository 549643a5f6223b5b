use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};
use vote_core::Block;
use vote_storage::VoteMirror;

/// Hands appended blocks to a background writer. Submitting never blocks and
/// never fails the caller; write errors are logged by the writer.
#[derive(Clone, Debug, Default)]
pub struct MirrorHandle {
    tx: Option<mpsc::UnboundedSender<Block>>,
}

impl MirrorHandle {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Starts the writer task. It exits once every handle has been dropped and
    /// the queue is drained.
    pub fn spawn(mirror: Arc<dyn VoteMirror>) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(mirror, rx));
        (Self { tx: Some(tx) }, writer)
    }

    pub fn submit(&self, block: Block) {
        let Some(tx) = &self.tx else { return };
        if let Err(err) = tx.send(block) {
            warn!(index = err.0.index, "mirror writer gone, block not mirrored");
        }
    }
}

async fn run_writer(mirror: Arc<dyn VoteMirror>, mut rx: mpsc::UnboundedReceiver<Block>) {
    while let Some(block) = rx.recv().await {
        let index = block.index;
        let mirror = Arc::clone(&mirror);
        match tokio::task::spawn_blocking(move || mirror.record(&block)).await {
            Ok(Ok(())) => debug!(index, "block mirrored"),
            Ok(Err(err)) => warn!(index, error = %err, "persistence write failed"),
            Err(err) => warn!(index, error = %err, "persistence writer panicked"),
        }
    }
    debug!("mirror writer stopped");
}
