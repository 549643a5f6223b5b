use anyhow::Context;
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, Level};
use vote_core::Election;
use vote_node::{router, AppState, Args, MirrorHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let (mirror, writer) = match args.open_mirror()? {
        Some(mirror) => {
            info!(kind = ?args.mirror, path = %args.mirror_path.display(), "mirroring votes");
            let (handle, writer) = MirrorHandle::spawn(mirror);
            (handle, Some(writer))
        }
        None => (MirrorHandle::disabled(), None),
    };

    let state = AppState::new(Arc::new(Election::default()), mirror);
    let app = router(state, &args.public_dir);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("invalid listen address {}", args.listen))?;
    info!("vote-node listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown requested");
        })
        .await?;

    // router and its state are gone; let the writer drain what is queued
    if let Some(writer) = writer {
        writer.await?;
    }
    Ok(())
}
