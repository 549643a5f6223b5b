use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};
use vote_core::{split_runs, verify_chain, verify_segment, Block};
use vote_storage::{JsonFileMirror, SledMirror, VoteMirror};

#[derive(Parser, Debug)]
#[command(name = "vote-cli")]
#[command(about = "CLI client for the voting node")]
struct Cli {
    /// Node base URL (e.g. http://127.0.0.1:3000)
    #[arg(long, global = true, env = "VOTE_NODE", default_value = "http://127.0.0.1:3000")]
    node: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a voter
    Register {
        #[arg(long)]
        voter_id: String,
    },
    /// Cast a vote
    Vote {
        #[arg(long)]
        voter_id: String,
        #[arg(long)]
        candidate: String,
    },
    /// Show votes per candidate
    Results,
    /// Ask the node to verify its chain
    Verify,
    /// Dump every block
    Chain,
    /// Verify a mirror snapshot offline
    Audit {
        /// JSON file or sled directory written by the node
        #[arg(long, default_value = "votes.json")]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Json,
    Sled,
}

#[derive(Serialize)]
struct RegisterReq {
    voter_id: String,
}

#[derive(Serialize)]
struct VoteReq {
    voter_id: String,
    candidate: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .pretty()
        .init();

    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let node = cli.node.trim_end_matches('/');
    match cli.cmd {
        Command::Register { voter_id } => {
            let res = client
                .post(format!("{node}/register"))
                .json(&RegisterReq { voter_id })
                .send()
                .await?;
            print_response(res).await?;
        }
        Command::Vote {
            voter_id,
            candidate,
        } => {
            let res = client
                .post(format!("{node}/vote"))
                .json(&VoteReq {
                    voter_id,
                    candidate,
                })
                .send()
                .await?;
            print_response(res).await?;
        }
        Command::Results => print_response(client.get(format!("{node}/results")).send().await?).await?,
        Command::Verify => {
            print_response(client.get(format!("{node}/chain/verify")).send().await?).await?
        }
        Command::Chain => print_response(client.get(format!("{node}/chain")).send().await?).await?,
        Command::Audit { file, format } => audit(&file, format)?,
    }
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<()> {
    let status = res.status();
    let body = res.text().await?;
    println!("status: {}", status);
    println!("{body}");
    Ok(())
}

fn audit(file: &Path, format: Format) -> Result<()> {
    let blocks: Vec<Block> = match format {
        Format::Json => JsonFileMirror::new(file).load()?,
        Format::Sled => SledMirror::open(file)?.load()?,
    };
    debug!(records = blocks.len(), "snapshot loaded");
    if blocks.is_empty() {
        println!("no records in {}", file.display());
        return Ok(());
    }
    // each node run mirrors its own genesis; older snapshots may lack one
    let runs = split_runs(&blocks);
    for (n, run) in runs.iter().enumerate() {
        let checked = if run[0].is_genesis() {
            verify_chain(run)
        } else {
            verify_segment(run)
        };
        if let Err(failure) = checked {
            bail!("run {}: {failure}", n + 1);
        }
    }
    println!(
        "ok: {} records in {} run(s), tip {}",
        blocks.len(),
        runs.len(),
        blocks[blocks.len() - 1].hash
    );
    Ok(())
}
