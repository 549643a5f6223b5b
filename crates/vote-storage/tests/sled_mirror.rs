mod helpers;

use helpers::{create_temp_mirror, teardown_mirror, voted_blocks, voted_run};
use tempfile::tempdir;
use vote_core::{split_runs, verify_chain, verify_segment};
use vote_storage::{SledMirror, VoteMirror};

#[test]
fn empty_mirror_has_no_tip() -> anyhow::Result<()> {
    let (temp_dir, mirror) = create_temp_mirror();
    assert_eq!(mirror.tip_index()?, None);
    assert!(mirror.load()?.is_empty());
    teardown_mirror(temp_dir, mirror);
    Ok(())
}

#[test]
fn records_are_loaded_in_insertion_order() -> anyhow::Result<()> {
    let (temp_dir, mirror) = create_temp_mirror();
    let blocks = voted_blocks(300);
    for block in &blocks {
        mirror.record(block)?;
    }
    let loaded = mirror.load()?;
    assert_eq!(loaded, blocks);
    assert!(verify_segment(&loaded).is_ok());
    teardown_mirror(temp_dir, mirror);
    Ok(())
}

#[test]
fn restarted_runs_do_not_overwrite_each_other() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().to_path_buf();
    let first = voted_run(3, 1_600_000_000_000);
    let second = voted_run(2, 1_700_000_000_000);
    for run in [&first, &second] {
        let mirror = SledMirror::open(&db_path)?;
        for block in run.iter() {
            mirror.record(block)?;
        }
    }

    let mirror = SledMirror::open(&db_path)?;
    let loaded = mirror.load()?;
    assert_eq!(loaded.len(), first.len() + second.len());
    let runs = split_runs(&loaded);
    assert_eq!(runs, vec![first.as_slice(), second.as_slice()]);
    assert!(runs.iter().all(|run| verify_chain(run).is_ok()));
    drop(mirror);
    temp_dir.close()?;
    Ok(())
}

#[test]
fn tip_tracks_last_record() -> anyhow::Result<()> {
    let (temp_dir, mirror) = create_temp_mirror();
    let blocks = voted_blocks(3);
    for block in &blocks {
        mirror.record(block)?;
    }
    assert_eq!(mirror.tip_index()?, Some(3));
    mirror.clear()?;
    assert_eq!(mirror.tip_index()?, None);
    assert!(mirror.load()?.is_empty());
    teardown_mirror(temp_dir, mirror);
    Ok(())
}

#[tokio::test]
async fn mirror_persists_across_reopen() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().to_path_buf();
    let blocks = voted_blocks(10);
    {
        let mirror = SledMirror::open(&db_path)?;
        for block in &blocks {
            mirror.record(block)?;
        }
    }
    {
        let mirror = SledMirror::open(&db_path)?;
        assert_eq!(mirror.load()?, blocks);
        assert_eq!(mirror.tip_index()?, Some(10));
    }
    temp_dir.close()?;
    Ok(())
}
