use std::fs;

use animpack::prelude::*;
use animpack::wire::POSE_SAMPLE_SIZE;

fn record_len(name: &str, bones: usize, frames: usize) -> usize {
    1 + (name.len() + 1) + 1 + 4 + frames * bones * POSE_SAMPLE_SIZE + 3
}

#[test]
fn test_batch_compiles_two_assets_into_fresh_archive() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("animations");
    fs::create_dir(&input)?;
    fs::write(input.join("idle.gltf"), b"")?;
    fs::write(input.join("walk.gltf"), b"")?;
    let archive = dir.path().join("compiled.bin");

    let mut host = ScriptedHost::new(1, vec![Action::new(0.0, 2.0)]);
    let appended = Batch::new(&input, &archive).run(&mut [&mut host])?;

    let bytes = fs::read(&archive)?;
    assert_eq!(bytes.len(), appended);
    assert_eq!(
        bytes.len(),
        record_len("idle", 1, 2) + record_len("walk", 1, 2)
    );

    // Each record begins with the tag and ends with the terminator,
    // sharing no bytes with its neighbor.
    let first = record_len("idle", 1, 2);
    assert_eq!(bytes[0], 0x41);
    assert_eq!(&bytes[first - 3..first], b"END");
    assert_eq!(bytes[first], 0x41);
    assert_eq!(&bytes[bytes.len() - 3..], b"END");

    let records = read_archive(&bytes)?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "idle");
    assert_eq!(records[1].name, "walk");
    for record in &records {
        assert_eq!(record.frame_count(), 2);
        assert_eq!(record.bone_count(), 1);
        for (frame, poses) in record.frames.iter().enumerate() {
            assert_eq!(poses[0], ScriptedHost::transform_at(frame as u32, 0));
        }
    }
    Ok(())
}

#[test]
fn test_repeated_runs_accumulate() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("animations");
    fs::create_dir(&input)?;
    fs::write(input.join("run.gltf"), b"")?;
    let archive = dir.path().join("compiled.bin");

    let mut host = ScriptedHost::new(2, vec![Action::new(0.0, 3.0)]);
    let first = Batch::new(&input, &archive).run(&mut [&mut host])?;
    let second = Batch::new(&input, &archive).run(&mut [&mut host])?;
    assert_eq!(first, second);

    // Append mode preserves the first run's bytes; the same record
    // appears twice.
    let bytes = fs::read(&archive)?;
    assert_eq!(bytes.len(), first + second);
    let records = read_archive(&bytes)?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], records[1]);
    Ok(())
}

#[test]
fn test_failed_batch_never_touches_archive() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("animations");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("good.gltf"), b"").unwrap();
    fs::write(input.join("zzz_empty.gltf"), b"").unwrap();
    let archive = dir.path().join("compiled.bin");

    // Every scene this host loads reports no actions, so the batch
    // fails on the first asset before any bytes are persisted.
    let mut host = ScriptedHost::new(1, Vec::new());
    let err = Batch::new(&input, &archive).run(&mut [&mut host]).unwrap_err();
    assert!(matches!(err, Error::NoActionsFound));
    assert!(!archive.exists());
}

#[test]
fn test_fbx_assets_abort_instead_of_skipping() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("animations");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("anim.gltf"), b"").unwrap();
    fs::write(input.join("zrig.fbx"), b"").unwrap();
    let archive = dir.path().join("compiled.bin");

    // One batch covers both formats; the FBX asset is discovered and
    // dispatched to its host, whose import failure aborts the run
    // after the glTF record compiled into the (abandoned) buffer.
    let mut gltf = ScriptedHost::new(1, vec![Action::new(0.0, 2.0)]);
    let mut fbx = FbxHost::new();
    let err = Batch::new(&input, &archive)
        .run(&mut [&mut gltf, &mut fbx])
        .unwrap_err();
    match err {
        Error::ImportFailure { path, .. } => {
            assert!(path.ends_with("zrig.fbx"));
        }
        other => panic!("expected import failure, got: {other}"),
    }
    assert_eq!(gltf.imported.len(), 1);
    assert!(!archive.exists());
}

#[test]
fn test_empty_input_appends_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("animations");
    fs::create_dir(&input)?;
    let archive = dir.path().join("compiled.bin");

    let mut host = GltfHost::new();
    let appended = Batch::new(&input, &archive).run(&mut [&mut host])?;
    assert_eq!(appended, 0);
    assert_eq!(fs::read(&archive)?.len(), 0);
    Ok(())
}

#[test]
fn test_gltf_batch_propagates_import_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("animations");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("broken.gltf"), b"not gltf").unwrap();
    let archive = dir.path().join("compiled.bin");

    let mut host = GltfHost::new();
    let err = Batch::new(&input, &archive).run(&mut [&mut host]).unwrap_err();
    assert!(matches!(err, Error::ImportFailure { .. }));
    assert!(!archive.exists());
}
